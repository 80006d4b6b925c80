use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError{
    #[error("action domain must contain at least one action")]
    EmptyActionDomain,
    #[error("action {0} appears more than once in action domain")]
    DuplicatedAction(String),
    #[error("game requires at least one agent")]
    ZeroAgents,
    #[error("episode must last at least one round")]
    ZeroRounds,
    #[error("game expects {expected} agents, got {got}")]
    AgentCountMismatch{
        expected: usize,
        got: usize,
    },
    #[error("agent {0} is listed more than once")]
    DuplicatedAgent(String),
    #[error("payoff table for {domain} actions and {agents} agents does not fit in memory")]
    PayoffTableTooLarge{
        domain: usize,
        agents: usize,
    },
    #[error("resource grid must have positive dimensions, got {width}x{height}")]
    EmptyResourceGrid{
        width: usize,
        height: usize,
    },
    #[error("reward matrix has no entry for {0}")]
    IncompleteMatrix(String),
    #[error("value can't be probability: {0}")]
    NotAProbability(f64),
}
