use thiserror::Error;

/// Violations of engine invariants. They point at construction bugs, not at caller misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError{
    #[error("payoff table has no entry for joint action {joint}")]
    PayoffMiss{
        joint: String
    },
    #[error("joint action requested with {missing} seats not filled")]
    IncompleteJointAction{
        missing: usize
    },
    #[error("seat {seat} out of range for {agents} agents")]
    SeatOutOfRange{
        seat: usize,
        agents: usize,
    },
    #[error("round scored for {got} agents, expected {expected}")]
    RewardCountMismatch{
        expected: usize,
        got: usize,
    },
}
