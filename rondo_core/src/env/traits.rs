use crate::domain::Scheme;
use crate::env::{TurnBasedEnvironment, TurnBasedGame};
use crate::error::{ProtocolError, RondoError};

/// Environment for games with state where one agent acts at a time.
pub trait StatefulEnvironment<S: Scheme>{

    /// Returns agent allowed to play now, `None` when nobody is allowed (episode is drained
    /// or not started).
    fn current_player(&self) -> Option<S::AgentId>;

    /// Processes action of agent. Fails with [`ProtocolError::ViolatedOrder`] if it is
    /// not turn of this agent.
    fn process_action(&mut self, agent: &S::AgentId, action: Option<S::ActionType>) -> Result<(), RondoError<S>>;

    fn is_finished(&self) -> bool;
}

/// Environment to be reset with some seed, so that the episode can be replayed.
pub trait ReseedEnvironment<S: Scheme, Seed>: StatefulEnvironment<S>{
    fn reseed(&mut self, seed: Seed) -> Result<(), RondoError<S>>;
}

/// Environment that can tell score of every player.
pub trait ScoreEnvironment<S: Scheme>: StatefulEnvironment<S>{
    /// Sum of rewards of agent in current episode.
    fn actual_score_of_player(&self, agent: &S::AgentId) -> S::UniversalReward;
}

impl<S: Scheme, G: TurnBasedGame<S>> StatefulEnvironment<S> for TurnBasedEnvironment<S, G>{
    fn current_player(&self) -> Option<S::AgentId> {
        self.agent_selection().cloned()
    }

    fn process_action(&mut self, agent: &S::AgentId, action: Option<S::ActionType>) -> Result<(), RondoError<S>> {
        match self.agent_selection().cloned(){
            Some(current) if &current == agent => self.step(action),
            Some(current) => Err(ProtocolError::ViolatedOrder(agent.clone(), current).into()),
            None if self.is_drained() => Err(ProtocolError::EpisodeDrained.into()),
            None => Err(ProtocolError::NotInitialized.into()),
        }
    }

    fn is_finished(&self) -> bool {
        self.is_drained()
    }
}

impl<S: Scheme, G: TurnBasedGame<S>> ReseedEnvironment<S, u64> for TurnBasedEnvironment<S, G>{
    fn reseed(&mut self, seed: u64) -> Result<(), RondoError<S>> {
        self.reset(Some(seed)).map(|_| ())
    }
}

impl<S: Scheme, G: TurnBasedGame<S>> ScoreEnvironment<S> for TurnBasedEnvironment<S, G>{
    fn actual_score_of_player(&self, agent: &S::AgentId) -> S::UniversalReward {
        self.possible_agents().iter().position(|a| a == agent)
            .and_then(|seat| self.lifecycle().total(seat).cloned())
            .unwrap_or_default()
    }
}
