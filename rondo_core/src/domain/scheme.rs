use std::fmt::Debug;
use crate::agent::AgentIdentifier;
use crate::domain::{Action, Reward};
use crate::error::InternalGameError;

/// Trait locking game scheme parameters, so that environment, game rules and agents
/// agree on types of actions, identifiers and rewards.
pub trait Scheme: Clone + Debug + Send + Sync + 'static{
    type ActionType: Action;
    type GameErrorType: InternalGameError<Self>;
    type AgentId: AgentIdentifier;
    type UniversalReward: Reward;
}
