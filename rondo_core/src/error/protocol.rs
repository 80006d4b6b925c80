use thiserror::Error;
use crate::error::RondoError;
use crate::domain::Scheme;

/// Error for capturing misbehavior in turn protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError<S: Scheme>{
    #[error("environment not initialized, reset must be called first")]
    NotInitialized,
    #[error("every agent has been flushed, episode is drained")]
    EpisodeDrained,
    #[error("agent {} is terminated or truncated, the only valid action is none", .0)]
    InvalidAction(S::AgentId),
    #[error("agent {} is alive and must select action", .0)]
    MissingAction(S::AgentId),
    #[error("agent {} does not take part in this game", .0)]
    UnknownAgent(S::AgentId),
    #[error("agent {} attempted to move on turn of {}", .0, .1)]
    ViolatedOrder(S::AgentId, S::AgentId),
}

impl<S: Scheme> From<ProtocolError<S>> for RondoError<S>{
    fn from(value: ProtocolError<S>) -> Self {
        Self::Protocol{source: value}
    }
}
