use thiserror::Error;
use crate::error::RondoError;
use crate::domain::Scheme;

/// Errors in action validation. Actions are never clamped into domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError<S: Scheme>{
    #[error("agent {agent} selected action {action} outside of action domain")]
    OutOfBounds{
        agent: S::AgentId,
        action: S::ActionType,
    },
}

impl<S: Scheme> From<ActionError<S>> for RondoError<S>{
    fn from(value: ActionError<S>) -> Self {
        Self::Action{source: value}
    }
}
