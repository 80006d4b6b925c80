use thiserror::Error;
use crate::domain::Scheme;
use crate::error::{ActionError, ConfigError, InvariantError, ProtocolError, RenderError};

/// Top level crate error, constructed from more specific error.
#[derive(Debug, Clone, Error)]
pub enum RondoError<S: Scheme>{
    /// Error occurring in specific game logic, defined in generic parameter `S:` [`Scheme`](crate::domain::Scheme).
    #[error("Game error: {source}")]
    Game{
        #[source]
        source: S::GameErrorType
    },
    /// Turn protocol violation, e.g. stepping before reset or acting for dead agent.
    #[error("Protocol error: {source}")]
    Protocol{
        #[source]
        source: ProtocolError<S>
    },
    /// Action not accepted by action domain.
    #[error("Action error: {source}")]
    Action{
        #[source]
        source: ActionError<S>
    },
    /// Broken internal invariant. This is not recoverable, environment refuses to
    /// continue the episode after reporting it.
    #[error("Internal invariant violated: {source}")]
    Invariant{
        #[source]
        source: InvariantError
    },
    #[error("Configuration error: {source}")]
    Config{
        #[source]
        source: ConfigError
    },
    /// Rendering failure, never affects game state.
    #[error("Render error: {source}")]
    Render{
        #[source]
        source: RenderError
    },
    /// Custom error to return if error does not fit any other category.
    #[error("Custom: {0}")]
    Custom(String),
}

impl<S: Scheme> RondoError<S>{
    /// Returns `true` for errors after which episode must not be continued.
    pub fn is_fatal(&self) -> bool{
        matches!(self, RondoError::Invariant{..})
    }
}

impl<S: Scheme> From<InvariantError> for RondoError<S>{
    fn from(value: InvariantError) -> Self {
        Self::Invariant{source: value}
    }
}

impl<S: Scheme> From<ConfigError> for RondoError<S>{
    fn from(value: ConfigError) -> Self {
        Self::Config{source: value}
    }
}

impl<S: Scheme> From<RenderError> for RondoError<S>{
    fn from(value: RenderError) -> Self {
        Self::Render{source: value}
    }
}
