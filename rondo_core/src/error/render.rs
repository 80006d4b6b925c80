use thiserror::Error;

/// Errors of rendering. They are reported to caller, game state is not touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError{
    #[error("render mode {mode} is not supported by this game")]
    Unsupported{
        mode: String
    },
    #[error("environment was closed")]
    Closed,
    #[error("rendering failed: {0}")]
    Failed(String),
}
