use crate::env::RenderMode;
use crate::error::ConfigError;

/// Parameters shared by every turn based game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "speedy", derive(speedy::Writable, speedy::Readable))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeConfig{
    /// Number of agents taking part, at least one.
    pub agent_count: usize,
    /// Number of rounds after which every agent is truncated, at least one.
    pub max_rounds: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub render_mode: RenderMode,
}

impl EpisodeConfig{
    pub fn new(agent_count: usize, max_rounds: u32) -> Self{
        Self{agent_count, max_rounds, render_mode: RenderMode::None}
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self{
        self.render_mode = render_mode;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError>{
        if self.agent_count == 0{
            return Err(ConfigError::ZeroAgents);
        }
        if self.max_rounds == 0{
            return Err(ConfigError::ZeroRounds);
        }
        Ok(())
    }
}

impl Default for EpisodeConfig{
    fn default() -> Self {
        Self::new(2, 100)
    }
}
