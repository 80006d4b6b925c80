use std::fmt::Debug;
use rand::rngs::StdRng;
use crate::domain::{ActionDomain, Scheme};
use crate::env::{JointAction, PixelBuffer, RenderMode};
use crate::error::{RenderError, RondoError};

/// Outcome of a closed round as computed by game rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundScore<R>{
    /// Reward of every agent, indexed by turn position.
    pub rewards: Vec<R>,
    /// Shared delta applied by the game to common resources, if game has any.
    pub global: Option<f64>,
}

impl<R> RoundScore<R>{
    pub fn new(rewards: Vec<R>) -> Self{
        Self{rewards, global: None}
    }

    pub fn with_global(rewards: Vec<R>, global: f64) -> Self{
        Self{rewards, global: Some(global)}
    }
}

/// What renderer may know about environment besides game's own state.
#[derive(Debug)]
pub struct RenderContext<'a, S: Scheme>{
    pub agents: &'a [S::AgentId],
    /// Actions submitted so far in the current round.
    pub pending: &'a [Option<S::ActionType>],
    /// Last closed round.
    pub last_joint: Option<&'a JointAction<S::ActionType>>,
    pub round_count: u32,
    pub max_rounds: u32,
    /// Every agent is terminated or truncated.
    pub finished: bool,
}

/// Rules of a turn based game plugged into [`TurnBasedEnvironment`](crate::env::TurnBasedEnvironment).
///
/// Environment takes care of turn order, round collection and reward bookkeeping.
/// Game decides what joint action is worth, owns any shared state (e.g. resource pool)
/// and tells what agents observe.
pub trait TurnBasedGame<S: Scheme>: Send{
    type Observation: Clone + Debug + Send;

    fn action_domain(&self) -> &ActionDomain<S::ActionType>;

    /// Prepares game for new episode with `agent_count` agents.
    fn reset_game(&mut self, agent_count: usize, rng: &mut StdRng) -> Result<(), RondoError<S>>;

    /// Scores closed round. Seats of agents that died before acting are `None`.
    /// Shared state is updated here, before the next round starts.
    fn score_round(&mut self, joint: &JointAction<S::ActionType>, max_rounds: u32)
        -> Result<RoundScore<S::UniversalReward>, RondoError<S>>;

    /// Observation of agent sitting at `seat`.
    fn observe(&self, seat: usize) -> Self::Observation;

    fn render_text(&self, context: &RenderContext<'_, S>) -> Result<String, RenderError>;

    fn render_pixels(&self, _context: &RenderContext<'_, S>) -> Result<PixelBuffer, RenderError>{
        Err(RenderError::Unsupported{mode: RenderMode::PixelBuffer.to_string()})
    }

    /// Releases resources held for rendering.
    fn close(&mut self){}
}
