use std::fmt::{Display, Formatter};
use enum_map::Enum;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use rondo_core::agent::AgentNum;
use rondo_core::config::EpisodeConfig;
use rondo_core::domain::{Action, ActionDomain, Scheme};
use rondo_core::env::{JointAction, PixelBuffer, RenderContext, RenderMode, RoundScore, TurnBasedEnvironment, TurnBasedGame};
use rondo_core::error::{ConfigError, RenderError, RondoError};
use rondo_core::payoff::{CostAndAverage, PayoffTable, RewardPolicy};
use rondo_core::pool::ResourcePool;
use crate::domain::ClassicGameError;

pub const COMMONS_DEFAULT_AGENTS: usize = 10;
pub const COMMONS_DEFAULT_ROUNDS: u32 = 10;
pub const COMMONS_POOL_SIDE: usize = 8;
pub const COMMONS_POOL_SEED: u64 = 12345;
/// Initial cells are drawn uniformly from `0..COMMONS_RESOURCE_HIGH`.
pub const COMMONS_RESOURCE_HIGH: u32 = 256;
/// Side of the square drawn for one pool cell in pixel render.
pub const CELL_PIXELS: usize = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enum, Serialize, Deserialize, speedy::Writable, speedy::Readable)]
pub enum CommonsAction{
    Cooperate,
    Defect,
    /// No move, also used for agents that left before acting.
    Abstain,
}

impl CommonsAction{
    pub const ALL: [CommonsAction; 3] = [CommonsAction::Cooperate, CommonsAction::Defect, CommonsAction::Abstain];
}

impl Display for CommonsAction{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self{
            CommonsAction::Cooperate => write!(f, "COOPERATE"),
            CommonsAction::Defect => write!(f, "DEFECT"),
            CommonsAction::Abstain => write!(f, "NONE"),
        }
    }
}

impl Action for CommonsAction{}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommonsScheme;

impl Scheme for CommonsScheme{
    type ActionType = CommonsAction;
    type GameErrorType = ClassicGameError;
    type AgentId = AgentNum;
    type UniversalReward = f64;
}

/// Reward policy chosen at runtime.
pub type DynCommonsPolicy = Box<dyn RewardPolicy<CommonsAction, Reward = f64>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonsConfig{
    pub agent_count: usize,
    pub max_rounds: u32,
    pub width: usize,
    pub height: usize,
    /// Seed of the generator filling the pool.
    pub pool_seed: u64,
    /// Refill the pool on every reset. When not set the pool outlives episodes.
    pub reset_pool_on_reset: bool,
    pub render_mode: RenderMode,
}

impl Default for CommonsConfig{
    fn default() -> Self {
        Self{
            agent_count: COMMONS_DEFAULT_AGENTS,
            max_rounds: COMMONS_DEFAULT_ROUNDS,
            width: COMMONS_POOL_SIDE,
            height: COMMONS_POOL_SIDE,
            pool_seed: COMMONS_POOL_SEED,
            reset_pool_on_reset: false,
            render_mode: RenderMode::None,
        }
    }
}

impl CommonsConfig{
    pub fn episode_config(&self) -> EpisodeConfig{
        EpisodeConfig::new(self.agent_count, self.max_rounds)
            .with_render_mode(self.render_mode)
    }
}

/// Tragedy of the commons. Every round the joint action is looked up in payoff table,
/// reduced by reward policy `P` to reward of every agent, and the global delta of the
/// round (if policy produces one) is applied once to the shared pool.
/// All agents observe the pool.
///
/// Depletion of the pool does not end the episode, only round limit does.
pub struct CommonsGame<P: RewardPolicy<CommonsAction, Reward = f64>>{
    config: CommonsConfig,
    table: PayoffTable<CommonsAction>,
    policy: P,
    pool: ResourcePool,
    last_global: Option<f64>,
}

impl<P: RewardPolicy<CommonsAction, Reward = f64>> CommonsGame<P>{
    pub fn new(config: CommonsConfig, policy: P) -> Result<Self, ConfigError>{
        let domain = ActionDomain::new(CommonsAction::ALL.to_vec())?;
        let table = PayoffTable::build(domain, config.agent_count)?;
        let pool = seed_pool(&config)?;
        Ok(Self{config, table, policy, pool, last_global: None})
    }

    pub fn pool(&self) -> &ResourcePool{
        &self.pool
    }

    pub fn table(&self) -> &PayoffTable<CommonsAction>{
        &self.table
    }

    pub fn config(&self) -> &CommonsConfig{
        &self.config
    }

    /// Global delta of the last closed round.
    pub fn last_global(&self) -> Option<f64>{
        self.last_global
    }
}

impl CommonsGame<CostAndAverage<CommonsAction>>{
    pub fn with_default_policy(config: CommonsConfig) -> Result<Self, ConfigError>{
        Self::new(config, CostAndAverage::new(CommonsAction::Cooperate, CommonsAction::Defect))
    }
}

fn seed_pool(config: &CommonsConfig) -> Result<ResourcePool, ConfigError>{
    let mut rng = StdRng::seed_from_u64(config.pool_seed);
    ResourcePool::random(config.width, config.height, COMMONS_RESOURCE_HIGH, &mut rng)
}

/// Maps cell value to colour from red (empty) to green (full).
fn heat(value: f64) -> [u8; 3]{
    let t = (value / COMMONS_RESOURCE_HIGH as f64).clamp(0.0, 1.0);
    let g = (t * 255.0).round() as u8;
    [255 - g, g, 0]
}

impl<P: RewardPolicy<CommonsAction, Reward = f64>> TurnBasedGame<CommonsScheme> for CommonsGame<P>{
    type Observation = ResourcePool;

    fn action_domain(&self) -> &ActionDomain<CommonsAction> {
        self.table.domain()
    }

    fn reset_game(&mut self, agent_count: usize, _rng: &mut StdRng) -> Result<(), RondoError<CommonsScheme>> {
        if agent_count != self.table.agent_count(){
            return Err(RondoError::Game{source: ClassicGameError::WrongAgentCount{
                game: "tragedy-of-the-commons", expected: self.table.agent_count(), got: agent_count
            }});
        }
        if self.config.reset_pool_on_reset{
            self.pool = seed_pool(&self.config)?;
        }
        self.last_global = None;
        Ok(())
    }

    fn score_round(&mut self, joint: &JointAction<CommonsAction>, max_rounds: u32) -> Result<RoundScore<f64>, RondoError<CommonsScheme>> {
        let actions = joint.actions_or(&CommonsAction::Abstain);
        let results = self.table.evaluate(&self.policy, &actions, max_rounds)?;
        let global = results.iter().find_map(|r| r.global);
        if let Some(delta) = global{
            self.pool.apply_global_delta(delta);
            log::debug!("Pool updated by {delta}, total resources: {}", self.pool.total());
            if self.pool.is_depleted(){
                log::info!("Resource pool depleted");
            }
        }
        self.last_global = global;
        let rewards = results.into_iter().map(|r| r.reward).collect();
        Ok(RoundScore{rewards, global})
    }

    fn observe(&self, _seat: usize) -> ResourcePool {
        self.pool.clone()
    }

    fn render_text(&self, context: &RenderContext<'_, CommonsScheme>) -> Result<String, RenderError> {
        Ok(format!("Round {}/{}\n{}", context.round_count, context.max_rounds, self.pool))
    }

    fn render_pixels(&self, _context: &RenderContext<'_, CommonsScheme>) -> Result<PixelBuffer, RenderError> {
        let mut buffer = PixelBuffer::new(self.pool.width() * CELL_PIXELS, self.pool.height() * CELL_PIXELS);
        for (y, row) in self.pool.rows().enumerate(){
            for (x, value) in row.iter().enumerate(){
                buffer.fill_rect(x * CELL_PIXELS, y * CELL_PIXELS, CELL_PIXELS, CELL_PIXELS, heat(*value));
            }
        }
        Ok(buffer)
    }
}

pub type CommonsEnvironment<P> = TurnBasedEnvironment<CommonsScheme, CommonsGame<P>>;

/// Environment with agents numbered `0..agent_count`.
pub fn commons_environment<P: RewardPolicy<CommonsAction, Reward = f64>>(config: CommonsConfig, policy: P)
    -> Result<CommonsEnvironment<P>, RondoError<CommonsScheme>>{
    let episode = config.episode_config();
    let agents = (0..config.agent_count as AgentNum).collect();
    TurnBasedEnvironment::new(CommonsGame::new(config, policy)?, agents, episode)
}

#[cfg(test)]
mod tests{
    use rondo_core::env::{Rendered, RenderMode};
    use rondo_core::payoff::{BlindMaxVoter, CostAndAverage};
    use crate::commons::*;
    use crate::commons::CommonsAction::{Abstain, Cooperate, Defect};

    fn play_round<P: RewardPolicy<CommonsAction, Reward = f64>>(env: &mut CommonsEnvironment<P>, actions: &[CommonsAction]){
        for a in actions{
            env.step(Some(*a)).unwrap();
        }
    }

    #[test]
    fn defection_drains_pool_uniformly(){
        let config = CommonsConfig::default();
        let mut env = commons_environment(config, CostAndAverage::new(Cooperate, Defect)).unwrap();
        env.reset(Some(5)).unwrap();
        let before = env.game().pool().clone();
        let round = [Cooperate, Cooperate, Defect, Cooperate, Abstain, Cooperate, Cooperate, Abstain, Cooperate, Abstain];
        play_round(&mut env, &round);
        let global = env.game().last_global().unwrap();
        assert!((global - (-(6.0 / 3.0) / 100.0)).abs() < 1e-12);
        let after = env.game().pool();
        for (b, a) in before.observe().iter().zip(after.observe()){
            assert!((a - (b + global).max(0.0)).abs() < 1e-12);
        }
        assert_eq!(env.reward(&0).unwrap(), 2.0);
        assert_eq!(env.observe(&3).unwrap(), *after);
    }

    #[test]
    fn full_cooperation_leaves_pool(){
        let mut env = commons_environment(CommonsConfig::default(), CostAndAverage::new(Cooperate, Defect)).unwrap();
        env.reset(Some(5)).unwrap();
        let before = env.game().pool().clone();
        play_round(&mut env, &[Cooperate; 10]);
        assert_eq!(env.game().last_global(), Some(0.0));
        assert_eq!(env.game().pool(), &before);
        assert!((env.cumulative_reward(&9).unwrap() - 10.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn pool_seed_is_deterministic(){
        let a = CommonsGame::with_default_policy(CommonsConfig::default()).unwrap();
        let b = CommonsGame::with_default_policy(CommonsConfig::default()).unwrap();
        assert_eq!(a.pool(), b.pool());
        assert!(a.pool().observe().iter().all(|c| (0.0..256.0).contains(c)));
        assert_eq!(a.table().len(), 59049);
    }

    #[test]
    fn terminated_agent_counts_as_abstaining(){
        let config = CommonsConfig{agent_count: 3, ..CommonsConfig::default()};
        let mut env = commons_environment(config, BlindMaxVoter).unwrap();
        env.reset(Some(1)).unwrap();
        env.terminate(&2).unwrap();
        play_round(&mut env, &[Defect, Defect]);
        assert_eq!(env.reward(&0).unwrap(), 2.0);
        assert_eq!(env.reward(&2).unwrap(), 0.0);
    }

    #[test]
    fn pixel_render_is_heat_map(){
        let config = CommonsConfig{agent_count: 2, render_mode: RenderMode::PixelBuffer, ..CommonsConfig::default()};
        let mut env = commons_environment(config, CostAndAverage::new(Cooperate, Defect)).unwrap();
        env.reset(Some(1)).unwrap();
        match env.render().unwrap(){
            Rendered::Pixels(buffer) => {
                assert_eq!(buffer.width(), 8 * CELL_PIXELS);
                assert_eq!(buffer.height(), 8 * CELL_PIXELS);
                let cell = env.game().pool().get(0, 0).unwrap();
                assert_eq!(buffer.pixel(0, 0), Some(super::heat(cell)));
            },
            other => panic!("unexpected render {other:?}"),
        }
    }

    #[test]
    fn pool_survives_reset_unless_configured(){
        let config = CommonsConfig{agent_count: 2, max_rounds: 1, ..CommonsConfig::default()};
        let mut env = commons_environment(config.clone(), CostAndAverage::new(Cooperate, Defect)).unwrap();
        env.reset(Some(1)).unwrap();
        play_round(&mut env, &[Cooperate, Defect]);
        let drained = env.game().pool().clone();
        env.reset(Some(1)).unwrap();
        assert_eq!(env.game().pool(), &drained);

        let config = CommonsConfig{reset_pool_on_reset: true, ..config};
        let mut env = commons_environment(config, CostAndAverage::new(Cooperate, Defect)).unwrap();
        env.reset(Some(1)).unwrap();
        let fresh = env.game().pool().clone();
        play_round(&mut env, &[Cooperate, Defect]);
        env.reset(Some(1)).unwrap();
        assert_eq!(env.game().pool(), &fresh);
    }

    #[test]
    fn boxed_policy_can_be_chosen_at_runtime(){
        let policy: DynCommonsPolicy = Box::new(BlindMaxVoter);
        let config = CommonsConfig{agent_count: 2, ..CommonsConfig::default()};
        let mut env = commons_environment(config, policy).unwrap();
        env.reset(None).unwrap();
        play_round(&mut env, &[Cooperate, Cooperate]);
        assert_eq!(env.reward(&1).unwrap(), 2.0);
    }
}
