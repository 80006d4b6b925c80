use std::collections::HashSet;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::config::EpisodeConfig;
use crate::domain::{ActionDomain, Scheme};
use crate::env::{AgentInfo, AgentIter, EpisodeLifecycle, JointAction, RenderContext, RenderMode, Rendered, RoundState, TurnBasedGame, TurnScheduler};
use crate::error::{ActionError, ConfigError, InvariantError, ProtocolError, RenderError, RondoError};

/// Data returned by [`TurnBasedEnvironment::reset`].
#[derive(Debug, Clone)]
pub struct ResetOutput<S: Scheme, O>{
    pub initial_actor: S::AgentId,
    pub observations: Vec<(S::AgentId, O)>,
    pub infos: Vec<(S::AgentId, AgentInfo)>,
}

/// State of the currently selected agent, as returned by [`TurnBasedEnvironment::last`].
#[derive(Debug, Clone)]
pub struct LastStep<S: Scheme, O>{
    pub agent: S::AgentId,
    pub observation: O,
    /// Reward accumulated since this agent's previous turn.
    pub reward: S::UniversalReward,
    pub terminated: bool,
    pub truncated: bool,
    pub info: AgentInfo,
}

/// Generic turn based environment driving game rules `G`.
///
/// Agents act one at a time in the order given at construction. Every [`step`](Self::step)
/// records action of the current agent, once every live agent of the round has acted the
/// round is scored by the game, rewards are assigned and the next actor is selected.
/// Agents that are terminated or truncated receive one final step with no action (flush),
/// after every agent is flushed the episode is drained.
///
/// Results are pulled with [`last`](Self::last) and [`observe`](Self::observe), `step` itself
/// returns nothing on success.
pub struct TurnBasedEnvironment<S: Scheme, G: TurnBasedGame<S>>{
    game: G,
    possible_agents: Vec<S::AgentId>,
    scheduler: TurnScheduler<S::AgentId>,
    round: RoundState<S::ActionType>,
    lifecycle: EpisodeLifecycle<S::UniversalReward>,
    config: EpisodeConfig,
    rng: StdRng,
    last_joint: Option<JointAction<S::ActionType>>,
    initialized: bool,
    closed: bool,
    poisoned: Option<InvariantError>,
}

impl<S: Scheme, G: TurnBasedGame<S>> TurnBasedEnvironment<S, G>{

    /// Creates environment, agents act in the order of `agents`.
    pub fn new(game: G, agents: Vec<S::AgentId>, config: EpisodeConfig) -> Result<Self, RondoError<S>>{
        config.validate()?;
        if agents.len() != config.agent_count{
            return Err(ConfigError::AgentCountMismatch{expected: config.agent_count, got: agents.len()}.into());
        }
        let mut seen = HashSet::new();
        for agent in agents.iter(){
            if !seen.insert(agent){
                return Err(ConfigError::DuplicatedAgent(agent.to_string()).into());
            }
        }
        Ok(Self{
            game,
            scheduler: TurnScheduler::new(agents.clone()),
            round: RoundState::new(agents.len()),
            lifecycle: EpisodeLifecycle::new(agents.len(), config.max_rounds),
            possible_agents: agents,
            config,
            rng: StdRng::from_os_rng(),
            last_joint: None,
            initialized: false,
            closed: false,
            poisoned: None,
        })
    }

    /// Starts new episode. With `Some(seed)` the episode (including sampled actions
    /// and any random game setup) is reproducible.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<ResetOutput<S, G::Observation>, RondoError<S>>{
        self.rng = match seed{
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let n = self.possible_agents.len();
        self.game.reset_game(n, &mut self.rng)?;
        self.scheduler.reset(self.possible_agents.clone());
        self.round.reset(n);
        self.lifecycle.reset();
        self.last_joint = None;
        self.poisoned = None;
        self.closed = false;
        self.initialized = true;
        #[cfg(feature = "log_debug")]
        log::debug!("Environment reset with seed {seed:?}, {n} agents, {} rounds", self.config.max_rounds);

        let initial_actor = self.scheduler.current().cloned()
            .ok_or(ConfigError::ZeroAgents)?;
        let observations = self.possible_agents.iter().enumerate()
            .map(|(seat, agent)| (agent.clone(), self.game.observe(seat)))
            .collect();
        let infos = self.possible_agents.iter()
            .map(|agent| (agent.clone(), AgentInfo::new()))
            .collect();
        Ok(ResetOutput{initial_actor, observations, infos})
    }

    fn ensure_initialized(&self) -> Result<(), RondoError<S>>{
        if self.initialized{
            Ok(())
        } else {
            Err(ProtocolError::NotInitialized.into())
        }
    }

    fn seat_of(&self, agent: &S::AgentId) -> Result<usize, RondoError<S>>{
        self.scheduler.seat_of(agent)
            .ok_or_else(|| ProtocolError::UnknownAgent(agent.clone()).into())
    }

    /// Performs action of the currently selected agent.
    ///
    /// Live agent must provide action from domain. Terminated or truncated agent must
    /// provide `None`, this flushes it and moves selection to the next live agent, or to the
    /// next dead agent still waiting for its flush when nobody is live. Rewards are not
    /// touched by such step.
    ///
    /// Error of broken invariant is fatal: environment refuses every later step until reset.
    pub fn step(&mut self, action: Option<S::ActionType>) -> Result<(), RondoError<S>>{
        self.ensure_initialized()?;
        if let Some(source) = &self.poisoned{
            return Err(RondoError::Invariant{source: source.clone()});
        }
        let result = self.step_unchecked(action);
        if let Err(RondoError::Invariant{source}) = &result{
            #[cfg(feature = "log_error")]
            log::error!("Invariant violated, environment is poisoned until reset: {source}");
            self.poisoned = Some(source.clone());
        }
        result
    }

    fn step_unchecked(&mut self, action: Option<S::ActionType>) -> Result<(), RondoError<S>>{
        if self.lifecycle.is_drained(){
            return Err(ProtocolError::EpisodeDrained.into());
        }
        let seat = self.scheduler.position();
        let agent = self.scheduler.current().cloned()
            .ok_or(InvariantError::SeatOutOfRange{seat, agents: self.scheduler.len()})?;
        if !self.lifecycle.is_live(seat){
            return self.dead_step(seat, agent, action);
        }
        let action = action.ok_or_else(|| ProtocolError::MissingAction(agent.clone()))?;
        if !self.game.action_domain().contains(&action){
            return Err(ActionError::OutOfBounds{agent, action}.into());
        }
        #[cfg(feature = "log_trace")]
        log::trace!("Agent {agent} plays {action} in round {}", self.lifecycle.round_count());

        self.lifecycle.begin_turn(seat);
        self.round.record(seat, action)?;
        if self.round_complete(){
            self.close_round()?;
        } else {
            self.lifecycle.clear_rewards();
        }
        self.scheduler.advance();
        if self.lifecycle.is_flushed(self.scheduler.position()){
            if let Some(next) = self.scheduler.next_matching(|s| !self.lifecycle.is_flushed(s)){
                self.scheduler.select(next);
            }
        }
        self.lifecycle.accumulate();
        self.render_after_step();
        Ok(())
    }

    fn dead_step(&mut self, seat: usize, agent: S::AgentId, action: Option<S::ActionType>) -> Result<(), RondoError<S>>{
        if action.is_some(){
            return Err(ProtocolError::InvalidAction(agent).into());
        }
        self.lifecycle.flush(seat);
        #[cfg(feature = "log_debug")]
        log::debug!("Agent {agent} flushed");
        let lifecycle = &self.lifecycle;
        let next = self.scheduler
            .next_matching(|s| lifecycle.is_live(s) && !lifecycle.is_flushed(s))
            .or_else(|| self.scheduler.next_matching(|s| !lifecycle.is_flushed(s)));
        match next{
            Some(next) => {
                self.scheduler.select(next);
            },
            None => {
                #[cfg(feature = "log_debug")]
                log::debug!("Every agent flushed, episode drained after {} rounds", self.lifecycle.round_count());
            }
        }
        Ok(())
    }

    /// While nobody has left the episode rounds follow the seat cycle, so the last seat
    /// closes them. Afterwards a round closes once every live seat has acted.
    fn round_complete(&self) -> bool{
        if self.lifecycle.all_live(){
            self.scheduler.is_round_complete()
        } else {
            self.round.is_complete(|s| self.lifecycle.is_live(s))
        }
    }

    fn close_round(&mut self) -> Result<(), RondoError<S>>{
        let joint = self.round.joint_action();
        self.round.clear();
        let score = self.game.score_round(&joint, self.config.max_rounds)?;
        #[cfg(feature = "log_debug")]
        log::debug!("Round {} closed with {joint}, rewards: {:?}, global: {:?}",
            self.lifecycle.round_count() + 1, score.rewards, score.global);
        self.lifecycle.set_round_rewards(score.rewards)?;
        if self.lifecycle.complete_round(){
            #[cfg(feature = "log_info")]
            log::info!("Episode truncated after {} rounds", self.lifecycle.round_count());
        }
        self.last_joint = Some(joint);
        Ok(())
    }

    fn render_after_step(&mut self){
        if self.config.render_mode != RenderMode::Text{
            return;
        }
        match self.render(){
            Ok(Rendered::Text(_text)) => {
                #[cfg(feature = "log_info")]
                log::info!("{_text}");
            },
            Ok(_) => {},
            Err(_e) => {
                #[cfg(feature = "log_warn")]
                log::warn!("Rendering failed: {_e}");
            }
        }
    }

    /// Marks agent as terminated. If the agent was the only one missing from the current
    /// round, the round is closed now.
    pub fn terminate(&mut self, agent: &S::AgentId) -> Result<(), RondoError<S>>{
        self.ensure_initialized()?;
        let seat = self.seat_of(agent)?;
        self.lifecycle.terminate(seat);
        #[cfg(feature = "log_debug")]
        log::debug!("Agent {agent} terminated");
        if self.round_complete(){
            let result = self.close_round();
            if let Err(RondoError::Invariant{source}) = &result{
                self.poisoned = Some(source.clone());
            }
            result?;
            self.lifecycle.accumulate();
        }
        Ok(())
    }

    /// Observation of any agent, valid at any time after reset.
    pub fn observe(&self, agent: &S::AgentId) -> Result<G::Observation, RondoError<S>>{
        self.ensure_initialized()?;
        let seat = self.seat_of(agent)?;
        Ok(self.game.observe(seat))
    }

    /// Observation, reward since the previous turn, flags and info of the selected agent.
    pub fn last(&self) -> Result<LastStep<S, G::Observation>, RondoError<S>>{
        self.ensure_initialized()?;
        if self.lifecycle.is_drained(){
            return Err(ProtocolError::EpisodeDrained.into());
        }
        let seat = self.scheduler.position();
        let agent = self.scheduler.current().cloned()
            .ok_or(InvariantError::SeatOutOfRange{seat, agents: self.scheduler.len()})?;
        Ok(LastStep{
            agent,
            observation: self.game.observe(seat),
            reward: self.lifecycle.cumulative(seat).cloned().unwrap_or_default(),
            terminated: self.lifecycle.is_terminated(seat),
            truncated: self.lifecycle.is_truncated(seat),
            info: self.lifecycle.info(seat).cloned().unwrap_or_default(),
        })
    }

    /// Agent expected to act now, `None` before reset and after the episode is drained.
    pub fn agent_selection(&self) -> Option<&S::AgentId>{
        if !self.initialized || self.lifecycle.is_drained(){
            return None;
        }
        self.scheduler.current()
    }

    /// Agents that were not yet flushed.
    pub fn agents(&self) -> Vec<S::AgentId>{
        self.possible_agents.iter().enumerate()
            .filter(|(seat, _)| !self.lifecycle.is_flushed(*seat))
            .map(|(_, a)| a.clone())
            .collect()
    }

    pub fn possible_agents(&self) -> &[S::AgentId]{
        &self.possible_agents
    }

    pub fn action_domain(&self) -> &ActionDomain<S::ActionType>{
        self.game.action_domain()
    }

    /// Uniformly random action from domain, drawn from environment's seeded generator.
    pub fn sample_action(&mut self, agent: &S::AgentId) -> Result<S::ActionType, RondoError<S>>{
        self.seat_of(agent)?;
        self.game.action_domain().as_slice()
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| ConfigError::EmptyActionDomain.into())
    }

    /// Reward of agent from the last closed round (cleared on steps that do not close a round).
    pub fn reward(&self, agent: &S::AgentId) -> Result<S::UniversalReward, RondoError<S>>{
        let seat = self.seat_of(agent)?;
        Ok(self.lifecycle.reward(seat).cloned().unwrap_or_default())
    }

    pub fn cumulative_reward(&self, agent: &S::AgentId) -> Result<S::UniversalReward, RondoError<S>>{
        let seat = self.seat_of(agent)?;
        Ok(self.lifecycle.cumulative(seat).cloned().unwrap_or_default())
    }

    pub fn is_terminated(&self, agent: &S::AgentId) -> Result<bool, RondoError<S>>{
        Ok(self.lifecycle.is_terminated(self.seat_of(agent)?))
    }

    pub fn is_truncated(&self, agent: &S::AgentId) -> Result<bool, RondoError<S>>{
        Ok(self.lifecycle.is_truncated(self.seat_of(agent)?))
    }

    pub fn info(&self, agent: &S::AgentId) -> Result<&AgentInfo, RondoError<S>>{
        let seat = self.seat_of(agent)?;
        self.lifecycle.info(seat)
            .ok_or_else(|| InvariantError::SeatOutOfRange{seat, agents: self.possible_agents.len()}.into())
    }

    pub fn set_info(&mut self, agent: &S::AgentId, key: impl Into<String>, value: impl Into<String>) -> Result<(), RondoError<S>>{
        let seat = self.seat_of(agent)?;
        let agents = self.possible_agents.len();
        self.lifecycle.info_mut(seat)
            .ok_or(InvariantError::SeatOutOfRange{seat, agents})?
            .insert(key.into(), value.into());
        Ok(())
    }

    pub fn round_count(&self) -> u32{
        self.lifecycle.round_count()
    }

    /// Last closed round, `None` before the first round closes.
    pub fn last_joint_action(&self) -> Option<&JointAction<S::ActionType>>{
        self.last_joint.as_ref()
    }

    pub fn lifecycle(&self) -> &EpisodeLifecycle<S::UniversalReward>{
        &self.lifecycle
    }

    pub fn config(&self) -> &EpisodeConfig{
        &self.config
    }

    pub fn game(&self) -> &G{
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G{
        &mut self.game
    }

    /// Every agent is terminated or truncated (some may still wait for flush).
    pub fn is_finished(&self) -> bool{
        self.initialized && self.lifecycle.all_done()
    }

    pub fn is_drained(&self) -> bool{
        self.initialized && self.lifecycle.is_drained()
    }

    /// Snapshot for renderer, according to configured render mode.
    pub fn render(&self) -> Result<Rendered, RondoError<S>>{
        if self.closed{
            return Err(RenderError::Closed.into());
        }
        self.ensure_initialized()?;
        let context = RenderContext{
            agents: &self.possible_agents,
            pending: self.round.slots(),
            last_joint: self.last_joint.as_ref(),
            round_count: self.lifecycle.round_count(),
            max_rounds: self.config.max_rounds,
            finished: self.lifecycle.all_done(),
        };
        match self.config.render_mode{
            RenderMode::None => {
                #[cfg(feature = "log_warn")]
                log::warn!("Render called without render mode set");
                Ok(Rendered::Nothing)
            },
            RenderMode::Text => Ok(Rendered::Text(self.game.render_text(&context)?)),
            RenderMode::PixelBuffer => Ok(Rendered::Pixels(self.game.render_pixels(&context)?)),
        }
    }

    /// Releases render resources. Calling it more than once does nothing.
    pub fn close(&mut self){
        if !self.closed{
            self.game.close();
            self.closed = true;
        }
    }

    /// Iterator over agents to act, ends when episode is drained or after `max_iter` items.
    pub fn agent_iter(&mut self, max_iter: usize) -> AgentIter<'_, S, G>{
        AgentIter::new(self, max_iter)
    }
}
