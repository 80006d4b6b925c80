use std::collections::BTreeMap;
use crate::domain::Reward;
use crate::error::InvariantError;

/// Free form side channel of an agent.
pub type AgentInfo = BTreeMap<String, String>;

/// Per agent bookkeeping of an episode, indexed by turn position.
///
/// - `reward` holds reward of the last closed round and is cleared on every step that
///   does not close a round,
/// - `cumulative` accumulates `reward` on every live step for every agent that was not
///   flushed; it is zeroed for the acting agent at the start of its turn, as the
///   value was already read by that agent,
/// - `terminated` and `truncated` are sticky until [`reset`](EpisodeLifecycle::reset),
/// - `flushed` marks agents that received their final no-op step.
#[derive(Debug, Clone)]
pub struct EpisodeLifecycle<R: Reward>{
    rewards: Vec<R>,
    cumulative: Vec<R>,
    totals: Vec<R>,
    terminated: Vec<bool>,
    truncated: Vec<bool>,
    flushed: Vec<bool>,
    infos: Vec<AgentInfo>,
    round_count: u32,
    max_rounds: u32,
}

impl<R: Reward> EpisodeLifecycle<R>{
    pub fn new(agent_count: usize, max_rounds: u32) -> Self{
        Self{
            rewards: vec![R::neutral(); agent_count],
            cumulative: vec![R::neutral(); agent_count],
            totals: vec![R::neutral(); agent_count],
            terminated: vec![false; agent_count],
            truncated: vec![false; agent_count],
            flushed: vec![false; agent_count],
            infos: vec![AgentInfo::new(); agent_count],
            round_count: 0,
            max_rounds,
        }
    }

    pub fn reset(&mut self){
        *self = Self::new(self.agent_count(), self.max_rounds);
    }

    pub fn agent_count(&self) -> usize{
        self.rewards.len()
    }

    pub fn round_count(&self) -> u32{
        self.round_count
    }

    pub fn max_rounds(&self) -> u32{
        self.max_rounds
    }

    /// Starts processing turn of `seat`.
    pub fn begin_turn(&mut self, seat: usize){
        if let Some(c) = self.cumulative.get_mut(seat){
            *c = R::neutral();
        }
        if let Some(r) = self.rewards.get_mut(seat){
            *r = R::neutral();
        }
    }

    /// Assigns rewards of closed round.
    pub fn set_round_rewards(&mut self, rewards: Vec<R>) -> Result<(), InvariantError>{
        if rewards.len() != self.rewards.len(){
            return Err(InvariantError::RewardCountMismatch{
                expected: self.rewards.len(),
                got: rewards.len(),
            });
        }
        for (total, r) in self.totals.iter_mut().zip(rewards.iter()){
            *total += r;
        }
        self.rewards = rewards;
        Ok(())
    }

    pub fn clear_rewards(&mut self){
        self.rewards.iter_mut().for_each(|r| *r = R::neutral());
    }

    /// Adds current round rewards to cumulative rewards of every agent not yet flushed.
    pub fn accumulate(&mut self){
        for seat in 0..self.rewards.len(){
            if !self.flushed[seat]{
                self.cumulative[seat] += &self.rewards[seat];
            }
        }
    }

    /// Counts closed round. When round limit is reached every agent is truncated at once.
    /// Returns `true` if episode got truncated by this call.
    pub fn complete_round(&mut self) -> bool{
        self.round_count += 1;
        if self.round_count >= self.max_rounds{
            let newly = self.truncated.iter().any(|t| !t);
            self.truncated.iter_mut().for_each(|t| *t = true);
            newly
        } else {
            false
        }
    }

    pub fn terminate(&mut self, seat: usize){
        if let Some(t) = self.terminated.get_mut(seat){
            *t = true;
        }
    }

    pub fn flush(&mut self, seat: usize){
        if let Some(f) = self.flushed.get_mut(seat){
            *f = true;
        }
    }

    pub fn is_terminated(&self, seat: usize) -> bool{
        self.terminated.get(seat).copied().unwrap_or(false)
    }

    pub fn is_truncated(&self, seat: usize) -> bool{
        self.truncated.get(seat).copied().unwrap_or(false)
    }

    /// Agent is done when it is terminated or truncated.
    pub fn is_done(&self, seat: usize) -> bool{
        self.is_terminated(seat) || self.is_truncated(seat)
    }

    pub fn is_live(&self, seat: usize) -> bool{
        seat < self.agent_count() && !self.is_done(seat)
    }

    pub fn is_flushed(&self, seat: usize) -> bool{
        self.flushed.get(seat).copied().unwrap_or(false)
    }

    pub fn all_live(&self) -> bool{
        (0..self.agent_count()).all(|s| self.is_live(s))
    }

    pub fn all_done(&self) -> bool{
        (0..self.agent_count()).all(|s| self.is_done(s))
    }

    /// Every agent received its final step.
    pub fn is_drained(&self) -> bool{
        self.flushed.iter().all(|f| *f)
    }

    pub fn reward(&self, seat: usize) -> Option<&R>{
        self.rewards.get(seat)
    }

    pub fn cumulative(&self, seat: usize) -> Option<&R>{
        self.cumulative.get(seat)
    }

    /// Sum of all round rewards of agent in this episode.
    pub fn total(&self, seat: usize) -> Option<&R>{
        self.totals.get(seat)
    }

    pub fn info(&self, seat: usize) -> Option<&AgentInfo>{
        self.infos.get(seat)
    }

    pub fn info_mut(&mut self, seat: usize) -> Option<&mut AgentInfo>{
        self.infos.get_mut(seat)
    }
}
