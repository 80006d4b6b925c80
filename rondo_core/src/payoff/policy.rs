use std::collections::HashMap;
use std::marker::PhantomData;
use std::ops::Neg;
use crate::domain::{Action, ActionDomain, Reward};
use crate::error::{ConfigError, InvariantError};
use crate::payoff::PayoffSignal;

/// Result of reward policy for one agent: individual reward and optional shared
/// (global) delta that is applied to common resources instead of agent's score.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundReward<R>{
    pub reward: R,
    pub global: Option<f64>,
}

impl<R> RoundReward<R>{
    pub fn scalar(reward: R) -> Self{
        Self{reward, global: None}
    }
    pub fn with_global(reward: R, global: f64) -> Self{
        Self{reward, global: Some(global)}
    }
}

/// Everything reward policy may know about the round, besides the payoff signal.
#[derive(Debug, Clone, Copy)]
pub struct RewardContext<'a, A: Action>{
    /// Position of evaluated agent in turn order.
    pub seat: usize,
    /// Complete joint action of the round, indexed by turn position.
    pub joint: &'a [A],
    pub domain: &'a ActionDomain<A>,
    pub max_rounds: u32,
}

impl<'a, A: Action> RewardContext<'a, A>{
    pub fn new(seat: usize, joint: &'a [A], domain: &'a ActionDomain<A>, max_rounds: u32) -> Self{
        Self{seat, joint, domain, max_rounds}
    }

    pub fn own_action(&self) -> Option<&'a A>{
        self.joint.get(self.seat)
    }

    pub fn agent_count(&self) -> usize{
        self.joint.len()
    }
}

/// Pluggable strategy reducing payoff signal of a round to reward of a single agent.
///
/// Implementations must be pure: the same signal and context give the same reward.
/// Error is returned only for broken construction (e.g. matrix without entry for observed pair).
pub trait RewardPolicy<A: Action>: Send + Sync{
    type Reward: Reward;

    fn compute(&self, signal: &PayoffSignal<A>, context: &RewardContext<'_, A>)
        -> Result<RoundReward<Self::Reward>, InvariantError>;
}

impl<A: Action, P: RewardPolicy<A> + ?Sized> RewardPolicy<A> for Box<P>{
    type Reward = P::Reward;

    fn compute(&self, signal: &PayoffSignal<A>, context: &RewardContext<'_, A>) -> Result<RoundReward<Self::Reward>, InvariantError> {
        self.as_ref().compute(signal, context)
    }
}

/// Every agent gets the mean of counts of distinct actions present in the round,
/// regardless of own choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlindAverage;

impl<A: Action> RewardPolicy<A> for BlindAverage{
    type Reward = f64;

    fn compute(&self, signal: &PayoffSignal<A>, _context: &RewardContext<'_, A>) -> Result<RoundReward<f64>, InvariantError> {
        if signal.distinct() == 0{
            return Ok(RoundReward::scalar(0.0));
        }
        Ok(RoundReward::scalar(signal.total() as f64 / signal.distinct() as f64))
    }
}

/// Agents that chose the top ranked action get its count, the rest get nothing.
/// Ties are resolved by the order of [`PayoffSignal`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlindMaxVoter;

impl<A: Action> RewardPolicy<A> for BlindMaxVoter{
    type Reward = f64;

    fn compute(&self, signal: &PayoffSignal<A>, context: &RewardContext<'_, A>) -> Result<RoundReward<f64>, InvariantError> {
        match (signal.top(), context.own_action()){
            (Some((top, count)), Some(own)) if top == own => Ok(RoundReward::scalar(*count as f64)),
            _ => Ok(RoundReward::scalar(0.0))
        }
    }
}

/// Commons policy. Reward is number of cooperating agents divided by size of action domain.
/// If anyone defected, the round also produces negative global delta
/// `-reward / (max_rounds * agent_count)`, otherwise global delta is zero.
#[derive(Debug, Clone)]
pub struct CostAndAverage<A: Action>{
    pub cooperate: A,
    pub defect: A,
}

impl<A: Action> CostAndAverage<A>{
    pub fn new(cooperate: A, defect: A) -> Self{
        Self{cooperate, defect}
    }
}

impl<A: Action> RewardPolicy<A> for CostAndAverage<A>{
    type Reward = f64;

    fn compute(&self, signal: &PayoffSignal<A>, context: &RewardContext<'_, A>) -> Result<RoundReward<f64>, InvariantError> {
        let reward = signal.count_of(&self.cooperate) as f64 / context.domain.len() as f64;
        let global = if signal.count_of(&self.defect) > 0{
            -reward / (context.max_rounds as f64 * context.agent_count() as f64)
        } else {
            0.0
        };
        Ok(RoundReward::with_global(reward, global))
    }
}

/// Reward table for two agents keyed by ordered pair of their actions.
/// Value is `(reward of first agent, reward of second agent)`.
#[derive(Debug, Clone)]
pub struct PairwiseMatrix<A: Action, R: Reward>{
    map: HashMap<(A, A), (R, R)>
}

impl<A: Action, R: Reward> PairwiseMatrix<A, R>{

    /// Builds matrix from explicit pairs of rewards.
    pub fn from_pairs<I: IntoIterator<Item = ((A, A), (R, R))>>(entries: I) -> Self{
        Self{map: entries.into_iter().collect()}
    }

    /// Builds zero sum matrix: entry gives reward of first agent, second agent gets its negation.
    pub fn zero_sum<I: IntoIterator<Item = ((A, A), R)>>(entries: I) -> Self
    where R: Neg<Output = R>{
        Self{map: entries.into_iter()
            .map(|(k, r)| (k, (r.clone(), -r)))
            .collect()}
    }

    /// Checks that every ordered pair from domain has an entry.
    pub fn ensure_total(&self, domain: &ActionDomain<A>) -> Result<(), ConfigError>{
        for a in domain{
            for b in domain{
                if !self.map.contains_key(&(a.clone(), b.clone())){
                    return Err(ConfigError::IncompleteMatrix(format!("({a}, {b})")));
                }
            }
        }
        Ok(())
    }

    pub fn rewards(&self, first: &A, second: &A) -> Result<(R, R), InvariantError>{
        self.map.get(&(first.clone(), second.clone()))
            .cloned()
            .ok_or_else(|| InvariantError::PayoffMiss{joint: format!("[{first}, {second}]")})
    }
}

impl<A: Action, R: Reward> RewardPolicy<A> for PairwiseMatrix<A, R>{
    type Reward = R;

    fn compute(&self, _signal: &PayoffSignal<A>, context: &RewardContext<'_, A>) -> Result<RoundReward<R>, InvariantError> {
        match context.joint{
            [first, second] => {
                let (r0, r1) = self.rewards(first, second)?;
                match context.seat{
                    0 => Ok(RoundReward::scalar(r0)),
                    1 => Ok(RoundReward::scalar(r1)),
                    seat => Err(InvariantError::SeatOutOfRange{seat, agents: 2})
                }
            },
            other => Err(InvariantError::PayoffMiss{joint: format!("{other:?}")})
        }
    }
}

/// Adapter for caller supplied pure functions.
pub struct FnRewardPolicy<A, R, F>
where F: Fn(&PayoffSignal<A>, &RewardContext<'_, A>) -> RoundReward<R>,
    A: Action{
    function: F,
    _types: PhantomData<fn() -> (A, R)>,
}

impl<A: Action, R: Reward, F> FnRewardPolicy<A, R, F>
where F: Fn(&PayoffSignal<A>, &RewardContext<'_, A>) -> RoundReward<R> + Send + Sync{
    pub fn new(function: F) -> Self{
        Self{function, _types: PhantomData}
    }
}

impl<A: Action, R: Reward, F> RewardPolicy<A> for FnRewardPolicy<A, R, F>
where F: Fn(&PayoffSignal<A>, &RewardContext<'_, A>) -> RoundReward<R> + Send + Sync{
    type Reward = R;

    fn compute(&self, signal: &PayoffSignal<A>, context: &RewardContext<'_, A>) -> Result<RoundReward<R>, InvariantError> {
        Ok((self.function)(signal, context))
    }
}

#[cfg(test)]
mod tests{
    use crate::domain::ActionDomain;
    use crate::error::ConfigError;
    use crate::payoff::*;

    fn rewards_for_all<P: RewardPolicy<u8>>(policy: &P, joint: &[u8], domain: &ActionDomain<u8>, max_rounds: u32) -> Vec<RoundReward<P::Reward>>{
        let table = PayoffTable::build(domain.clone(), joint.len()).unwrap();
        let signal = table.lookup(joint).unwrap();
        (0..joint.len()).map(|seat|{
            policy.compute(signal, &RewardContext::new(seat, joint, domain, max_rounds)).unwrap()
        }).collect()
    }

    #[test]
    fn max_voter_rewards_majority_only(){
        let domain = ActionDomain::new(vec![0u8, 1]).unwrap();
        let joint = [0u8, 1, 0, 1, 0];
        let rewards: Vec<f64> = rewards_for_all(&BlindMaxVoter, &joint, &domain, 10)
            .into_iter().map(|r| r.reward).collect();
        assert_eq!(rewards, vec![3.0, 0.0, 3.0, 0.0, 3.0]);
    }

    #[test]
    fn max_voter_tie_goes_to_first_seen(){
        let domain = ActionDomain::new(vec![0u8, 1]).unwrap();
        let rewards: Vec<f64> = rewards_for_all(&BlindMaxVoter, &[1, 0, 0, 1], &domain, 10)
            .into_iter().map(|r| r.reward).collect();
        assert_eq!(rewards, vec![2.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn blind_average_ignores_own_action(){
        let domain = ActionDomain::new(vec![0u8, 1, 2]).unwrap();
        let rewards = rewards_for_all(&BlindAverage, &[0, 0, 0, 1], &domain, 10);
        assert!(rewards.iter().all(|r| r.reward == 2.0 && r.global.is_none()));
    }

    #[test]
    fn cost_and_average_charges_only_with_defection(){
        // 0 - cooperate, 1 - defect, 2 - abstain
        let domain = ActionDomain::new(vec![0u8, 1, 2]).unwrap();
        let policy = CostAndAverage::new(0u8, 1u8);
        let joint = [0u8, 0, 0, 0, 0, 0, 1, 2, 2, 2];
        let rewards = rewards_for_all(&policy, &joint, &domain, 10);
        for r in &rewards{
            assert_eq!(r.reward, 2.0);
            assert_eq!(r.global, Some(-2.0 / 100.0));
        }
        let peaceful = rewards_for_all(&policy, &[0u8, 0, 2], &domain, 10);
        assert!(peaceful.iter().all(|r| r.global == Some(0.0) && (r.reward - 2.0 / 3.0).abs() < 1e-12));
    }

    #[test]
    fn zero_sum_matrix_negates(){
        let domain = ActionDomain::new(vec![0u8, 1]).unwrap();
        let m = PairwiseMatrix::zero_sum([((0u8, 0u8), 0i64), ((0, 1), -1), ((1, 0), 1), ((1, 1), 0)]);
        assert_eq!(m.rewards(&1, &0).unwrap(), (1, -1));
        let rewards: Vec<i64> = rewards_for_all(&m, &[0, 1], &domain, 1)
            .into_iter().map(|r| r.reward).collect();
        assert_eq!(rewards, vec![-1, 1]);
        assert!(m.ensure_total(&domain).is_ok());
        let partial = PairwiseMatrix::zero_sum([((0u8, 0u8), 0i64)]);
        assert_eq!(partial.ensure_total(&domain), Err(ConfigError::IncompleteMatrix("(0, 1)".into())));
    }

    #[test]
    fn custom_function_policy(){
        let domain = ActionDomain::new(vec![0u8, 1]).unwrap();
        let policy = FnRewardPolicy::new(|s: &PayoffSignal<u8>, c: &RewardContext<'_, u8>|{
            RoundReward::scalar((s.count_of(&1) * c.seat) as i64)
        });
        let rewards: Vec<i64> = rewards_for_all(&policy, &[1, 1, 0], &domain, 1)
            .into_iter().map(|r| r.reward).collect();
        assert_eq!(rewards, vec![0, 2, 4]);
    }
}
