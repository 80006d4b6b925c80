use proptest::prelude::*;
use rand::rngs::StdRng;
use crate::config::EpisodeConfig;
use crate::domain::{ActionDomain, Scheme};
use crate::env::*;
use crate::error::{ActionError, ConfigError, InvariantError, ProtocolError, RenderError, RondoError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("counting game error")]
struct CountingError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CountingScheme;

impl Scheme for CountingScheme{
    type ActionType = u8;
    type GameErrorType = CountingError;
    type AgentId = u32;
    type UniversalReward = i64;
}

/// Every agent is rewarded with the sum of actions in the round.
/// Observation is number of scored rounds.
struct CountingGame{
    domain: ActionDomain<u8>,
    scored: u32,
    broken: bool,
}

impl CountingGame{
    fn new() -> Self{
        Self{domain: ActionDomain::new(vec![0, 1, 2]).unwrap(), scored: 0, broken: false}
    }
}

impl TurnBasedGame<CountingScheme> for CountingGame{
    type Observation = u32;

    fn action_domain(&self) -> &ActionDomain<u8> {
        &self.domain
    }

    fn reset_game(&mut self, _agent_count: usize, _rng: &mut StdRng) -> Result<(), RondoError<CountingScheme>> {
        self.scored = 0;
        Ok(())
    }

    fn score_round(&mut self, joint: &JointAction<u8>, _max_rounds: u32) -> Result<RoundScore<i64>, RondoError<CountingScheme>> {
        self.scored += 1;
        let sum: i64 = joint.present().map(|(_, a)| *a as i64).sum();
        let n = if self.broken { joint.len() + 1 } else { joint.len() };
        Ok(RoundScore::new(vec![sum; n]))
    }

    fn observe(&self, _seat: usize) -> u32 {
        self.scored
    }

    fn render_text(&self, context: &RenderContext<'_, CountingScheme>) -> Result<String, RenderError> {
        Ok(format!("round {}/{}", context.round_count, context.max_rounds))
    }
}

fn env(agents: u32, rounds: u32) -> TurnBasedEnvironment<CountingScheme, CountingGame>{
    let mut env = TurnBasedEnvironment::new(
        CountingGame::new(),
        (0..agents).collect(),
        EpisodeConfig::new(agents as usize, rounds)).unwrap();
    env.reset(Some(7)).unwrap();
    env
}

#[test]
fn step_before_reset_is_order_error(){
    let mut env = TurnBasedEnvironment::new(CountingGame::new(), vec![0, 1], EpisodeConfig::new(2, 3)).unwrap();
    assert!(matches!(env.step(Some(1)), Err(RondoError::Protocol{source: ProtocolError::NotInitialized})));
    assert!(matches!(env.observe(&0), Err(RondoError::Protocol{source: ProtocolError::NotInitialized})));
    assert_eq!(env.agent_selection(), None);
}

#[test]
fn construction_is_validated(){
    let e = TurnBasedEnvironment::new(CountingGame::new(), vec![0, 0], EpisodeConfig::new(2, 3));
    assert!(matches!(e, Err(RondoError::Config{source: ConfigError::DuplicatedAgent(_)})));
    let e = TurnBasedEnvironment::new(CountingGame::new(), vec![0, 1, 2], EpisodeConfig::new(2, 3));
    assert!(matches!(e, Err(RondoError::Config{source: ConfigError::AgentCountMismatch{expected: 2, got: 3}})));
    let e = TurnBasedEnvironment::new(CountingGame::new(), vec![0], EpisodeConfig::new(1, 0));
    assert!(matches!(e, Err(RondoError::Config{source: ConfigError::ZeroRounds})));
}

#[test]
fn reset_reports_everyone(){
    let mut env = env(3, 2);
    let out = env.reset(None).unwrap();
    assert_eq!(out.initial_actor, 0);
    assert_eq!(out.observations, vec![(0, 0), (1, 0), (2, 0)]);
    assert_eq!(out.infos.len(), 3);
}

#[test]
fn rewards_distributed_after_last_actor(){
    let mut env = env(3, 10);
    env.step(Some(1)).unwrap();
    env.step(Some(2)).unwrap();
    assert_eq!(env.game().scored, 0);
    assert_eq!(env.cumulative_reward(&2).unwrap(), 0);
    env.step(Some(2)).unwrap();
    assert_eq!(env.game().scored, 1);
    for agent in 0..3{
        assert_eq!(env.reward(&agent).unwrap(), 5);
        assert_eq!(env.cumulative_reward(&agent).unwrap(), 5);
    }
    assert_eq!(env.agent_selection(), Some(&0));
    let last = env.last().unwrap();
    assert_eq!(last.reward, 5);
    assert_eq!(last.observation, 1);
    // agent 0 reads its reward and acts, per round reward is cleared
    env.step(Some(0)).unwrap();
    assert_eq!(env.cumulative_reward(&0).unwrap(), 0);
    assert_eq!(env.cumulative_reward(&1).unwrap(), 5);
    assert_eq!(env.reward(&1).unwrap(), 0);
}

#[test]
fn rejects_bad_actions(){
    let mut env = env(2, 10);
    assert!(matches!(env.step(Some(9)),
        Err(RondoError::Action{source: ActionError::OutOfBounds{agent: 0, action: 9}})));
    assert!(matches!(env.step(None),
        Err(RondoError::Protocol{source: ProtocolError::MissingAction(0)})));
    assert_eq!(env.agent_selection(), Some(&0));
    assert!(matches!(env.process_action(&1, Some(0)),
        Err(RondoError::Protocol{source: ProtocolError::ViolatedOrder(1, 0)})));
}

#[test]
fn dead_agent_step_moves_on_without_touching_rewards(){
    let mut env = env(3, 10);
    for a in [1, 1, 1]{
        env.step(Some(a)).unwrap();
    }
    env.terminate(&1).unwrap();
    env.step(Some(2)).unwrap();
    assert_eq!(env.agent_selection(), Some(&1));
    let rewards: Vec<i64> = (0..3).map(|a| env.reward(&a).unwrap()).collect();
    let cumulative: Vec<i64> = (0..3).map(|a| env.cumulative_reward(&a).unwrap()).collect();

    assert!(matches!(env.step(Some(0)),
        Err(RondoError::Protocol{source: ProtocolError::InvalidAction(1)})));
    env.step(None).unwrap();
    assert_eq!(env.agent_selection(), Some(&2));
    assert_eq!((0..3).map(|a| env.reward(&a).unwrap()).collect::<Vec<_>>(), rewards);
    assert_eq!((0..3).map(|a| env.cumulative_reward(&a).unwrap()).collect::<Vec<_>>(), cumulative);
    assert_eq!(env.agents(), vec![0, 2]);

    // round closes without the dead agent
    env.step(Some(1)).unwrap();
    assert_eq!(env.game().scored, 2);
    assert_eq!(env.last_joint_action().unwrap().slots(), &[Some(2), None, Some(1)]);
}

#[test]
fn flushed_agent_hands_turn_to_next_live_agent(){
    let mut env = env(4, 10);
    for _ in 0..4{
        env.step(Some(1)).unwrap();
    }
    env.terminate(&1).unwrap();
    env.terminate(&2).unwrap();
    env.step(Some(1)).unwrap();
    assert_eq!(env.agent_selection(), Some(&1));
    env.step(None).unwrap();
    // agent 2 is dead too, but agent 3 still has to act this round
    assert_eq!(env.agent_selection(), Some(&3));
    assert_eq!(env.agents(), vec![0, 2, 3]);

    env.step(Some(2)).unwrap();
    assert_eq!(env.game().scored, 2);
    assert_eq!(env.last_joint_action().unwrap().slots(), &[Some(1), None, None, Some(2)]);
    assert_eq!(env.agent_selection(), Some(&0));

    env.step(Some(1)).unwrap();
    assert_eq!(env.agent_selection(), Some(&2));
    env.step(None).unwrap();
    assert_eq!(env.agent_selection(), Some(&3));
    assert_eq!(env.agents(), vec![0, 3]);
}

#[test]
fn terminating_last_missing_agent_closes_round(){
    let mut env = env(2, 10);
    env.step(Some(2)).unwrap();
    env.terminate(&1).unwrap();
    assert_eq!(env.game().scored, 1);
    assert_eq!(env.cumulative_reward(&0).unwrap(), 2);
}

#[test]
fn truncation_and_drain(){
    let mut env = env(2, 3);
    for _ in 0..5{
        env.step(Some(1)).unwrap();
        assert!(!env.is_truncated(&0).unwrap());
    }
    env.step(Some(1)).unwrap();
    assert!(env.is_truncated(&0).unwrap() && env.is_truncated(&1).unwrap());
    assert_eq!(env.round_count(), 3);
    assert!(env.is_finished());
    assert_eq!(env.agent_selection(), Some(&0));
    assert!(env.last().unwrap().truncated);
    env.step(None).unwrap();
    env.step(None).unwrap();
    assert!(env.is_drained());
    assert_eq!(env.agent_selection(), None);
    assert!(matches!(env.step(None), Err(RondoError::Protocol{source: ProtocolError::EpisodeDrained})));
    assert_eq!(env.actual_score_of_player(&1), 6);
}

#[test]
fn agent_iter_drives_whole_episode(){
    let mut env = env(3, 4);
    let mut seen = Vec::new();
    let mut agents = env.agent_iter(1000);
    while let Some(agent) = agents.next(){
        seen.push(agent);
        let env = agents.env();
        let last = env.last().unwrap();
        let action = if last.terminated || last.truncated { None } else { Some(env.sample_action(&agent).unwrap()) };
        env.step(action).unwrap();
    }
    assert_eq!(seen.len(), 3 * 4 + 3);
    assert_eq!(agents.next(), None);
    assert!(env.is_drained());
}

#[test]
fn agent_iter_respects_limit(){
    let mut env = env(2, 100);
    let mut agents = env.agent_iter(3);
    let mut count = 0;
    while let Some(_) = agents.next(){
        count += 1;
        agents.env().step(Some(0)).unwrap();
    }
    assert_eq!(count, 3);
}

#[test]
fn invariant_error_poisons_until_reset(){
    let mut env = env(2, 10);
    env.step(Some(0)).unwrap();
    env.game_mut().broken = true;
    let err = env.step(Some(0)).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(env.step(Some(0)), Err(RondoError::Invariant{source: InvariantError::RewardCountMismatch{..}})));
    env.game_mut().broken = false;
    env.reset(Some(1)).unwrap();
    env.step(Some(0)).unwrap();
}

#[test]
fn render_modes(){
    let env = env(2, 10);
    assert_eq!(env.render().unwrap(), Rendered::Nothing);
    let mut env = TurnBasedEnvironment::new(CountingGame::new(), vec![0, 1],
        EpisodeConfig::new(2, 10).with_render_mode(RenderMode::PixelBuffer)).unwrap();
    env.reset(Some(3)).unwrap();
    assert!(matches!(env.render(), Err(RondoError::Render{source: RenderError::Unsupported{..}})));
    env.step(Some(1)).unwrap();

    let mut env = TurnBasedEnvironment::new(CountingGame::new(), vec![0, 1],
        EpisodeConfig::new(2, 10).with_render_mode(RenderMode::Text)).unwrap();
    env.reset(Some(3)).unwrap();
    env.step(Some(1)).unwrap();
    env.step(Some(1)).unwrap();
    assert_eq!(env.render().unwrap(), Rendered::Text("round 1/10".into()));
    env.close();
    env.close();
    assert!(matches!(env.render(), Err(RondoError::Render{source: RenderError::Closed})));
    env.step(Some(1)).unwrap();
}

#[test]
fn seeded_sampling_is_reproducible(){
    let mut a = env(2, 10);
    let mut b = env(2, 10);
    let xs: Vec<u8> = (0..20).map(|_| a.sample_action(&0).unwrap()).collect();
    let ys: Vec<u8> = (0..20).map(|_| b.sample_action(&0).unwrap()).collect();
    assert_eq!(xs, ys);
    assert!(matches!(a.sample_action(&5), Err(RondoError::Protocol{source: ProtocolError::UnknownAgent(5)})));
}

#[test]
fn reseed_restarts_episode(){
    let mut env = env(2, 10);
    env.step(Some(2)).unwrap();
    assert_eq!(env.current_player(), Some(1));
    env.reseed(21).unwrap();
    assert_eq!(env.current_player(), Some(0));
    assert_eq!(env.round_count(), 0);
    assert!(env.last_joint_action().is_none());
    env.process_action(&0, Some(1)).unwrap();
    assert_eq!(env.current_player(), Some(1));
}

#[test]
fn info_side_channel(){
    let mut env = env(2, 10);
    env.set_info(&1, "strategy", "random").unwrap();
    assert_eq!(env.info(&1).unwrap().get("strategy").map(String::as_str), Some("random"));
    assert!(env.info(&0).unwrap().is_empty());
}

proptest!{
    #[test]
    fn one_distribution_per_round(n in 1u32..6, actions in proptest::collection::vec(0u8..3, 1..40)){
        let mut env = env(n, 1000);
        for (i, a) in actions.iter().enumerate(){
            env.step(Some(*a)).unwrap();
            prop_assert_eq!(env.game().scored as usize, (i + 1) / n as usize);
        }
    }

    #[test]
    fn truncation_is_simultaneous(n in 1u32..5, rounds in 1u32..6){
        let mut env = env(n, rounds);
        for step in 0..(n * rounds){
            prop_assert!((0..n).all(|a| !env.is_truncated(&a).unwrap()), "early truncation at step {}", step);
            env.step(Some(0)).unwrap();
        }
        prop_assert!((0..n).all(|a| env.is_truncated(&a).unwrap()));
    }

    #[test]
    fn terminal_flags_are_sticky(kills in proptest::collection::vec(0u32..4, 0..4), steps in 1usize..60){
        let mut env = env(4, 5);
        let mut terminated = [false; 4];
        for k in kills{
            env.terminate(&k).unwrap();
            terminated[k as usize] = true;
        }
        for _ in 0..steps{
            if env.agent_selection().is_none(){
                break;
            }
            let last = env.last().unwrap();
            let action = if last.terminated || last.truncated { None } else { Some(1) };
            env.step(action).unwrap();
            for a in 0..4u32{
                terminated[a as usize] |= env.is_terminated(&a).unwrap();
                prop_assert_eq!(env.is_terminated(&a).unwrap(), terminated[a as usize]);
            }
        }
    }
}
