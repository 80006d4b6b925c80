use std::fmt::{Display, Formatter};
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use rondo_core::config::EpisodeConfig;
use rondo_core::domain::{Action, ActionDomain, Scheme};
use rondo_core::env::{RenderMode, TurnBasedEnvironment};
use rondo_core::error::{ConfigError, RondoError};
use rondo_core::payoff::PairwiseMatrix;
use crate::domain::{ClassicGameError, TwoPlayersStdName};
use crate::pairwise::PairGame;

/// Default number of rounds of rock-paper-scissors episode.
pub const RPS_DEFAULT_ROUNDS: u32 = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enum, Serialize, Deserialize, speedy::Writable, speedy::Readable)]
pub enum RpsAction{
    Rock,
    Paper,
    Scissors,
}

impl RpsAction{
    pub const ALL: [RpsAction; 3] = [RpsAction::Rock, RpsAction::Paper, RpsAction::Scissors];

    pub fn beats(&self, other: &RpsAction) -> bool{
        matches!((self, other),
            (RpsAction::Rock, RpsAction::Scissors)
            | (RpsAction::Paper, RpsAction::Rock)
            | (RpsAction::Scissors, RpsAction::Paper))
    }

    /// Action that beats this one.
    pub fn counter(&self) -> RpsAction{
        match self{
            RpsAction::Rock => RpsAction::Paper,
            RpsAction::Paper => RpsAction::Scissors,
            RpsAction::Scissors => RpsAction::Rock,
        }
    }
}

impl Display for RpsAction{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self{
            RpsAction::Rock => write!(f, "ROCK"),
            RpsAction::Paper => write!(f, "PAPER"),
            RpsAction::Scissors => write!(f, "SCISSORS"),
        }
    }
}

impl Action for RpsAction{}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpsScheme;

impl Scheme for RpsScheme{
    type ActionType = RpsAction;
    type GameErrorType = ClassicGameError;
    type AgentId = TwoPlayersStdName;
    type UniversalReward = i64;
}

pub type RpsGame = PairGame<RpsScheme, PairwiseMatrix<RpsAction, i64>>;
pub type RpsEnvironment = TurnBasedEnvironment<RpsScheme, RpsGame>;

/// Zero sum matrix: winner gets `1`, loser `-1`, tie gives `0` to both.
pub fn rps_matrix() -> PairwiseMatrix<RpsAction, i64>{
    PairwiseMatrix::zero_sum(RpsAction::ALL.iter().flat_map(|a|{
        RpsAction::ALL.iter().map(move |b|{
            let reward = if a.beats(b) { 1 } else if b.beats(a) { -1 } else { 0 };
            ((*a, *b), reward)
        })
    }))
}

pub fn rps_game() -> Result<RpsGame, ConfigError>{
    let domain = ActionDomain::new(RpsAction::ALL.to_vec())?;
    let matrix = rps_matrix();
    matrix.ensure_total(&domain)?;
    Ok(PairGame::new("rock-paper-scissors", domain, matrix))
}

/// Environment of Alice and Bob playing `max_rounds` rounds.
pub fn rps_environment(max_rounds: u32, render_mode: RenderMode) -> Result<RpsEnvironment, RondoError<RpsScheme>>{
    TurnBasedEnvironment::new(
        rps_game()?,
        vec![TwoPlayersStdName::Alice, TwoPlayersStdName::Bob],
        EpisodeConfig::new(2, max_rounds).with_render_mode(render_mode))
}

#[cfg(test)]
mod tests{
    use proptest::prelude::*;
    use rondo_core::env::{Rendered, RenderMode, ScoreEnvironment};
    use crate::domain::TwoPlayersStdName::{Alice, Bob};
    use crate::rps::{rps_environment, RpsAction, RPS_DEFAULT_ROUNDS};
    use crate::rps::RpsAction::{Paper, Rock, Scissors};

    #[test]
    fn rock_beats_scissors(){
        let mut env = rps_environment(RPS_DEFAULT_ROUNDS, RenderMode::None).unwrap();
        env.reset(Some(42)).unwrap();
        env.step(Some(Rock)).unwrap();
        assert_eq!(env.reward(&Alice).unwrap(), 0);
        env.step(Some(Scissors)).unwrap();
        assert_eq!(env.reward(&Alice).unwrap(), 1);
        assert_eq!(env.reward(&Bob).unwrap(), -1);
        assert_eq!(env.observe(&Alice).unwrap(), Some(Scissors));
        assert_eq!(env.observe(&Bob).unwrap(), Some(Rock));
    }

    #[test]
    fn both_truncated_on_last_round(){
        let mut env = rps_environment(RPS_DEFAULT_ROUNDS, RenderMode::None).unwrap();
        env.reset(Some(1)).unwrap();
        for round in 1..=RPS_DEFAULT_ROUNDS{
            let a = env.sample_action(&Alice).unwrap();
            env.step(Some(a)).unwrap();
            assert!(!env.is_truncated(&Alice).unwrap() && !env.is_truncated(&Bob).unwrap());
            let b = env.sample_action(&Bob).unwrap();
            env.step(Some(b)).unwrap();
            let truncated = round == RPS_DEFAULT_ROUNDS;
            assert_eq!(env.is_truncated(&Alice).unwrap(), truncated);
            assert_eq!(env.is_truncated(&Bob).unwrap(), truncated);
        }
        env.step(None).unwrap();
        env.step(None).unwrap();
        assert!(env.is_drained());
    }

    #[test]
    fn matrix_is_zero_sum(){
        let m = crate::rps::rps_matrix();
        for a in RpsAction::ALL{
            for b in RpsAction::ALL{
                let (x, y) = m.rewards(&a, &b).unwrap();
                assert_eq!(x + y, 0);
            }
        }
        assert_eq!(m.rewards(&Paper, &Rock).unwrap(), (1, -1));
    }

    #[test]
    fn renders_current_state(){
        let mut env = rps_environment(1, RenderMode::Text).unwrap();
        env.reset(Some(3)).unwrap();
        assert_eq!(env.render().unwrap(), Rendered::Text("Current state: Alice: None , Bob: None".into()));
        env.step(Some(Paper)).unwrap();
        assert_eq!(env.render().unwrap(), Rendered::Text("Current state: Alice: PAPER , Bob: None".into()));
        env.step(Some(Rock)).unwrap();
        assert_eq!(env.render().unwrap(), Rendered::Text("Game over".into()));
    }

    #[test]
    fn observation_is_none_before_first_round(){
        let mut env = rps_environment(5, RenderMode::None).unwrap();
        let out = env.reset(None).unwrap();
        assert!(out.observations.iter().all(|(_, o)| o.is_none()));
        env.step(Some(Rock)).unwrap();
        assert_eq!(env.observe(&Bob).unwrap(), None);
    }

    fn action() -> impl Strategy<Value = RpsAction>{
        prop_oneof![Just(Rock), Just(Paper), Just(Scissors)]
    }

    proptest!{
        #[test]
        fn scores_cancel_out(moves in proptest::collection::vec((action(), action()), 1..30)){
            let mut env = rps_environment(moves.len() as u32, RenderMode::None).unwrap();
            env.reset(Some(0)).unwrap();
            for (a, b) in moves{
                env.step(Some(a)).unwrap();
                env.step(Some(b)).unwrap();
                prop_assert_eq!(env.reward(&Alice).unwrap() + env.reward(&Bob).unwrap(), 0);
            }
            prop_assert_eq!(env.actual_score_of_player(&Alice) + env.actual_score_of_player(&Bob), 0);
            prop_assert!(env.is_truncated(&Alice).unwrap() && env.is_truncated(&Bob).unwrap());
        }
    }
}
