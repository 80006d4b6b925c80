use std::fmt::{Display, Formatter};
use enum_map::{enum_map, Enum, EnumMap};
use serde::{Deserialize, Serialize};
use rondo_core::config::EpisodeConfig;
use rondo_core::domain::{Action, ActionDomain, Reward, Scheme};
use rondo_core::env::{RenderMode, TurnBasedEnvironment};
use rondo_core::error::{ConfigError, InvariantError, RondoError};
use rondo_core::payoff::{PayoffSignal, RewardContext, RewardPolicy, RoundReward};
use crate::domain::{ClassicGameError, TwoPlayersStdName};
use crate::pairwise::PairGame;

pub const PRISONERS_DEFAULT_ROUNDS: u32 = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enum, Serialize, Deserialize, speedy::Writable, speedy::Readable)]
pub enum PdAction{
    Cooperate,
    Defect,
}

impl PdAction{
    pub const ALL: [PdAction; 2] = [PdAction::Cooperate, PdAction::Defect];
}

impl Display for PdAction{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Action for PdAction{}

/// Reward table of symmetric two player game.
/// Reward depends only on own action and action of the other player, not on the side.
/// ```norust
///  -----------------------------
/// |           | Cooperate | Defect |
/// |-----------------------------
/// | Cooperate |    C_C    |  C_D   |
/// | Defect    |    D_C    |  D_D   |
///  -----------------------------
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SymmetricRewardTable<R: Reward + Copy>{
    pub map: EnumMap<PdAction, EnumMap<PdAction, R>>
}

impl<R: Reward + Copy> SymmetricRewardTable<R>{

    pub fn new(coop_when_coop: R, coop_when_defect: R, defect_when_coop: R, defect_when_defect: R) -> Self{
        Self{
            map: enum_map! {
                PdAction::Cooperate => enum_map! {
                    PdAction::Cooperate => coop_when_coop,
                    PdAction::Defect => coop_when_defect,
                },
                PdAction::Defect => enum_map! {
                    PdAction::Cooperate => defect_when_coop,
                    PdAction::Defect => defect_when_defect,
                }
            }
        }
    }

    /// Reward of player taking `action` against `other_action`.
    pub fn reward(&self, action: PdAction, other_action: PdAction) -> R{
        self.map[action][other_action]
    }

    /// Dilemma holds when temptation > reward > punishment > sucker's payoff.
    pub fn is_dilemma(&self) -> bool{
        let t = self.reward(PdAction::Defect, PdAction::Cooperate);
        let r = self.reward(PdAction::Cooperate, PdAction::Cooperate);
        let p = self.reward(PdAction::Defect, PdAction::Defect);
        let s = self.reward(PdAction::Cooperate, PdAction::Defect);
        t > r && r > p && p > s
    }
}

impl Default for SymmetricRewardTable<i64>{
    /// Common values: 3 for mutual cooperation, 1 for mutual defection,
    /// 5 for defecting against cooperator who gets 0.
    fn default() -> Self {
        Self::new(3, 0, 5, 1)
    }
}

impl<R: Reward + Copy> RewardPolicy<PdAction> for SymmetricRewardTable<R>{
    type Reward = R;

    fn compute(&self, _signal: &PayoffSignal<PdAction>, context: &RewardContext<'_, PdAction>) -> Result<RoundReward<R>, InvariantError> {
        match (context.seat, context.joint){
            (0, [own, other]) | (1, [other, own]) => Ok(RoundReward::scalar(self.reward(*own, *other))),
            (seat, [_, _]) => Err(InvariantError::SeatOutOfRange{seat, agents: 2}),
            (_, joint) => Err(InvariantError::PayoffMiss{joint: format!("{joint:?}")}),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrisonersScheme;

impl Scheme for PrisonersScheme{
    type ActionType = PdAction;
    type GameErrorType = ClassicGameError;
    type AgentId = TwoPlayersStdName;
    type UniversalReward = i64;
}

pub type PrisonersGame = PairGame<PrisonersScheme, SymmetricRewardTable<i64>>;
pub type PrisonersEnvironment = TurnBasedEnvironment<PrisonersScheme, PrisonersGame>;

pub fn prisoners_game(table: SymmetricRewardTable<i64>) -> Result<PrisonersGame, ConfigError>{
    if !table.is_dilemma(){
        log::warn!("Reward table {table:?} does not form a prisoners' dilemma");
    }
    Ok(PairGame::new("prisoners-dilemma", ActionDomain::new(PdAction::ALL.to_vec())?, table))
}

pub fn prisoners_environment(table: SymmetricRewardTable<i64>, max_rounds: u32, render_mode: RenderMode)
    -> Result<PrisonersEnvironment, RondoError<PrisonersScheme>>{
    TurnBasedEnvironment::new(
        prisoners_game(table)?,
        vec![TwoPlayersStdName::Alice, TwoPlayersStdName::Bob],
        EpisodeConfig::new(2, max_rounds).with_render_mode(render_mode))
}
