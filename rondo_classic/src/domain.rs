use std::fmt::{Display, Formatter};
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use rondo_core::agent::AgentIdentifier;

pub use rondo_core::agent::AgentNum;

/// Agent identifier for two player game (for more players it could be easier to use some numbers).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Enum, Serialize, Deserialize, speedy::Writable, speedy::Readable)]
pub enum TwoPlayersStdName {
    Alice,
    Bob,
}

impl TwoPlayersStdName{
    pub fn other(&self) -> Self{
        match self{
            TwoPlayersStdName::Alice => TwoPlayersStdName::Bob,
            TwoPlayersStdName::Bob => TwoPlayersStdName::Alice,
        }
    }
}

impl Display for TwoPlayersStdName{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl AgentIdentifier for TwoPlayersStdName{}

/// Error of classic game rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassicGameError{
    #[error("{game} is played by {expected} agents, environment has {got}")]
    WrongAgentCount{
        game: &'static str,
        expected: usize,
        got: usize,
    },
}
