use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Name of a seat at the table. Ids are compared, hashed, printed and moved between threads,
/// so any small value type satisfying these bounds will do.
pub trait AgentIdentifier: Debug + Display + Clone + Hash + Eq + Send + Sync + 'static {}

macro_rules! agent_id_for {
    ($($t:ty),+ $(,)?) => { $(impl AgentIdentifier for $t {})+ };
}

agent_id_for!(u8, u16, u32, u64, u128, usize);

/// Numeric agent identifier, the position in turn order is usually the same number.
pub type AgentNum = u32;
