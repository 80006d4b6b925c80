use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;
use crate::error::ConfigError;

/// This trait does not anything particular, however it marks type that it
/// can be used as action between [_environment_](crate::env) and [_agent_](crate::agent).
/// Actions are hashable because joint actions are keys of [`PayoffTable`](crate::payoff::PayoffTable).
pub trait Action: Debug + Send + Sync + Clone + Display + PartialEq + Eq + Hash + 'static{}

/// Finite, ordered and non-empty set of actions available to agents.
///
/// Order matters: it is the enumeration order used when building
/// [`PayoffTable`](crate::payoff::PayoffTable) and the order in which actions are sampled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDomain<A: Action>{
    actions: Vec<A>,
}

impl<A: Action> ActionDomain<A>{

    /// Creates domain from actions in given order.
    /// Fails when list is empty or when some action is listed twice.
    pub fn new(actions: Vec<A>) -> Result<Self, ConfigError>{
        if actions.is_empty(){
            return Err(ConfigError::EmptyActionDomain);
        }
        for (i, a) in actions.iter().enumerate(){
            if actions[..i].contains(a){
                return Err(ConfigError::DuplicatedAction(format!("{a}")));
            }
        }
        Ok(Self{actions})
    }

    pub fn len(&self) -> usize{
        self.actions.len()
    }

    /// Always `false` for constructed domain, present for completeness.
    pub fn is_empty(&self) -> bool{
        self.actions.is_empty()
    }

    pub fn contains(&self, action: &A) -> bool{
        self.actions.contains(action)
    }

    /// Position of action in domain enumeration.
    pub fn index_of(&self, action: &A) -> Option<usize>{
        self.actions.iter().position(|a| a == action)
    }

    pub fn get(&self, index: usize) -> Option<&A>{
        self.actions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, A>{
        self.actions.iter()
    }

    pub fn as_slice(&self) -> &[A]{
        &self.actions
    }
}

impl<'a, A: Action> IntoIterator for &'a ActionDomain<A>{
    type Item = &'a A;
    type IntoIter = std::slice::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

impl<A: Action> Display for ActionDomain<A>{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, a) in self.actions.iter().enumerate(){
            if i > 0{
                write!(f, ", ")?;
            }
            write!(f, "{a}")?;
        }
        write!(f, "}}")
    }
}

macro_rules! impl_action_std {
    ($($x: ty), +) => {
        $(
          impl Action for $x{}
        )*
    }
}

impl_action_std!(u8, u16, u32, u64, i8, i16, i32, i64, char);
