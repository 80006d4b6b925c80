use std::fmt::{Display, Formatter};
use crate::domain::Action;
use crate::error::InvariantError;

/// Actions of one round indexed by turn position. Seat without action (agent died before
/// acting) holds `None`. Once produced by [`RoundState::close`] it is not modified.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointAction<A: Action>{
    slots: Vec<Option<A>>,
}

impl<A: Action> JointAction<A>{

    pub fn new(slots: Vec<Option<A>>) -> Self{
        Self{slots}
    }

    pub fn get(&self, seat: usize) -> Option<&A>{
        self.slots.get(seat).and_then(|a| a.as_ref())
    }

    pub fn len(&self) -> usize{
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool{
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Option<A>]{
        &self.slots
    }

    /// True when every seat has action.
    pub fn is_complete(&self) -> bool{
        self.slots.iter().all(Option::is_some)
    }

    /// Actions of every seat, fails if any seat is empty.
    pub fn actions(&self) -> Result<Vec<A>, InvariantError>{
        let missing = self.slots.iter().filter(|s| s.is_none()).count();
        if missing > 0{
            return Err(InvariantError::IncompleteJointAction{missing});
        }
        Ok(self.slots.iter().flatten().cloned().collect())
    }

    /// Actions replacing empty seats with `filler`.
    pub fn actions_or(&self, filler: &A) -> Vec<A>{
        self.slots.iter()
            .map(|s| s.as_ref().unwrap_or(filler).clone())
            .collect()
    }

    /// Seats that have action, with the action.
    pub fn present(&self) -> impl Iterator<Item = (usize, &A)>{
        self.slots.iter().enumerate()
            .filter_map(|(seat, a)| a.as_ref().map(|a| (seat, a)))
    }
}

impl<A: Action> Display for JointAction<A>{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, slot) in self.slots.iter().enumerate(){
            if i > 0{
                write!(f, ", ")?;
            }
            match slot{
                Some(a) => write!(f, "{a}")?,
                None => write!(f, "-")?,
            }
        }
        write!(f, "]")
    }
}

/// Buffer of actions submitted during current round.
///
/// Seats that did not act yet hold `None`, never an action from previous round.
#[derive(Debug, Clone)]
pub struct RoundState<A: Action>{
    slots: Vec<Option<A>>,
}

impl<A: Action> RoundState<A>{
    pub fn new(agent_count: usize) -> Self{
        Self{slots: vec![None; agent_count]}
    }

    pub fn record(&mut self, seat: usize, action: A) -> Result<(), InvariantError>{
        let agents = self.slots.len();
        let slot = self.slots.get_mut(seat)
            .ok_or(InvariantError::SeatOutOfRange{seat, agents})?;
        *slot = Some(action);
        Ok(())
    }

    pub fn slot(&self, seat: usize) -> Option<&A>{
        self.slots.get(seat).and_then(|a| a.as_ref())
    }

    pub fn slots(&self) -> &[Option<A>]{
        &self.slots
    }

    /// Number of seats that already acted this round.
    pub fn filled(&self) -> usize{
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when nobody acted this round.
    pub fn is_fresh(&self) -> bool{
        self.filled() == 0
    }

    /// Round is complete when at least one seat acted and every seat for which `live`
    /// holds has acted.
    pub fn is_complete<F: Fn(usize) -> bool>(&self, live: F) -> bool{
        !self.is_fresh() && self.slots.iter().enumerate()
            .all(|(seat, a)| a.is_some() || !live(seat))
    }

    /// Snapshot of current buffer.
    pub fn joint_action(&self) -> JointAction<A>{
        JointAction::new(self.slots.clone())
    }

    /// Resets every slot to sentinel, keeping the agent count.
    pub fn clear(&mut self){
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    /// Clears and resizes buffer.
    pub fn reset(&mut self, agent_count: usize){
        self.slots = vec![None; agent_count];
    }
}
