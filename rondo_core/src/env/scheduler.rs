use crate::agent::AgentIdentifier;

/// Cyclic turn order fixed at reset.
///
/// The pointer always moves forward and wraps to position `0` after the last agent.
/// Liveness is not the scheduler's concern, skipping of dead agents is done by
/// the environment with [`next_matching`](TurnScheduler::next_matching).
#[derive(Debug, Clone)]
pub struct TurnScheduler<ID: AgentIdentifier>{
    order: Vec<ID>,
    pointer: usize,
}

impl<ID: AgentIdentifier> TurnScheduler<ID>{

    /// Creates scheduler with given order, the first agent is the current one.
    pub fn new(order: Vec<ID>) -> Self{
        Self{order, pointer: 0}
    }

    /// Sets new order and returns the initial actor (`None` only for empty order).
    pub fn reset(&mut self, order: Vec<ID>) -> Option<&ID>{
        self.order = order;
        self.pointer = 0;
        self.current()
    }

    pub fn current(&self) -> Option<&ID>{
        self.order.get(self.pointer)
    }

    /// Turn position of current actor.
    pub fn position(&self) -> usize{
        self.pointer
    }

    pub fn order(&self) -> &[ID]{
        &self.order
    }

    pub fn len(&self) -> usize{
        self.order.len()
    }

    pub fn is_empty(&self) -> bool{
        self.order.is_empty()
    }

    pub fn seat_of(&self, agent: &ID) -> Option<usize>{
        self.order.iter().position(|a| a == agent)
    }

    pub fn agent_at(&self, seat: usize) -> Option<&ID>{
        self.order.get(seat)
    }

    /// Moves pointer one position forward, wrapping around.
    pub fn advance(&mut self) -> Option<&ID>{
        if !self.order.is_empty(){
            self.pointer = (self.pointer + 1) % self.order.len();
        }
        self.current()
    }

    /// True when current actor is the last of the cycle, i.e. the next advance wraps.
    pub fn is_round_complete(&self) -> bool{
        !self.order.is_empty() && self.pointer + 1 == self.order.len()
    }

    /// Points at given seat. Seats outside of order are ignored and `false` is returned.
    pub fn select(&mut self, seat: usize) -> bool{
        if seat < self.order.len(){
            self.pointer = seat;
            true
        } else {
            false
        }
    }

    /// Finds first seat after the current one, in cyclic order, satisfying predicate.
    /// Current seat is checked last.
    pub fn next_matching<F: Fn(usize) -> bool>(&self, predicate: F) -> Option<usize>{
        let n = self.order.len();
        (1..=n).map(|offset| (self.pointer + offset) % n)
            .find(|seat| predicate(*seat))
    }
}
