use std::iter::FusedIterator;
use crate::domain::Scheme;
use crate::env::{TurnBasedEnvironment, TurnBasedGame};

/// Lazy sequence of agents expected to act, created by
/// [`TurnBasedEnvironment::agent_iter`].
///
/// Every `next` yields the currently selected agent, so the caller is expected to
/// step the environment (through [`env`](AgentIter::env)) between calls.
/// The sequence ends once every agent has been flushed or after `max_iter` items,
/// and once ended it stays ended.
///
/// ```ignore
/// let mut agents = env.agent_iter(1000);
/// while let Some(agent) = agents.next(){
///     let env = agents.env();
///     let last = env.last()?;
///     let action = if last.terminated || last.truncated { None } else { Some(env.sample_action(&agent)?) };
///     env.step(action)?;
/// }
/// ```
pub struct AgentIter<'a, S: Scheme, G: TurnBasedGame<S>>{
    env: &'a mut TurnBasedEnvironment<S, G>,
    remaining: usize,
    finished: bool,
}

impl<'a, S: Scheme, G: TurnBasedGame<S>> AgentIter<'a, S, G>{
    pub(crate) fn new(env: &'a mut TurnBasedEnvironment<S, G>, max_iter: usize) -> Self{
        Self{env, remaining: max_iter, finished: false}
    }

    pub fn env(&mut self) -> &mut TurnBasedEnvironment<S, G>{
        self.env
    }
}

impl<S: Scheme, G: TurnBasedGame<S>> Iterator for AgentIter<'_, S, G>{
    type Item = S::AgentId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.remaining == 0{
            self.finished = true;
            return None;
        }
        self.remaining -= 1;
        let agent = self.env.agent_selection().cloned();
        if agent.is_none(){
            self.finished = true;
        }
        agent
    }
}

impl<S: Scheme, G: TurnBasedGame<S>> FusedIterator for AgentIter<'_, S, G>{}
