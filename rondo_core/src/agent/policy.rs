use std::marker::PhantomData;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::domain::{ActionDomain, Scheme};
use crate::error::RondoError;

/// Trait meant for structures working as action selectors: given observation, produce action.
///
/// The engine does not care where behaviour comes from, any strategy catalog can be
/// plugged in through this trait.
pub trait Policy<S: Scheme>: Send{
    /// Observation this policy is meant to work with.
    type Observation;

    /// Selects action based on observation.
    /// If no action can be selected [`RondoError::Custom`] or game specific error should be returned.
    fn select_action(&mut self, observation: &Self::Observation) -> Result<S::ActionType, RondoError<S>>;
}

impl<S: Scheme, P: Policy<S> + ?Sized> Policy<S> for Box<P>{
    type Observation = P::Observation;

    fn select_action(&mut self, observation: &Self::Observation) -> Result<S::ActionType, RondoError<S>> {
        self.as_mut().select_action(observation)
    }
}

/// Policy selecting uniformly from action domain, ignoring observation.
/// Randomness comes from own seeded generator, so runs are reproducible.
#[derive(Debug, Clone)]
pub struct RandomPolicy<S: Scheme, O>{
    domain: ActionDomain<S::ActionType>,
    rng: StdRng,
    _observation: PhantomData<O>,
}

impl<S: Scheme, O> RandomPolicy<S, O>{
    pub fn new(domain: ActionDomain<S::ActionType>, seed: u64) -> Self{
        Self{domain, rng: StdRng::seed_from_u64(seed), _observation: PhantomData}
    }
}

impl<S: Scheme, O: Send> Policy<S> for RandomPolicy<S, O>{
    type Observation = O;

    fn select_action(&mut self, _observation: &O) -> Result<S::ActionType, RondoError<S>> {
        self.domain.as_slice().choose(&mut self.rng).cloned()
            .ok_or_else(|| RondoError::Custom("random policy over empty domain".into()))
    }
}

/// Pure strategy - always one specified action.
#[derive(Debug, Clone)]
pub struct PurePolicy<S: Scheme, O>{
    pub action: S::ActionType,
    _observation: PhantomData<O>,
}

impl<S: Scheme, O> PurePolicy<S, O>{
    pub fn new(action: S::ActionType) -> Self{
        Self{action, _observation: PhantomData}
    }
}

impl<S: Scheme, O: Send> Policy<S> for PurePolicy<S, O>{
    type Observation = O;

    fn select_action(&mut self, _observation: &O) -> Result<S::ActionType, RondoError<S>> {
        Ok(self.action.clone())
    }
}

#[cfg(test)]
mod tests{
    use crate::agent::{Policy, PurePolicy, RandomPolicy};
    use crate::domain::{ActionDomain, Scheme};

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("never")]
    struct NoError;

    #[derive(Debug, Clone)]
    struct CharScheme;

    impl Scheme for CharScheme{
        type ActionType = char;
        type GameErrorType = NoError;
        type AgentId = u8;
        type UniversalReward = i32;
    }

    #[test]
    fn random_policy_is_seeded_and_stays_in_domain(){
        let domain = ActionDomain::new(vec!['x', 'y', 'z']).unwrap();
        let mut a = RandomPolicy::<CharScheme, ()>::new(domain.clone(), 11);
        let mut b = RandomPolicy::<CharScheme, ()>::new(domain.clone(), 11);
        for _ in 0..30{
            let x = a.select_action(&()).unwrap();
            assert!(domain.contains(&x));
            assert_eq!(x, b.select_action(&()).unwrap());
        }
    }

    #[test]
    fn boxed_pure_policy(){
        let mut p: Box<dyn Policy<CharScheme, Observation = u32>> = Box::new(PurePolicy::<CharScheme, u32>::new('y'));
        assert_eq!(p.select_action(&5).unwrap(), 'y');
    }
}
