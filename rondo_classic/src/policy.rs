use std::marker::PhantomData;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rondo_core::agent::Policy;
use rondo_core::domain::Scheme;
use rondo_core::error::{ConfigError, RondoError};
use crate::rps::{RpsAction, RpsScheme};

/// Repeats the last action of the opponent, starting with `initial`.
#[derive(Debug, Clone)]
pub struct TitForTat<S: Scheme>{
    pub initial: S::ActionType,
}

impl<S: Scheme> TitForTat<S>{
    pub fn new(initial: S::ActionType) -> Self{
        Self{initial}
    }
}

impl<S: Scheme> Policy<S> for TitForTat<S>{
    type Observation = Option<S::ActionType>;

    fn select_action(&mut self, observation: &Self::Observation) -> Result<S::ActionType, RondoError<S>> {
        Ok(observation.clone().unwrap_or_else(|| self.initial.clone()))
    }
}

/// Plays what would have beaten the opponent's last move, rock at first.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeatLast;

impl Policy<RpsScheme> for BeatLast{
    type Observation = Option<RpsAction>;

    fn select_action(&mut self, observation: &Self::Observation) -> Result<RpsAction, RondoError<RpsScheme>> {
        Ok(observation.map(|a| a.counter()).unwrap_or(RpsAction::Rock))
    }
}

/// Selects actions with given probabilities, ignoring observation.
#[derive(Debug, Clone)]
pub struct MixedPolicy<S: Scheme, O>{
    actions: Vec<S::ActionType>,
    index: WeightedIndex<f64>,
    rng: StdRng,
    _observation: PhantomData<O>,
}

impl<S: Scheme, O> MixedPolicy<S, O>{
    /// Every probability must lie in `[0, 1]` and they must sum up to one.
    pub fn new(weights: Vec<(S::ActionType, f64)>, seed: u64) -> Result<Self, ConfigError>{
        if let Some((_, p)) = weights.iter().find(|(_, p)| !(0.0..=1.0).contains(p)){
            return Err(ConfigError::NotAProbability(*p));
        }
        let sum: f64 = weights.iter().map(|(_, p)| p).sum();
        if (sum - 1.0).abs() > 1e-9{
            return Err(ConfigError::NotAProbability(sum));
        }
        let (actions, probabilities): (Vec<_>, Vec<_>) = weights.into_iter().unzip();
        let index = WeightedIndex::new(probabilities)
            .map_err(|_| ConfigError::NotAProbability(sum))?;
        Ok(Self{actions, index, rng: StdRng::seed_from_u64(seed), _observation: PhantomData})
    }
}

impl<S: Scheme, O: Send> Policy<S> for MixedPolicy<S, O>{
    type Observation = O;

    fn select_action(&mut self, _observation: &O) -> Result<S::ActionType, RondoError<S>> {
        let i = self.index.sample(&mut self.rng);
        self.actions.get(i).cloned()
            .ok_or_else(|| RondoError::Custom(format!("mixed policy sampled index {i} out of {}", self.actions.len())))
    }
}
