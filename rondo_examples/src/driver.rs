use log::{debug, info};
use rondo_core::agent::Policy;
use rondo_core::domain::Scheme;
use rondo_core::env::{ScoreEnvironment, TurnBasedEnvironment, TurnBasedGame};
use rondo_core::error::RondoError;
use crate::series::{EpisodeSummary, PayoffSeries, ScoreValue};

/// Strategy of an agent chosen at runtime.
pub type DynPolicy<S, O> = Box<dyn Policy<S, Observation = O>>;

/// Plays one episode through [`agent_iter`](TurnBasedEnvironment::agent_iter).
///
/// Agent at seat `i` acts with `policies[i]` if it is set, otherwise it samples a random
/// action from environment. `sample_game` is asked after every closed round for a value
/// describing game state (e.g. total of shared resources).
pub fn play_episode<S, G, P>(
    name: &str,
    env: &mut TurnBasedEnvironment<S, G>,
    seed: Option<u64>,
    policies: &mut [Option<DynPolicy<S, G::Observation>>],
    sample_game: P,
) -> Result<EpisodeSummary, RondoError<S>>
where S: Scheme,
    G: TurnBasedGame<S>,
    S::UniversalReward: ScoreValue,
    P: Fn(&G) -> Option<f64>{

    env.reset(seed)?;
    let agents = env.possible_agents().to_vec();
    let max_rounds = env.config().max_rounds;
    let max_iter = agents.len() * (max_rounds as usize + 1);
    let mut payoffs = vec![Vec::with_capacity(max_rounds as usize); agents.len()];
    let mut resource_totals = Vec::new();
    let mut steps = 0;
    let mut rounds_recorded = 0;

    let mut iter = env.agent_iter(max_iter);
    while let Some(agent) = iter.next(){
        let env = iter.env();
        let last = env.last()?;
        let action = if last.terminated || last.truncated{
            None
        } else {
            let seat = agents.iter().position(|a| a == &agent)
                .unwrap_or(usize::MAX);
            match policies.get_mut(seat).and_then(|p| p.as_mut()){
                Some(policy) => Some(policy.select_action(&last.observation)?),
                None => Some(env.sample_action(&agent)?),
            }
        };
        env.step(action)?;
        steps += 1;

        if env.round_count() > rounds_recorded{
            rounds_recorded = env.round_count();
            for (seat, a) in agents.iter().enumerate(){
                payoffs[seat].push(env.actual_score_of_player(a).as_f64() as f32);
            }
            if let Some(value) = sample_game(env.game()){
                resource_totals.push(value as f32);
            }
            debug!("Round {rounds_recorded} of {name} finished after {steps} steps");
        }
    }

    let summary = EpisodeSummary{
        game: name.to_string(),
        seed,
        max_rounds,
        rounds: rounds_recorded,
        steps,
        agents: agents.iter().zip(payoffs).map(|(a, payoffs)| PayoffSeries{
            id: a.to_string(),
            final_score: env.actual_score_of_player(a).as_f64(),
            payoffs,
        }).collect(),
        resource_totals,
    };
    info!("Episode of {name} finished: {} rounds, {} steps", summary.rounds, summary.steps);
    Ok(summary)
}
