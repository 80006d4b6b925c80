mod options;

use std::fs::File;
use anyhow::{anyhow, bail, Context};
use clap::Parser;
use log::{info, warn};
use rondo_core::agent::PurePolicy;
use rondo_core::config::EpisodeConfig;
use rondo_core::domain::{ActionDomain, Scheme};
use rondo_core::env::{TurnBasedEnvironment, TurnBasedGame};
use rondo_core::error::RondoError;
use rondo_core::payoff::{BlindAverage, BlindMaxVoter, CostAndAverage};
use rondo_core::pool::ResourcePool;
use rondo_classic::commons::{commons_environment, CommonsAction, CommonsConfig, CommonsScheme, DynCommonsPolicy, COMMONS_DEFAULT_AGENTS, COMMONS_DEFAULT_ROUNDS};
use rondo_classic::domain::TwoPlayersStdName::{Alice, Bob};
use rondo_classic::policy::{BeatLast, MixedPolicy, TitForTat};
use rondo_classic::prisoners::{prisoners_game, PdAction, PrisonersScheme, SymmetricRewardTable, PRISONERS_DEFAULT_ROUNDS};
use rondo_classic::rps::{rps_game, RpsAction, RpsScheme, RPS_DEFAULT_ROUNDS};
use rondo_examples::driver::{play_episode, DynPolicy};
use rondo_examples::plots::{plot_many_series, plot_pool_heatmap, series_color, PlotSeries};
use rondo_examples::series::{save_summary, EpisodeSummary, ScoreValue};
use rondo_examples::setup::setup_logger;
use crate::options::{CommonsPolicyChoice, GameChoice, PlayOptions, StrategyChoice};

fn episode_config(options: &PlayOptions, default_agents: usize, default_rounds: u32) -> anyhow::Result<EpisodeConfig>{
    let mut config = EpisodeConfig::new(
        options.agents.unwrap_or(default_agents),
        options.rounds.unwrap_or(default_rounds))
        .with_render_mode(options.render);
    if let Some(path) = &options.config{
        let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
        config = serde_yaml::from_reader(file).with_context(|| format!("parsing config {}", path.display()))?;
        info!("Episode configuration loaded from {}: {config:?}", path.display());
    }
    config.validate()?;
    Ok(config)
}

/// Strategies available in every game.
fn common_policy<S: Scheme, O: Send + 'static>(options: &PlayOptions, domain: &ActionDomain<S::ActionType>, seed: u64)
    -> anyhow::Result<Option<DynPolicy<S, O>>>{
    let first = domain.get(0).cloned().context("empty action domain")?;
    match options.strategy{
        StrategyChoice::Random => Ok(None),
        StrategyChoice::Pure => Ok(Some(Box::new(PurePolicy::<S, O>::new(first)))),
        StrategyChoice::Mixed => {
            let rest = (1.0 - options.mixed_first) / (domain.len().saturating_sub(1).max(1)) as f64;
            let weights = domain.iter().enumerate()
                .map(|(i, a)| (a.clone(), if i == 0 { options.mixed_first } else { rest }))
                .collect();
            Ok(Some(Box::new(MixedPolicy::<S, O>::new(weights, seed)?)))
        },
        other => bail!("strategy {other:?} is not available for this game"),
    }
}

fn run_episodes<S, G, P>(
    options: &PlayOptions,
    name: &str,
    env: &mut TurnBasedEnvironment<S, G>,
    policies: &mut [Option<DynPolicy<S, G::Observation>>],
    sample_game: P) -> anyhow::Result<Vec<EpisodeSummary>>
where S: Scheme,
    G: TurnBasedGame<S>,
    S::UniversalReward: ScoreValue,
    RondoError<S>: std::error::Error + Send + Sync + 'static,
    P: Fn(&G) -> Option<f64>{
    let mut summaries = Vec::with_capacity(options.episodes);
    for episode in 0..options.episodes{
        let seed = options.seed.map(|s| s.wrapping_add(episode as u64));
        summaries.push(play_episode(name, env, seed, policies, &sample_game)?);
    }
    env.close();
    Ok(summaries)
}

fn play_rps(options: &PlayOptions) -> anyhow::Result<Vec<EpisodeSummary>>{
    let config = episode_config(options, 2, RPS_DEFAULT_ROUNDS)?;
    let mut env = TurnBasedEnvironment::new(rps_game()?, vec![Alice, Bob], config)?;
    let first: Option<DynPolicy<RpsScheme, Option<RpsAction>>> = match options.strategy{
        StrategyChoice::TitForTat => Some(Box::new(TitForTat::<RpsScheme>::new(RpsAction::Rock))),
        StrategyChoice::BeatLast => Some(Box::new(BeatLast)),
        _ => common_policy(options, env.action_domain(), options.seed.unwrap_or_default())?,
    };
    run_episodes(options, "rock-paper-scissors", &mut env, &mut [first, None], |_| None)
}

fn play_prisoners(options: &PlayOptions) -> anyhow::Result<Vec<EpisodeSummary>>{
    let config = episode_config(options, 2, PRISONERS_DEFAULT_ROUNDS)?;
    let mut env = TurnBasedEnvironment::new(prisoners_game(SymmetricRewardTable::default())?, vec![Alice, Bob], config)?;
    let first: Option<DynPolicy<PrisonersScheme, Option<PdAction>>> = match options.strategy{
        StrategyChoice::TitForTat => Some(Box::new(TitForTat::<PrisonersScheme>::new(PdAction::Cooperate))),
        _ => common_policy(options, env.action_domain(), options.seed.unwrap_or_default())?,
    };
    run_episodes(options, "prisoners-dilemma", &mut env, &mut [first, None], |_| None)
}

fn play_commons(options: &PlayOptions) -> anyhow::Result<Vec<EpisodeSummary>>{
    let episode = episode_config(options, COMMONS_DEFAULT_AGENTS, COMMONS_DEFAULT_ROUNDS)?;
    let config = CommonsConfig{
        agent_count: episode.agent_count,
        max_rounds: episode.max_rounds,
        render_mode: episode.render_mode,
        reset_pool_on_reset: options.reset_pool,
        ..CommonsConfig::default()
    };
    let policy: DynCommonsPolicy = match options.commons_policy{
        CommonsPolicyChoice::CostAndAverage => Box::new(CostAndAverage::new(CommonsAction::Cooperate, CommonsAction::Defect)),
        CommonsPolicyChoice::BlindAverage => Box::new(BlindAverage),
        CommonsPolicyChoice::BlindMaxVoter => Box::new(BlindMaxVoter),
    };
    let mut env = commons_environment(config, policy)?;
    let first = common_policy::<CommonsScheme, ResourcePool>(options, env.action_domain(), options.seed.unwrap_or_default())?;
    let mut policies: Vec<Option<DynPolicy<CommonsScheme, ResourcePool>>> = std::iter::once(first)
        .chain(std::iter::repeat_with(|| None))
        .take(episode.agent_count)
        .collect();
    let summaries = run_episodes(options, "tragedy-of-the-commons", &mut env, &mut policies,
        |g| Some(g.pool().total()))?;
    if env.game().pool().is_depleted(){
        warn!("Resource pool is depleted");
    }
    if let Some(path) = &options.heatmap{
        plot_pool_heatmap(path, env.game().pool()).map_err(|e| anyhow!("plotting heat map: {e}"))?;
    }
    Ok(summaries)
}

fn report(options: &PlayOptions, summaries: &[EpisodeSummary]) -> anyhow::Result<()>{
    for summary in summaries{
        for agent in summary.agents.iter(){
            info!("{} (seed {:?}): agent {} scored {}", summary.game, summary.seed, agent.id, agent.final_score);
        }
    }
    if let Some(path) = &options.summary{
        save_summary(path, summaries)?;
        info!("Summary written to {}", path.display());
    }
    if let (Some(path), Some(last)) = (&options.plot, summaries.last()){
        let series: Vec<PlotSeries> = last.agents.iter().enumerate()
            .map(|(i, a)| PlotSeries{
                data: a.payoffs.clone(),
                description: format!("agent {}", a.id),
                color: series_color(i),
            }).collect();
        plot_many_series(path, &last.game, &series, "round", "score")
            .map_err(|e| anyhow!("plotting scores: {e}"))?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()>{
    let options = PlayOptions::parse();
    setup_logger(options.log_level, options.log_level_rondo, &options.log_file)?;
    let summaries = match options.game{
        GameChoice::Rps => play_rps(&options)?,
        GameChoice::Prisoners => play_prisoners(&options)?,
        GameChoice::Commons => play_commons(&options)?,
    };
    report(&options, &summaries)
}
