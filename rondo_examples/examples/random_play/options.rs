use std::path::PathBuf;
use log::LevelFilter;
use clap::{ValueEnum, Parser};
use rondo_core::env::RenderMode;

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum GameChoice{
    Rps,
    Prisoners,
    Commons,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StrategyChoice{
    Random,
    Pure,
    Mixed,
    TitForTat,
    BeatLast,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CommonsPolicyChoice{
    CostAndAverage,
    BlindAverage,
    BlindMaxVoter,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct PlayOptions{

    #[arg(short = 'v', long = "log_level", default_value = "info")]
    pub log_level: LevelFilter,

    #[arg(short = 'a', long = "log_level_rondo", default_value = "OFF")]
    pub log_level_rondo: LevelFilter,

    #[arg(short = 'o', long = "logfile")]
    pub log_file: Option<PathBuf>,

    #[arg(short = 'g', long = "game", value_enum, default_value = "rps")]
    pub game: GameChoice,

    /// Number of rounds, game default when not set.
    #[arg(short = 'n', long = "rounds")]
    pub rounds: Option<u32>,

    /// Number of agents (commons only).
    #[arg(short = 'N', long = "agents")]
    pub agents: Option<usize>,

    /// Strategy of the first agent, others play randomly.
    #[arg(short = 'p', long = "strategy", value_enum, default_value = "random")]
    pub strategy: StrategyChoice,

    /// Probability of the first action of domain in mixed strategy.
    #[arg(long = "mixed-first", default_value = "0.5")]
    pub mixed_first: f64,

    #[arg(long = "commons-policy", value_enum, default_value = "cost-and-average")]
    pub commons_policy: CommonsPolicyChoice,

    #[arg(long = "reset-pool")]
    pub reset_pool: bool,

    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    #[arg(short = 'e', long = "episodes", default_value = "1")]
    pub episodes: usize,

    #[arg(short = 'r', long = "render", value_enum, default_value = "none")]
    pub render: RenderMode,

    /// YAML file with episode configuration (agent_count, max_rounds, render_mode)
    /// overriding command line values.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Summary file, YAML for `.yaml`/`.yml` extension, JSON otherwise.
    #[arg(long = "summary")]
    pub summary: Option<PathBuf>,

    /// SVG plot of scores in the last episode.
    #[arg(long = "plot")]
    pub plot: Option<PathBuf>,

    /// SVG heat map of resource pool after the last episode (commons only).
    #[arg(long = "heatmap")]
    pub heatmap: Option<PathBuf>,
}
