use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reward types that can be reported as floating point score.
pub trait ScoreValue{
    fn as_f64(&self) -> f64;
}

impl ScoreValue for i64{
    fn as_f64(&self) -> f64 {
        *self as f64
    }
}

impl ScoreValue for f64{
    fn as_f64(&self) -> f64 {
        *self
    }
}

/// Score of one agent after every closed round.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PayoffSeries{
    pub id: String,
    pub final_score: f64,
    pub payoffs: Vec<f32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EpisodeSummary{
    pub game: String,
    pub seed: Option<u64>,
    pub max_rounds: u32,
    pub rounds: u32,
    pub steps: usize,
    pub agents: Vec<PayoffSeries>,
    /// Total of shared resources after every round, empty for games without pool.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_totals: Vec<f32>,
}

#[derive(Error, Debug)]
pub enum SummaryError{
    #[error("cannot write summary: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot encode summary as json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot encode summary as yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Writes summary as YAML when file extension is `yaml` or `yml`, JSON otherwise.
pub fn save_summary<T: Serialize + ?Sized>(file: &Path, summary: &T) -> Result<(), SummaryError>{
    let writer = BufWriter::new(File::create(file)?);
    match file.extension().and_then(|e| e.to_str()){
        Some("yaml") | Some("yml") => serde_yaml::to_writer(writer, summary)?,
        _ => serde_json::to_writer_pretty(writer, summary)?,
    }
    Ok(())
}
