//! Command-line interface
//!
//! Parses flags with `clap`, turns user text into validated generator input
//! (comma-separated numbers, graph JSON files), and renders non-interactive
//! output formats. Everything here is collaborator work: the generators only
//! ever see already-validated values.

use crate::algorithms::{self, AlgorithmId, AlgorithmInput, GenerateError};
use crate::graph::Graph;
use crate::playback::{PlaybackConfig, PlaybackError};
use crate::trace::Trace;
use crate::ui::Scene;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_SORT_INPUT: &str = "64,34,25,12,22,11,90";
pub const DEFAULT_SEARCH_INPUT: &str = "5,10,15,20,25,30,35,40,45,50";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("entry {position} ('{entry}') is not an integer")]
    InvalidNumber { entry: String, position: usize },

    #[error("cannot read graph file {}: {source}", path.display())]
    GraphFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid graph JSON: {0}")]
    GraphJson(#[from] serde_json::Error),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

#[derive(Debug, Parser)]
#[command(
    name = "algoscope",
    version,
    about = "Step through classic algorithms frame by frame"
)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the available algorithms
    List,
    /// Generate a trace and play it back
    Run(RunArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Interactive terminal playback
    Tui,
    /// One line per frame
    Text,
    /// The full trace as JSON
    Json,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(value_enum)]
    pub algorithm: AlgorithmId,

    /// Comma-separated integers (array algorithms)
    #[arg(long, allow_hyphen_values = true)]
    pub input: Option<String>,

    /// Value to search for (binary search)
    #[arg(long, default_value_t = 25, allow_hyphen_values = true)]
    pub target: i64,

    /// Graph JSON file (graph algorithms); defaults to the built-in sample
    #[arg(long)]
    pub graph: Option<PathBuf>,

    #[arg(long, default_value = "A")]
    pub start: String,

    /// End node (dijkstra)
    #[arg(long, default_value = "F")]
    pub end: String,

    /// Playback speed multiplier
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,

    /// Delay between frames at 1x, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub interval_ms: u64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Tui)]
    pub format: OutputFormat,
}

/// Everything needed to show one run
#[derive(Debug)]
pub struct Session {
    pub trace: Trace,
    pub scene: Scene,
    pub config: PlaybackConfig,
}

impl RunArgs {
    pub fn values(&self) -> Result<Vec<i64>, CliError> {
        let text = match (&self.input, self.algorithm) {
            (Some(text), _) => text.as_str(),
            (None, AlgorithmId::BinarySearch) => DEFAULT_SEARCH_INPUT,
            (None, _) => DEFAULT_SORT_INPUT,
        };
        parse_values(text)
    }

    pub fn load_graph(&self) -> Result<Graph, CliError> {
        match &self.graph {
            Some(path) => load_graph(path),
            None => Ok(Graph::sample()),
        }
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            base_interval: Duration::from_millis(self.interval_ms),
            speed: self.speed,
        }
    }

    /// Validate input and generate the trace
    pub fn prepare(&self) -> Result<Session, CliError> {
        let config = self.playback_config();
        config.validate()?;

        let (trace, scene) = match self.algorithm {
            AlgorithmId::BubbleSort => {
                let values = self.values()?;
                let trace = algorithms::generate(AlgorithmInput::BubbleSort { values: &values })?;
                (trace, Scene::Array)
            }
            AlgorithmId::BinarySearch => {
                let values = self.values()?;
                let trace = algorithms::generate(AlgorithmInput::BinarySearch {
                    values: &values,
                    target: self.target,
                })?;
                (trace, Scene::Array)
            }
            AlgorithmId::Dijkstra => {
                let graph = self.load_graph()?;
                let trace = algorithms::generate(AlgorithmInput::Dijkstra {
                    graph: &graph,
                    start: &self.start,
                    end: &self.end,
                })?;
                let scene = Scene::Graph {
                    graph,
                    start: self.start.clone(),
                    end: Some(self.end.clone()),
                };
                (trace, scene)
            }
            AlgorithmId::Bfs => {
                let graph = self.load_graph()?;
                let trace = algorithms::generate(AlgorithmInput::Bfs {
                    graph: &graph,
                    start: &self.start,
                })?;
                let scene = Scene::Graph {
                    graph,
                    start: self.start.clone(),
                    end: None,
                };
                (trace, scene)
            }
        };

        info!(algorithm = %self.algorithm, frames = trace.len(), "trace ready");
        Ok(Session {
            trace,
            scene,
            config,
        })
    }
}

/// Parse `"5, 3,8"` into numbers; blank text is an empty array
pub fn parse_values(text: &str) -> Result<Vec<i64>, CliError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .enumerate()
        .map(|(i, entry)| {
            entry
                .trim()
                .parse::<i64>()
                .map_err(|_| CliError::InvalidNumber {
                    entry: entry.trim().to_string(),
                    position: i + 1,
                })
        })
        .collect()
}

pub fn load_graph(path: &Path) -> Result<Graph, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::GraphFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// One line per frame
pub fn render_text(trace: &Trace) -> String {
    let mut out = String::new();
    for frame in trace {
        let lines: Vec<String> = frame
            .highlighted_lines
            .iter()
            .map(|l| l.to_string())
            .collect();
        let _ = write!(out, "[{:>3}] lines={:<8} {}", frame.index, lines.join(","), frame.message);
        if frame.complete {
            out.push_str(" (complete)");
        }
        out.push('\n');
    }
    out
}

pub fn render_json(trace: &Trace) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(trace)?)
}

/// The algorithm catalog as a table
pub fn render_catalog() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:<22} {:<12} {:<16} {:<16} {:<16} {:<6} {}",
        "ID", "NAME", "CATEGORY", "BEST", "AVERAGE", "WORST", "SPACE", "STABLE"
    );
    for id in AlgorithmId::ALL {
        let info = id.info();
        let _ = writeln!(
            out,
            "{:<14} {:<22} {:<12} {:<16} {:<16} {:<16} {:<6} {}",
            id.slug(),
            info.name,
            info.category,
            info.time.best,
            info.time.average,
            info.time.worst,
            info.space,
            if info.stable { "yes" } else { "no" }
        );
    }
    out
}
