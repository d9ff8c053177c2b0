use std::fmt;

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing::warn;

use crate::drilling::HeuristicKind;

#[derive(Parser, Debug)]
#[command(
    name = "drillsearch",
    about = "Search algorithms for the drilling robot problem.",
    version = "0.1"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML run configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Path to the map file")]
    pub map_path: Option<String>,

    #[arg(long, help = "Search algorithm to run")]
    pub algorithm: Option<Algorithm>,

    #[arg(long, help = "Heuristic used by a-star")]
    pub heuristic: Option<HeuristicKind>,

    #[arg(long, help = "Print the step-by-step solution trace")]
    pub trace: Option<bool>,

    #[arg(long, help = "Append run metrics to this CSV file")]
    pub metrics_path: Option<String>,

    #[arg(long, help = "Write the exploration graph to this DOT file")]
    pub dot_path: Option<String>,

    #[arg(long, help = "Write the solution report to this JSON file")]
    pub report_path: Option<String>,
}

/// The search strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
pub enum Algorithm {
    #[value(name = "bfs")]
    #[serde(rename = "bfs")]
    Bfs,
    #[value(name = "dfs")]
    #[serde(rename = "dfs")]
    Dfs,
    #[value(name = "astar")]
    #[serde(rename = "astar")]
    Astar,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Astar => "astar",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "Breadth-First Search (BFS)",
            Algorithm::Dfs => "Depth-First Search (DFS)",
            Algorithm::Astar => "A* Search",
        }
    }

    /// Whether the strategy ignores heuristics entirely.
    pub fn is_blind(self) -> bool {
        !matches!(self, Algorithm::Astar)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A full run description: what to search and what to emit. Values come
/// from an optional YAML file, with command-line flags taking precedence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub map_path: String,
    pub algorithm: Algorithm,
    pub heuristic: Option<HeuristicKind>,
    pub trace: bool,
    pub metrics_path: Option<String>,
    pub dot_path: Option<String>,
    pub report_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            map_path: "maps/N3x3/map1.txt".to_string(),
            algorithm: Algorithm::Astar,
            heuristic: None,
            trace: true,
            metrics_path: None,
            dot_path: None,
            report_path: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> Result<Self> {
        if let Some(map_path) = cli.map_path.as_ref() {
            self.map_path = map_path.clone();
        }
        if let Some(algorithm) = cli.algorithm {
            self.algorithm = algorithm;
        }
        if let Some(heuristic) = cli.heuristic {
            self.heuristic = Some(heuristic);
        }
        if let Some(trace) = cli.trace {
            self.trace = trace;
        }
        if let Some(metrics_path) = cli.metrics_path.as_ref() {
            self.metrics_path = Some(metrics_path.clone());
        }
        if let Some(dot_path) = cli.dot_path.as_ref() {
            self.dot_path = Some(dot_path.clone());
        }
        if let Some(report_path) = cli.report_path.as_ref() {
            self.report_path = Some(report_path.clone());
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.map_path.is_empty(), "map path must not be empty");
        if self.algorithm.is_blind() && self.heuristic.is_some() {
            warn!(
                "{} does not use a heuristic, the heuristic setting is ignored",
                self.algorithm
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_tokens_parse_into_typed_fields() {
        let config = Config::from_yaml_str(
            "map_path: maps/N5x5/map1.txt\nalgorithm: astar\nheuristic: h_combined\ntrace: false\n",
        )
        .unwrap();
        assert_eq!(config.map_path, "maps/N5x5/map1.txt");
        assert_eq!(config.algorithm, Algorithm::Astar);
        assert_eq!(config.heuristic, Some(HeuristicKind::Combined));
        assert!(!config.trace);
    }

    #[test]
    fn unknown_yaml_fields_are_rejected() {
        assert!(Config::from_yaml_str("algorithm: bfs\nsolver: cbs\n").is_err());
    }

    #[test]
    fn command_line_wins_over_the_file() {
        let cli = Cli {
            config: None,
            map_path: Some("maps/N3x3/map2.txt".to_string()),
            algorithm: Some(Algorithm::Dfs),
            heuristic: None,
            trace: None,
            metrics_path: None,
            dot_path: None,
            report_path: None,
        };
        let config = Config::from_yaml_str("algorithm: astar\nheuristic: h\n")
            .unwrap()
            .override_from_command_line(&cli)
            .unwrap();
        assert_eq!(config.algorithm, Algorithm::Dfs);
        assert_eq!(config.map_path, "maps/N3x3/map2.txt");
        // The file's heuristic survives; DFS will just not consult it.
        assert_eq!(config.heuristic, Some(HeuristicKind::Manhattan));
    }
}
