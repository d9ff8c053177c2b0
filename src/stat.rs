use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Algorithm;
use crate::drilling::HeuristicKind;
use crate::problem::Problem;
use crate::search::SearchOutcome;

const CSV_HEADER: &str = "map,algorithm,heuristic,d,g,#E,#F,generated,time_us";

/// Aggregate counters for one finished search run.
#[derive(Debug, Clone)]
pub struct Stats {
    pub map_path: String,
    pub algorithm: Algorithm,
    pub heuristic: Option<HeuristicKind>,
    pub solution_depth: Option<usize>,
    pub solution_cost: Option<f64>,
    pub expanded: usize,
    pub frontier: usize,
    pub generated: usize,
    pub time_us: u128,
}

impl Stats {
    pub fn collect<P: Problem>(
        map_path: &str,
        algorithm: Algorithm,
        heuristic: Option<HeuristicKind>,
        outcome: &SearchOutcome<P>,
        elapsed: Duration,
    ) -> Self {
        Stats {
            map_path: map_path.to_string(),
            algorithm,
            heuristic,
            solution_depth: outcome.solution_depth(),
            solution_cost: outcome.solution_cost(),
            expanded: outcome.expanded.len(),
            frontier: outcome.frontier.len(),
            generated: outcome.generated.len(),
            time_us: elapsed.as_micros(),
        }
    }

    pub fn print(&self) {
        info!(
            "Algorithm {} Depth {:?} Cost {:?} Expanded nodes number: {} Frontier nodes number: {} Generated nodes number: {} Time(microseconds) {}",
            self.algorithm,
            self.solution_depth,
            self.solution_cost,
            self.expanded,
            self.frontier,
            self.generated,
            self.time_us
        );
    }

    /// The heuristic token recorded in metrics tables. Blind runs get a
    /// literal "N/A"; an a-star run without an explicit choice falls back
    /// to the problem default.
    fn heuristic_token(&self) -> &'static str {
        if self.algorithm.is_blind() {
            return "N/A";
        }
        self.heuristic.unwrap_or(HeuristicKind::Manhattan).as_str()
    }

    fn csv_row(&self) -> String {
        let depth = self
            .solution_depth
            .map_or_else(String::new, |d| d.to_string());
        let cost = self
            .solution_cost
            .map_or_else(String::new, |g| g.to_string());
        format!(
            "{},{},{},{},{},{},{},{},{}",
            self.map_path,
            self.algorithm,
            self.heuristic_token(),
            depth,
            cost,
            self.expanded,
            self.frontier,
            self.generated,
            self.time_us
        )
    }

    /// Appends one row to the metrics CSV, writing the header first when the
    /// file does not exist yet.
    pub fn append_csv(&self, path: &str) -> Result<()> {
        let needs_header = !Path::new(path).exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open metrics file {path}"))?;
        if needs_header {
            writeln!(file, "{CSV_HEADER}")?;
        }
        writeln!(file, "{}", self.csv_row())?;
        Ok(())
    }
}
