//! Human-readable and machine-readable renderings of a finished run.

use serde::Serialize;

use crate::config::Algorithm;
use crate::drilling::{DrillingRobot, HeuristicKind};
use crate::search::SearchOutcome;

/// Banner line naming the run, e.g. `A* Search (heuristic: h_combined)`.
pub fn algorithm_banner(algorithm: Algorithm, heuristic: Option<HeuristicKind>) -> String {
    match algorithm {
        Algorithm::Astar => format!(
            "A* Search (heuristic: {})",
            heuristic.map_or("default", HeuristicKind::as_str)
        ),
        other => other.display_name().to_string(),
    }
}

/// Prints the solution path node by node, then the final metrics. Blind
/// runs omit the heuristic column; a-star lines carry h(n) per node.
pub fn print_path_trace(
    problem: &DrillingRobot,
    outcome: &SearchOutcome<DrillingRobot>,
    algorithm: Algorithm,
    heuristic: Option<HeuristicKind>,
) {
    println!("{}", "=".repeat(60));
    println!("ALGORITHM: {}", algorithm_banner(algorithm, heuristic));
    println!("{}", "=".repeat(60));

    let Some(solution) = outcome.solution.as_ref() else {
        println!("WARNING! No solution found. Showing trace up to the last examined node.");
        println!("End of execution without solution.");
        return;
    };

    let kind = if algorithm.is_blind() {
        None
    } else {
        Some(heuristic.unwrap_or(HeuristicKind::Manhattan))
    };

    let path = solution.path();
    println!("--- EXECUTION TRACE (SOLUTION) ---");
    for (i, node) in path.iter().enumerate() {
        let label = if i == 0 {
            "Node 0 (starting node)".to_string()
        } else {
            format!("Node {i}")
        };
        let action = node
            .action
            .map_or_else(|| "None".to_string(), |a| a.to_string());
        let state = node.state;
        match kind {
            Some(kind) => println!(
                "{}: (depth:{}, total cost:{}, action:{}, h(n):{}, State: x={}, y={}, o={})",
                label,
                node.depth,
                node.path_cost,
                action,
                kind.estimate(problem, &state),
                state.x,
                state.y,
                state.heading
            ),
            None => println!(
                "{}: (depth:{}, total cost:{}, action:{}, State: x={}, y={}, o={})",
                label, node.depth, node.path_cost, action, state.x, state.y, state.heading
            ),
        }
    }

    println!();
    println!("--- FINAL METRICS ---");
    println!("Node {} (final node)", path.len() - 1);
    println!("Total path cost (g): {}", solution.path_cost);
    println!("{}", "-".repeat(60));
}

/// One node of the solution path, ready for serialization.
#[derive(Debug, Serialize)]
pub struct TraceStep {
    pub action: Option<String>,
    pub x: usize,
    pub y: usize,
    pub orientation: u8,
    pub depth: usize,
    pub cost: f64,
}

/// The whole run as one JSON document.
#[derive(Debug, Serialize)]
pub struct SolutionReport {
    pub map: String,
    pub algorithm: String,
    pub heuristic: Option<String>,
    pub solved: bool,
    pub depth: Option<usize>,
    pub cost: Option<f64>,
    pub expanded: usize,
    pub generated: usize,
    pub frontier: usize,
    pub steps: Vec<TraceStep>,
}

impl SolutionReport {
    pub fn from_outcome(
        map_path: &str,
        outcome: &SearchOutcome<DrillingRobot>,
        algorithm: Algorithm,
        heuristic: Option<HeuristicKind>,
    ) -> Self {
        let steps = outcome
            .solution
            .as_ref()
            .map(|solution| {
                solution
                    .path()
                    .iter()
                    .map(|node| TraceStep {
                        action: node.action.map(|a| a.to_string()),
                        x: node.state.x,
                        y: node.state.y,
                        orientation: node.state.heading.index(),
                        depth: node.depth,
                        cost: node.path_cost,
                    })
                    .collect()
            })
            .unwrap_or_default();
        SolutionReport {
            map: map_path.to_string(),
            algorithm: algorithm.to_string(),
            heuristic: heuristic.map(|kind| kind.as_str().to_string()),
            solved: outcome.is_solved(),
            depth: outcome.solution_depth(),
            cost: outcome.solution_cost(),
            expanded: outcome.expanded.len(),
            generated: outcome.generated.len(),
            frontier: outcome.frontier.len(),
            steps,
        }
    }
}
