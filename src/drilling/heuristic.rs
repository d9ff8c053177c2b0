use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

use crate::drilling::{DrillingRobot, Heading, RobotState};
use crate::problem::Heuristic;

/// Cost-to-go estimates for [`DrillingRobot`].
///
/// The Chebyshev-based estimates never overestimate the true remaining
/// cost as long as every step costs at least one unit. Manhattan and
/// Euclidean are distance baselines: both can overestimate when a single
/// cheap diagonal drill covers two grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
pub enum HeuristicKind {
    /// Manhattan distance to the goal cell; overcounts diagonal movement.
    #[value(name = "h")]
    #[serde(rename = "h")]
    Manhattan,
    /// Chebyshev distance, the number of 8-connected steps.
    #[value(name = "h_chebyshev")]
    #[serde(rename = "h_chebyshev")]
    Chebyshev,
    /// Straight-line distance; exceeds the step count on diagonals.
    #[value(name = "h_euclidean")]
    #[serde(rename = "h_euclidean")]
    Euclidean,
    /// Chebyshev steps, each at the cheapest hardness on the map.
    #[value(name = "h_minhardness")]
    #[serde(rename = "h_minhardness")]
    MinHardness,
    /// Drilling bound plus the turns needed to line up and to finish.
    #[value(name = "h_combined")]
    #[serde(rename = "h_combined")]
    Combined,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 5] = [
        HeuristicKind::Manhattan,
        HeuristicKind::Chebyshev,
        HeuristicKind::Euclidean,
        HeuristicKind::MinHardness,
        HeuristicKind::Combined,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HeuristicKind::Manhattan => "h",
            HeuristicKind::Chebyshev => "h_chebyshev",
            HeuristicKind::Euclidean => "h_euclidean",
            HeuristicKind::MinHardness => "h_minhardness",
            HeuristicKind::Combined => "h_combined",
        }
    }

    /// Boxed evaluator borrowing `problem`, in the shape
    /// [`astar_search`](crate::search::astar_search) expects.
    pub fn resolve(self, problem: &DrillingRobot) -> Heuristic<'_, DrillingRobot> {
        Box::new(move |node| self.estimate(problem, &node.state))
    }

    /// The estimated cost from `state` to the goal.
    pub fn estimate(self, problem: &DrillingRobot, state: &RobotState) -> f64 {
        let goal = problem.goal();
        let dx = goal.x as i64 - state.x as i64;
        let dy = goal.y as i64 - state.y as i64;
        match self {
            HeuristicKind::Manhattan => (dx.abs() + dy.abs()) as f64,
            HeuristicKind::Chebyshev => dx.abs().max(dy.abs()) as f64,
            HeuristicKind::Euclidean => ((dx * dx + dy * dy) as f64).sqrt(),
            HeuristicKind::MinHardness => {
                dx.abs().max(dy.abs()) as f64 * f64::from(problem.map().min_hardness())
            }
            HeuristicKind::Combined => combined(problem, state, dx, dy),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal number of 45 degree rotations between two headings, turning
/// either way.
pub fn turn_distance(a: Heading, b: Heading) -> u32 {
    let a = u32::from(a.index());
    let b = u32::from(b.index());
    ((a + 8 - b) % 8).min((b + 8 - a) % 8)
}

/// Drilling bound (Chebyshev steps at minimum hardness) plus a turning
/// bound: the rotations needed to face a direction that strictly reduces
/// the Chebyshev distance, and to leave it facing the goal heading when one
/// is required. Only the larger of the two turn counts is charged.
fn combined(problem: &DrillingRobot, state: &RobotState, dx: i64, dy: i64) -> f64 {
    let (adx, ady) = (dx.abs(), dy.abs());
    let cheb = adx.max(ady);
    let drill_lb = cheb as f64 * f64::from(problem.map().min_hardness());

    // On the goal cell only the final heading can still cost anything.
    if adx == 0 && ady == 0 {
        return match problem.goal().heading {
            None => 0.0,
            Some(required) => f64::from(turn_distance(state.heading, required)),
        };
    }

    // The single heading that reduces Chebyshev distance fastest: the
    // dominant axis, or the exact diagonal when both axes tie.
    let progress = if adx > ady {
        if dx > 0 {
            Heading::South
        } else {
            Heading::North
        }
    } else if ady > adx {
        if dy > 0 {
            Heading::East
        } else {
            Heading::West
        }
    } else {
        match (dx > 0, dy > 0) {
            (true, true) => Heading::SouthEast,
            (true, false) => Heading::SouthWest,
            (false, true) => Heading::NorthEast,
            (false, false) => Heading::NorthWest,
        }
    };

    let turns_now = turn_distance(state.heading, progress);
    let turns_end = match problem.goal().heading {
        None => 0,
        Some(required) => turn_distance(required, progress),
    };

    drill_lb + f64::from(turns_now.max(turns_end))
}
