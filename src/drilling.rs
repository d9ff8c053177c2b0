//! The drilling robot: an oriented agent on a weighted 8-connected grid.
//!
//! Map file format:
//!   - first line: `rows cols`
//!   - next `rows` lines: integer hardness per cell
//!   - next line: `x0 y0 o0` (initial state, orientation in 0..=7)
//!   - next line: `xt yt ot` (goal state, `ot = 8` means any orientation)
//!
//! The robot turns in place by 45 degrees for one cost unit, or drills one
//! cell forward for the hardness of the cell it enters.

mod heuristic;

pub use heuristic::{turn_distance, HeuristicKind};

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{ensure, Context, Result};

use crate::map::Map;
use crate::problem::{Heuristic, Problem};

/// Compass direction the robot faces, one of the eight grid neighbors.
/// Indices follow the compass clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Heading {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Heading {
    pub const ALL: [Heading; 8] = [
        Heading::North,
        Heading::NorthEast,
        Heading::East,
        Heading::SouthEast,
        Heading::South,
        Heading::SouthWest,
        Heading::West,
        Heading::NorthWest,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Heading> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Row and column offset of the cell one step ahead.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Heading::North => (-1, 0),
            Heading::NorthEast => (-1, 1),
            Heading::East => (0, 1),
            Heading::SouthEast => (1, 1),
            Heading::South => (1, 0),
            Heading::SouthWest => (1, -1),
            Heading::West => (0, -1),
            Heading::NorthWest => (-1, -1),
        }
    }

    pub fn left(self) -> Heading {
        Self::ALL[usize::from((self.index() + 7) % 8)]
    }

    pub fn right(self) -> Heading {
        Self::ALL[usize::from((self.index() + 1) % 8)]
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::North => "North",
            Heading::NorthEast => "Northeast",
            Heading::East => "East",
            Heading::SouthEast => "Southeast",
            Heading::South => "South",
            Heading::SouthWest => "Southwest",
            Heading::West => "West",
            Heading::NorthWest => "Northwest",
        };
        write!(f, "{} ({})", name, self.index())
    }
}

/// What the robot can do in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TurnLeft,
    TurnRight,
    Drill,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::TurnLeft => "TURN_LEFT",
            Action::TurnRight => "TURN_RIGHT",
            Action::Drill => "DRILL",
        };
        f.write_str(name)
    }
}

/// Position plus heading; the full search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RobotState {
    pub x: usize,
    pub y: usize,
    pub heading: Heading,
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.heading.index())
    }
}

/// Target cell, with an optional required final heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    pub x: usize,
    pub y: usize,
    pub heading: Option<Heading>,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.x,
            self.y,
            self.heading.map_or(8, Heading::index)
        )
    }
}

/// The search problem: reach the goal cell (and heading, when one is
/// required) at minimal total cost.
pub struct DrillingRobot {
    map: Map,
    initial: RobotState,
    goal: Goal,
}

impl DrillingRobot {
    pub fn new(map: Map, initial: RobotState, goal: Goal) -> Result<Self> {
        ensure!(
            map.contains(initial.x as i64, initial.y as i64),
            "initial position ({}, {}) is outside the {}x{} map",
            initial.x,
            initial.y,
            map.rows,
            map.cols
        );
        ensure!(
            map.contains(goal.x as i64, goal.y as i64),
            "goal position ({}, {}) is outside the {}x{} map",
            goal.x,
            goal.y,
            map.rows,
            map.cols
        );
        Ok(DrillingRobot { map, initial, goal })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read map file {}", path.display()))?;
        text.parse()
            .with_context(|| format!("malformed map file {}", path.display()))
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// The file representation this problem was (or could have been)
    /// loaded from.
    pub fn to_file_string(&self) -> String {
        let mut out = format!("{} {}\n", self.map.rows, self.map.cols);
        for x in 0..self.map.rows {
            let row = (0..self.map.cols)
                .map(|y| self.map.hardness(x, y).to_string())
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(&row);
            out.push('\n');
        }
        out.push_str(&format!(
            "{} {} {}\n",
            self.initial.x,
            self.initial.y,
            self.initial.heading.index()
        ));
        out.push_str(&format!(
            "{} {} {}\n",
            self.goal.x,
            self.goal.y,
            self.goal.heading.map_or(8, Heading::index)
        ));
        out
    }
}

impl FromStr for DrillingRobot {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate();

        let (_, header) = lines.next().context("missing dimensions line")?;
        let dims = parse_fields::<usize>(header, 1)?;
        ensure!(
            dims.len() == 2,
            "line 1: expected \"rows cols\", found {:?}",
            header
        );
        let (rows, cols) = (dims[0], dims[1]);

        let mut grid = Vec::with_capacity(rows);
        for row in 0..rows {
            let (index, line) = lines
                .next()
                .with_context(|| format!("missing hardness row {} of {}", row + 1, rows))?;
            let values = parse_fields::<u32>(line, index + 1)?;
            ensure!(
                values.len() == cols,
                "line {}: expected {} hardness values, found {}",
                index + 1,
                cols,
                values.len()
            );
            grid.push(values);
        }
        let map = Map::from_grid(grid)?;

        let (index, line) = lines.next().context("missing initial state line")?;
        let initial = parse_initial(line, index + 1)?;

        let (index, line) = lines.next().context("missing goal state line")?;
        let goal = parse_goal(line, index + 1)?;

        DrillingRobot::new(map, initial, goal)
    }
}

fn parse_fields<T>(line: &str, line_no: usize) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<T>()
                .with_context(|| format!("line {}: cannot parse {:?}", line_no, token))
        })
        .collect()
}

fn parse_initial(line: &str, line_no: usize) -> Result<RobotState> {
    let fields = parse_fields::<usize>(line, line_no)?;
    ensure!(
        fields.len() == 3,
        "line {}: expected \"x y o\", found {:?}",
        line_no,
        line
    );
    let heading = u8::try_from(fields[2])
        .ok()
        .and_then(Heading::from_index)
        .with_context(|| {
            format!(
                "line {}: orientation must be in 0..=7, found {}",
                line_no, fields[2]
            )
        })?;
    Ok(RobotState {
        x: fields[0],
        y: fields[1],
        heading,
    })
}

fn parse_goal(line: &str, line_no: usize) -> Result<Goal> {
    let fields = parse_fields::<usize>(line, line_no)?;
    ensure!(
        fields.len() == 3,
        "line {}: expected \"x y o\", found {:?}",
        line_no,
        line
    );
    let heading = match fields[2] {
        8 => None,
        other => Some(
            u8::try_from(other)
                .ok()
                .and_then(Heading::from_index)
                .with_context(|| {
                    format!(
                        "line {}: goal orientation must be in 0..=8, found {}",
                        line_no, other
                    )
                })?,
        ),
    };
    Ok(Goal {
        x: fields[0],
        y: fields[1],
        heading,
    })
}

impl Problem for DrillingRobot {
    type State = RobotState;
    type Action = Action;

    fn initial(&self) -> RobotState {
        self.initial
    }

    fn actions(&self, state: &RobotState) -> Vec<Action> {
        let mut actions = vec![Action::TurnLeft, Action::TurnRight];
        let (dx, dy) = state.heading.delta();
        if self.map.contains(state.x as i64 + dx, state.y as i64 + dy) {
            actions.push(Action::Drill);
        }
        actions
    }

    fn result(&self, state: &RobotState, action: &Action) -> RobotState {
        match action {
            Action::TurnLeft => RobotState {
                heading: state.heading.left(),
                ..*state
            },
            Action::TurnRight => RobotState {
                heading: state.heading.right(),
                ..*state
            },
            // actions() only offers DRILL when the cell ahead exists.
            Action::Drill => {
                let (dx, dy) = state.heading.delta();
                RobotState {
                    x: (state.x as i64 + dx) as usize,
                    y: (state.y as i64 + dy) as usize,
                    heading: state.heading,
                }
            }
        }
    }

    fn goal_test(&self, state: &RobotState) -> bool {
        state.x == self.goal.x
            && state.y == self.goal.y
            && self.goal.heading.map_or(true, |heading| heading == state.heading)
    }

    /// Turning costs one unit; drilling costs the hardness of the cell the
    /// robot enters.
    fn path_cost(
        &self,
        cost: f64,
        _state1: &RobotState,
        action: &Action,
        state2: &RobotState,
    ) -> f64 {
        match action {
            Action::TurnLeft | Action::TurnRight => cost + 1.0,
            Action::Drill => cost + f64::from(self.map.hardness(state2.x, state2.y)),
        }
    }

    fn heuristic(&self) -> Option<Heuristic<'_, Self>> {
        Some(HeuristicKind::Manhattan.resolve(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "2 3\n1 2 3\n4 5 6\n0 0 2\n1 2 8\n";

    #[test]
    fn parses_and_writes_the_file_format() {
        let problem: DrillingRobot = SAMPLE.parse().unwrap();
        assert_eq!(problem.map().rows, 2);
        assert_eq!(problem.map().cols, 3);
        assert_eq!(problem.map().hardness(1, 1), 5);
        assert_eq!(
            problem.initial(),
            RobotState {
                x: 0,
                y: 0,
                heading: Heading::East
            }
        );
        assert_eq!(problem.goal().heading, None);
        assert_eq!(problem.to_file_string(), SAMPLE);
    }

    #[test]
    fn rejects_bad_orientation() {
        let err = "1 1\n1\n0 0 9\n0 0 8\n"
            .parse::<DrillingRobot>()
            .err()
            .unwrap();
        assert!(err.to_string().contains("orientation"));
    }

    #[test]
    fn rejects_truncated_input() {
        let err = "2 2\n1 1\n".parse::<DrillingRobot>().err().unwrap();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn rejects_out_of_bounds_goal() {
        let err = "2 2\n1 1\n1 1\n0 0 0\n5 5 8\n"
            .parse::<DrillingRobot>()
            .err()
            .unwrap();
        assert!(err.to_string().contains("outside"));
    }

    #[test]
    fn headings_wrap_and_step_correctly() {
        assert_eq!(Heading::North.left(), Heading::NorthWest);
        assert_eq!(Heading::NorthWest.right(), Heading::North);
        assert_eq!(Heading::East.right(), Heading::SouthEast);
        assert_eq!(Heading::SouthEast.delta(), (1, 1));
        assert_eq!(Heading::from_index(6), Some(Heading::West));
        assert_eq!(Heading::from_index(8), None);
        assert_eq!(Heading::South.to_string(), "South (4)");
    }

    #[test]
    fn drill_is_withheld_at_the_edge() {
        let problem: DrillingRobot = "2 2\n1 1\n1 1\n0 0 0\n1 1 8\n".parse().unwrap();
        // Facing north at the top-left corner: the cell ahead is off-map.
        let state = problem.initial();
        assert_eq!(
            problem.actions(&state),
            vec![Action::TurnLeft, Action::TurnRight]
        );
        // Facing south-east the diagonal neighbor exists.
        let state = RobotState {
            heading: Heading::SouthEast,
            ..state
        };
        assert_eq!(
            problem.actions(&state),
            vec![Action::TurnLeft, Action::TurnRight, Action::Drill]
        );
    }

    #[test]
    fn transitions_turn_in_place_and_drill_forward() {
        let problem: DrillingRobot = SAMPLE.parse().unwrap();
        let start = problem.initial();
        let left = problem.result(&start, &Action::TurnLeft);
        assert_eq!((left.x, left.y), (0, 0));
        assert_eq!(left.heading, Heading::NorthEast);
        let right = problem.result(&start, &Action::TurnRight);
        assert_eq!(right.heading, Heading::SouthEast);
        let drilled = problem.result(&start, &Action::Drill);
        assert_eq!(
            drilled,
            RobotState {
                x: 0,
                y: 1,
                heading: Heading::East
            }
        );
    }

    #[test]
    fn goal_test_honours_optional_heading() {
        let any: DrillingRobot = "1 2\n1 1\n0 0 2\n0 1 8\n".parse().unwrap();
        let reached = RobotState {
            x: 0,
            y: 1,
            heading: Heading::SouthWest,
        };
        assert!(any.goal_test(&reached));

        let exact: DrillingRobot = "1 2\n1 1\n0 0 2\n0 1 4\n".parse().unwrap();
        assert!(!exact.goal_test(&reached));
        assert!(exact.goal_test(&RobotState {
            x: 0,
            y: 1,
            heading: Heading::South,
        }));
    }

    #[test]
    fn drilling_costs_the_entered_cell() {
        let problem: DrillingRobot = SAMPLE.parse().unwrap();
        let start = problem.initial();
        let ahead = problem.result(&start, &Action::Drill);
        assert_eq!(problem.path_cost(0.0, &start, &Action::Drill, &ahead), 2.0);
        let turned = problem.result(&start, &Action::TurnLeft);
        assert_eq!(
            problem.path_cost(5.0, &start, &Action::TurnLeft, &turned),
            6.0
        );
    }
}
