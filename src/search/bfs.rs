use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use tracing::{debug, instrument, trace};

use crate::node::Node;
use crate::problem::Problem;
use crate::search::{SearchOutcome, Telemetry};

/// Breadth-first graph search.
///
/// The frontier is a FIFO queue and children are goal-tested when generated,
/// so the first solution found has minimal depth. When the initial state
/// already satisfies the goal the run ends with an empty frontier and no
/// expansions.
#[instrument(skip_all, name = "bfs", level = "debug")]
pub fn breadth_first_graph_search<P: Problem>(problem: &P) -> SearchOutcome<P> {
    let mut telemetry = Telemetry::new();
    let root = Node::root(problem);
    telemetry.record_root(&root);
    if problem.goal_test(&root.state) {
        debug!("initial state satisfies the goal");
        return telemetry.into_outcome(Some(root), Vec::new());
    }

    let mut frontier: VecDeque<Rc<Node<P>>> = VecDeque::from([Rc::clone(&root)]);
    let mut frontier_states: HashSet<P::State> = HashSet::from([root.state.clone()]);
    let mut explored: HashSet<P::State> = HashSet::new();

    while let Some(node) = frontier.pop_front() {
        frontier_states.remove(&node.state);
        explored.insert(node.state.clone());
        telemetry.record_expanded(&node);
        trace!(node = ?node, depth = node.depth, g = node.path_cost, "expand");

        for child in node.expand(problem) {
            if explored.contains(&child.state) || frontier_states.contains(&child.state) {
                continue;
            }
            telemetry.record_generated(&child);
            if problem.goal_test(&child.state) {
                debug!(depth = child.depth, g = child.path_cost, "goal reached");
                return telemetry.into_outcome(Some(child), frontier.into_iter().collect());
            }
            frontier_states.insert(child.state.clone());
            frontier.push_back(child);
        }
    }

    debug!("frontier exhausted without reaching a goal");
    telemetry.into_outcome(None, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drilling::{Action, DrillingRobot, Goal, Heading, RobotState};
    use crate::map::Map;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("trace")
            .try_init();
    }

    fn robot(
        grid: Vec<Vec<u32>>,
        initial: (usize, usize, Heading),
        goal: (usize, usize, Option<Heading>),
    ) -> DrillingRobot {
        let map = Map::from_grid(grid).unwrap();
        DrillingRobot::new(
            map,
            RobotState {
                x: initial.0,
                y: initial.1,
                heading: initial.2,
            },
            Goal {
                x: goal.0,
                y: goal.1,
                heading: goal.2,
            },
        )
        .unwrap()
    }

    #[test]
    fn initial_goal_returns_with_an_empty_frontier() {
        init_tracing();
        let problem = robot(vec![vec![1, 1]], (0, 0, Heading::East), (0, 0, None));
        let outcome = breadth_first_graph_search(&problem);
        let solution = outcome.solution.as_ref().unwrap();
        assert_eq!(solution.depth, 0);
        assert!(outcome.frontier.is_empty());
        assert!(outcome.expanded.is_empty());
        assert_eq!(outcome.generated.len(), 1);
    }

    #[test]
    fn finds_the_shallowest_goal() {
        init_tracing();
        let problem = robot(
            vec![vec![1, 1, 1]],
            (0, 0, Heading::East),
            (0, 2, None),
        );
        let outcome = breadth_first_graph_search(&problem);
        let solution = outcome.solution.as_ref().unwrap();
        assert_eq!(solution.depth, 2);
        assert_eq!(solution.path_cost, 2.0);
        assert_eq!(solution.solution(), vec![Action::Drill, Action::Drill]);
    }

    #[test]
    fn never_registers_a_state_twice() {
        init_tracing();
        let problem = robot(
            vec![vec![1, 1], vec![1, 1]],
            (0, 0, Heading::North),
            (1, 1, Some(Heading::South)),
        );
        let outcome = breadth_first_graph_search(&problem);
        assert!(outcome.is_solved());
        let states: HashSet<_> = outcome
            .generation_log
            .iter()
            .map(|node| node.state.clone())
            .collect();
        assert_eq!(states.len(), outcome.generation_log.len());
        // Expanded and frontier never overlap.
        for node in &outcome.frontier {
            assert!(!outcome.expanded.contains(node));
        }
        // Each expanded state took exactly one expansion slot.
        let orders: HashSet<_> = outcome
            .expanded
            .iter()
            .map(|node| node.expansion_order().unwrap())
            .collect();
        assert_eq!(orders.len(), outcome.expanded.len());
    }
}
