use std::collections::HashSet;
use std::rc::Rc;

use tracing::{debug, instrument, trace};

use crate::node::Node;
use crate::problem::Problem;
use crate::search::{SearchOutcome, Telemetry};

/// Depth-first graph search.
///
/// The frontier is a LIFO stack, so the most recently generated child is
/// expanded first. Children are goal-tested when generated; a state already
/// expanded or already waiting in the frontier is never registered again.
/// Complete on finite spaces, but the path it returns carries no optimality
/// guarantee.
#[instrument(skip_all, name = "dfs", level = "debug")]
pub fn depth_first_graph_search<P: Problem>(problem: &P) -> SearchOutcome<P> {
    let mut telemetry = Telemetry::new();
    let root = Node::root(problem);
    telemetry.record_root(&root);
    if problem.goal_test(&root.state) {
        debug!("initial state satisfies the goal");
        return telemetry.into_outcome(Some(root), Vec::new());
    }

    let mut frontier: Vec<Rc<Node<P>>> = vec![Rc::clone(&root)];
    let mut frontier_states: HashSet<P::State> = HashSet::from([root.state.clone()]);
    let mut explored: HashSet<P::State> = HashSet::new();

    while let Some(node) = frontier.pop() {
        frontier_states.remove(&node.state);
        if explored.contains(&node.state) {
            // Stale entry for a state expanded since it was pushed.
            continue;
        }
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
                return telemetry.into_outcome(Some(child), frontier);
            }
            frontier_states.insert(child.state.clone());
            frontier.push(child);
        }
    }

    debug!("frontier exhausted without reaching a goal");
    telemetry.into_outcome(None, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drilling::{DrillingRobot, Goal, Heading, RobotState};
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
    fn solved_at_the_root() {
        init_tracing();
        let problem = robot(vec![vec![1]], (0, 0, Heading::North), (0, 0, None));
        let outcome = depth_first_graph_search(&problem);
        let solution = outcome.solution.as_ref().unwrap();
        assert_eq!(solution.depth, 0);
        assert_eq!(solution.path_cost, 0.0);
        assert!(outcome.frontier.is_empty());
        assert!(outcome.expanded.is_empty());
        assert_eq!(outcome.generated.len(), 1);
    }

    #[test]
    fn reaches_a_goal_on_a_small_grid() {
        init_tracing();
        let problem = robot(
            vec![vec![1, 1], vec![1, 1]],
            (0, 0, Heading::East),
            (1, 1, None),
        );
        let outcome = depth_first_graph_search(&problem);
        let solution = outcome.solution.as_ref().unwrap();
        assert_eq!(solution.state.x, 1);
        assert_eq!(solution.state.y, 1);
        assert!(solution.depth >= 2);

        // Dedup: no state is registered twice, and expansion never revisits.
        let states: HashSet<_> = outcome
            .generation_log
            .iter()
            .map(|node| node.state.clone())
            .collect();
        assert_eq!(states.len(), outcome.generation_log.len());
        for (index, node) in outcome.generation_log.iter().enumerate() {
            assert_eq!(node.generation_order(), index);
        }
        for node in &outcome.frontier {
            assert!(!outcome.expanded.contains(node));
        }
    }

    // A one-way street that never reaches a goal.
    struct DeadEnd;

    impl Problem for DeadEnd {
        type State = u8;
        type Action = u8;

        fn initial(&self) -> u8 {
            0
        }

        fn actions(&self, state: &u8) -> Vec<u8> {
            if *state == 0 {
                vec![1]
            } else {
                vec![]
            }
        }

        fn result(&self, _state: &u8, action: &u8) -> u8 {
            *action
        }

        fn goal_test(&self, _state: &u8) -> bool {
            false
        }
    }

    #[test]
    fn exhausts_the_space_without_a_goal() {
        init_tracing();
        let outcome = depth_first_graph_search(&DeadEnd);
        assert!(!outcome.is_solved());
        assert!(outcome.frontier.is_empty());
        assert_eq!(outcome.generated.len(), 2);
        assert_eq!(outcome.expanded.len(), 2);
    }
}
