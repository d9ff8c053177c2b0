use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

use anyhow::{bail, Result};
use tracing::{debug, instrument, trace};

use crate::node::Node;
use crate::problem::Problem;
use crate::search::{SearchOutcome, Telemetry};

/// Frontier entry ordered by evaluation value, with the state as a
/// deterministic tie-break. Equal states with equal values collapse into one
/// entry, which the drivers never produce.
struct OpenEntry<P: Problem> {
    f: f64,
    node: Rc<Node<P>>,
}

impl<P: Problem> Ord for OpenEntry<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.node.state.cmp(&other.node.state))
    }
}

impl<P: Problem> PartialOrd for OpenEntry<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: Problem> PartialEq for OpenEntry<P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<P: Problem> Eq for OpenEntry<P> {}

/// Best-first graph search under an arbitrary evaluation function `f`
/// (smaller is better).
///
/// Unlike the blind drivers, the goal test happens when a node is *popped*,
/// so the node returned is the best the frontier ever held for its state. A
/// child whose state already sits in the frontier replaces the entry only
/// when its value is strictly lower; the replacement keeps the original
/// registration in the telemetry. States already expanded are never put
/// back: with a consistent heuristic the first expansion of a state already
/// carries its optimal cost.
#[instrument(skip_all, name = "best_first", level = "debug")]
pub fn best_first_graph_search<P, F>(problem: &P, mut f: F) -> SearchOutcome<P>
where
    P: Problem,
    F: FnMut(&Rc<Node<P>>) -> f64,
{
    let mut telemetry = Telemetry::new();
    let root = Node::root(problem);
    telemetry.record_root(&root);

    let root_f = f(&root);
    let mut frontier: BTreeSet<OpenEntry<P>> = BTreeSet::new();
    // Value of the entry currently in the frontier, keyed by state.
    let mut frontier_f: HashMap<P::State, f64> = HashMap::new();
    frontier_f.insert(root.state.clone(), root_f);
    frontier.insert(OpenEntry {
        f: root_f,
        node: Rc::clone(&root),
    });
    let mut explored: HashSet<P::State> = HashSet::new();

    while let Some(entry) = frontier.pop_first() {
        let node = entry.node;
        frontier_f.remove(&node.state);
        if problem.goal_test(&node.state) {
            debug!(depth = node.depth, g = node.path_cost, "goal reached");
            return telemetry.into_outcome(
                Some(node),
                frontier.into_iter().map(|entry| entry.node).collect(),
            );
        }
        explored.insert(node.state.clone());
        telemetry.record_expanded(&node);
        trace!(node = ?node, f = entry.f, g = node.path_cost, "expand");

        for child in node.expand(problem) {
            if explored.contains(&child.state) {
                continue;
            }
            let child_f = f(&child);
            match frontier_f.get(&child.state) {
                None => {
                    telemetry.record_generated(&child);
                    frontier_f.insert(child.state.clone(), child_f);
                    frontier.insert(OpenEntry {
                        f: child_f,
                        node: child,
                    });
                }
                Some(&held_f) if child_f < held_f => {
                    trace!(node = ?child, old = held_f, new = child_f, "replace frontier entry");
                    // Same state, so the probe matches the held entry.
                    frontier.remove(&OpenEntry {
                        f: held_f,
                        node: Rc::clone(&child),
                    });
                    frontier_f.insert(child.state.clone(), child_f);
                    frontier.insert(OpenEntry {
                        f: child_f,
                        node: child,
                    });
                }
                Some(_) => {}
            }
        }
    }

    debug!("frontier exhausted without reaching a goal");
    telemetry.into_outcome(None, Vec::new())
}

/// A* search: best-first under `f(n) = g(n) + h(n)`.
///
/// The heuristic is taken from the argument first, then from
/// [`Problem::heuristic`]; it is an error for both to be absent. Values are
/// memoized per state, so `h` runs at most once for each distinct state.
#[instrument(skip_all, name = "astar", level = "debug")]
pub fn astar_search<P: Problem>(
    problem: &P,
    heuristic: Option<crate::problem::Heuristic<'_, P>>,
) -> Result<SearchOutcome<P>> {
    let h = match heuristic.or_else(|| problem.heuristic()) {
        Some(h) => h,
        None => bail!("a-star requires a heuristic, and this problem carries no default"),
    };
    let mut memo: HashMap<P::State, f64> = HashMap::new();
    let outcome = best_first_graph_search(problem, move |node| {
        let h_value = match memo.get(&node.state) {
            Some(&value) => value,
            None => {
                let value = h(node);
                memo.insert(node.state.clone(), value);
                value
            }
        };
        node.path_cost + h_value
    });
    Ok(outcome)
}
