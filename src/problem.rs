use std::fmt::Debug;
use std::hash::Hash;

use crate::node::Node;

/// Cost-to-go estimate, resolved to a concrete function before a search
/// starts. Smaller is better; must never be negative.
pub type Heuristic<'a, P> = Box<dyn Fn(&Node<P>) -> f64 + 'a>;

/// Contract for a state-space search problem.
///
/// Implementors describe the space (actions, deterministic transitions,
/// step costs, goal test) and the search drivers in [`crate::search`] do the
/// exploring. `State` equality/hashing define duplicate detection, and its
/// total order is used as a deterministic tie-break in priority frontiers.
pub trait Problem: Sized {
    type State: Clone + Eq + Hash + Ord + Debug;
    type Action: Clone + Eq + Debug;

    /// The state the search starts from.
    fn initial(&self) -> Self::State;

    /// Every action legally applicable in `state`.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The state reached by applying `action` in `state`. Deterministic;
    /// only called with actions reported by [`Problem::actions`].
    fn result(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    fn goal_test(&self, state: &Self::State) -> bool;

    /// Accumulated cost of reaching `state2` from `state1` via `action`,
    /// given cost `cost` up to `state1`. Pure function of its arguments.
    /// Defaults to one unit per transition.
    fn path_cost(
        &self,
        cost: f64,
        _state1: &Self::State,
        _action: &Self::Action,
        _state2: &Self::State,
    ) -> f64 {
        cost + 1.0
    }

    /// Default heuristic for informed search, if the problem carries one.
    /// [`crate::search::astar_search`] falls back to this when the caller
    /// does not pass a heuristic, and errors out when both are absent.
    fn heuristic(&self) -> Option<Heuristic<'_, Self>> {
        None
    }
}
