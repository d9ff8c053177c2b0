use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::problem::Problem;

/// A node in the search tree: a record of how a state was reached.
///
/// The same state may appear in several nodes (reached along different
/// routes) before deduplication kicks in; parent links form a tree rooted at
/// the initial-state node, with shared ownership because siblings keep the
/// same parent alive. Parent chains are strictly acyclic: depth strictly
/// increases from root to leaf.
///
/// Equality, hashing and ordering are defined **by state only**: two nodes
/// with the same state are interchangeable in frontier membership tests no
/// matter their cost or parent. The duplicate handling in the drivers
/// depends on this.
pub struct Node<P: Problem> {
    pub state: P::State,
    pub parent: Option<Rc<Node<P>>>,
    pub action: Option<P::Action>,
    pub path_cost: f64,
    pub depth: usize,
    // Telemetry tags, written once by the telemetry sink. Cells keep the
    // node shareable through plain Rc.
    generation_order: Cell<usize>,
    expansion_order: Cell<Option<usize>>,
}

impl<P: Problem> Node<P> {
    /// The root node for `problem`'s initial state.
    pub fn root(problem: &P) -> Rc<Self> {
        Rc::new(Node {
            state: problem.initial(),
            parent: None,
            action: None,
            path_cost: 0.0,
            depth: 0,
            generation_order: Cell::new(0),
            expansion_order: Cell::new(None),
        })
    }

    /// The child reached by applying `action` here.
    pub fn child(self: &Rc<Self>, problem: &P, action: P::Action) -> Rc<Self> {
        let next_state = problem.result(&self.state, &action);
        let path_cost = problem.path_cost(self.path_cost, &self.state, &action, &next_state);
        Rc::new(Node {
            state: next_state,
            parent: Some(Rc::clone(self)),
            action: Some(action),
            path_cost,
            depth: self.depth + 1,
            generation_order: Cell::new(0),
            expansion_order: Cell::new(None),
        })
    }

    /// One child per action legal in this node's state.
    pub fn expand(self: &Rc<Self>, problem: &P) -> Vec<Rc<Self>> {
        problem
            .actions(&self.state)
            .into_iter()
            .map(|action| self.child(problem, action))
            .collect()
    }

    /// Nodes from the root down to this one. Iterative walk, so path depth
    /// is bounded by memory rather than stack.
    pub fn path(self: &Rc<Self>) -> Vec<Rc<Self>> {
        let mut back = vec![Rc::clone(self)];
        let mut current = Rc::clone(self);
        while let Some(parent) = current.parent.as_ref() {
            back.push(Rc::clone(parent));
            current = Rc::clone(parent);
        }
        back.reverse();
        back
    }

    /// The actions leading from the root to this node (the root carries
    /// none).
    pub fn solution(self: &Rc<Self>) -> Vec<P::Action> {
        self.path()
            .iter()
            .filter_map(|node| node.action.clone())
            .collect()
    }

    /// Position of this node in the generation sequence (root = 0).
    pub fn generation_order(&self) -> usize {
        self.generation_order.get()
    }

    /// Position in the expansion sequence, once the node has been popped
    /// from a frontier for expansion.
    pub fn expansion_order(&self) -> Option<usize> {
        self.expansion_order.get()
    }

    pub(crate) fn mark_generated(&self, order: usize) {
        self.generation_order.set(order);
    }

    pub(crate) fn mark_expanded(&self, order: usize) {
        self.expansion_order.set(Some(order));
    }
}

impl<P: Problem> PartialEq for Node<P> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl<P: Problem> Eq for Node<P> {}

impl<P: Problem> Hash for Node<P> {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.state.hash(hasher);
    }
}

impl<P: Problem> PartialOrd for Node<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: Problem> Ord for Node<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.state.cmp(&other.state)
    }
}

impl<P: Problem> fmt::Debug for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Node {:?}>", self.state)
    }
}
