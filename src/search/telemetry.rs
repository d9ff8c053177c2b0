use std::collections::HashSet;
use std::rc::Rc;

use crate::node::Node;
use crate::problem::Problem;

/// Exploration record shared by all search drivers.
///
/// Tags are assigned when events happen: a node receives its generation
/// order the moment it is first registered (the root is 0, every admitted
/// child takes the next value) and its expansion order when it is popped
/// from the frontier to be expanded. A state is registered at most once per
/// run, so `generated` holds the first node seen for each state even when a
/// frontier entry is later replaced by a cheaper route.
pub struct Telemetry<P: Problem> {
    generated: HashSet<Rc<Node<P>>>,
    expanded: HashSet<Rc<Node<P>>>,
    edges: Vec<(Rc<Node<P>>, Rc<Node<P>>)>,
    generation_log: Vec<Rc<Node<P>>>,
    next_generation: usize,
    next_expansion: usize,
}

impl<P: Problem> Telemetry<P> {
    pub fn new() -> Self {
        Telemetry {
            generated: HashSet::new(),
            expanded: HashSet::new(),
            edges: Vec::new(),
            generation_log: Vec::new(),
            next_generation: 0,
            next_expansion: 0,
        }
    }

    /// Registers the root node. Must be called exactly once, before any
    /// other recording.
    pub fn record_root(&mut self, root: &Rc<Node<P>>) {
        debug_assert_eq!(self.next_generation, 0);
        root.mark_generated(0);
        self.next_generation = 1;
        self.generated.insert(Rc::clone(root));
        self.generation_log.push(Rc::clone(root));
    }

    /// Registers a freshly generated child and the edge from its parent.
    pub fn record_generated(&mut self, child: &Rc<Node<P>>) {
        child.mark_generated(self.next_generation);
        self.next_generation += 1;
        if let Some(parent) = child.parent.as_ref() {
            self.edges.push((Rc::clone(parent), Rc::clone(child)));
        }
        self.generated.insert(Rc::clone(child));
        self.generation_log.push(Rc::clone(child));
    }

    /// Marks a node as expanded, in pop order.
    pub fn record_expanded(&mut self, node: &Rc<Node<P>>) {
        node.mark_expanded(self.next_expansion);
        self.next_expansion += 1;
        self.expanded.insert(Rc::clone(node));
    }

    /// Seals the record once the driver stops, attaching the solution (if
    /// one was found) and whatever the frontier still held.
    pub fn into_outcome(
        self,
        solution: Option<Rc<Node<P>>>,
        frontier: Vec<Rc<Node<P>>>,
    ) -> SearchOutcome<P> {
        SearchOutcome {
            solution,
            generated: self.generated,
            expanded: self.expanded,
            edges: self.edges,
            generation_log: self.generation_log,
            frontier,
        }
    }
}

impl<P: Problem> Default for Telemetry<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a finished run reports: the solution, if any, plus the full
/// exploration trace.
pub struct SearchOutcome<P: Problem> {
    /// Goal node; the whole path hangs off its parent chain.
    pub solution: Option<Rc<Node<P>>>,
    /// First node registered for each state the run touched.
    pub generated: HashSet<Rc<Node<P>>>,
    /// Nodes actually expanded, keyed by state.
    pub expanded: HashSet<Rc<Node<P>>>,
    /// Parent-to-child edges in registration order.
    pub edges: Vec<(Rc<Node<P>>, Rc<Node<P>>)>,
    /// Registered nodes in generation order; index equals the node's tag.
    pub generation_log: Vec<Rc<Node<P>>>,
    /// Frontier contents at the moment the driver stopped.
    pub frontier: Vec<Rc<Node<P>>>,
}

impl<P: Problem> SearchOutcome<P> {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Cost of the returned path, when there is one.
    pub fn solution_cost(&self) -> Option<f64> {
        self.solution.as_ref().map(|node| node.path_cost)
    }

    /// Depth of the returned path, when there is one.
    pub fn solution_depth(&self) -> Option<usize> {
        self.solution.as_ref().map(|node| node.depth)
    }
}
