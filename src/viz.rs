//! DOT rendering of the exploration graph.
//!
//! Colouring:
//!   lightgreen = nodes on the solution path
//!   lightcoral = expanded nodes
//!   lightblue  = generated but never expanded

use std::collections::HashSet;
use std::fmt::Display;
use std::io::{self, Write};

use crate::problem::Problem;
use crate::search::SearchOutcome;

/// Writes the outcome as a Graphviz digraph. Nodes are keyed by state and
/// appear in generation order; edges carry the action that produced the
/// child.
pub fn write_dot<P, W>(outcome: &SearchOutcome<P>, w: W) -> io::Result<()>
where
    P: Problem,
    P::State: Display,
    P::Action: Display,
    W: Write,
{
    let mut writer = DotWriter::new(w);
    writer.begin_digraph("search_tree")?;

    writer.attr("rankdir", "TB")?;
    writer.attr("splines", "polyline")?;
    writer.attr("overlap", "false")?;
    writer.attr("dpi", "150")?;
    writer.attr("ranksep", "1.5")?;
    writer.attr("nodesep", "0.7")?;
    writer.attr("concentrate", "false")?;
    writer.defaults(
        "node",
        &[
            ("shape", "box"),
            ("width", "2.2"),
            ("height", "0.9"),
            ("fixedsize", "true"),
            ("style", "filled"),
            ("fontsize", "12"),
        ],
    )?;
    writer.defaults(
        "edge",
        &[
            ("fontsize", "13"),
            ("labelfloat", "true"),
            ("labeldistance", "2.5"),
            ("labelangle", "-20"),
        ],
    )?;

    let solution_states: HashSet<P::State> = outcome
        .solution
        .as_ref()
        .map(|solution| {
            solution
                .path()
                .iter()
                .map(|node| node.state.clone())
                .collect()
        })
        .unwrap_or_default();
    let expanded_states: HashSet<P::State> = outcome
        .expanded
        .iter()
        .map(|node| node.state.clone())
        .collect();

    for node in &outcome.generation_log {
        let fill = if solution_states.contains(&node.state) {
            "lightgreen"
        } else if expanded_states.contains(&node.state) {
            "lightcoral"
        } else {
            "lightblue"
        };
        let label = format!(
            "#{}\nS: {}\nd: {}\ng(n): {:.1}",
            node.generation_order(),
            node.state,
            node.depth,
            node.path_cost
        );
        writer.node(
            &node.state.to_string(),
            &[("label", label.as_str()), ("fillcolor", fill)],
        )?;
    }

    for (parent, child) in &outcome.edges {
        let label = child
            .action
            .as_ref()
            .map_or_else(String::new, |action| action.to_string());
        writer.edge(
            &parent.state.to_string(),
            &child.state.to_string(),
            &[("label", label.as_str())],
        )?;
    }

    writer.end_digraph()
}

struct DotWriter<W> {
    w: W,
    indent: usize,
}

impl<W: Write> DotWriter<W> {
    fn new(w: W) -> Self {
        Self { w, indent: 0 }
    }

    fn begin_digraph(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.w, "digraph {} {{", name)?;
        self.indent += 1;
        Ok(())
    }

    fn end_digraph(&mut self) -> io::Result<()> {
        self.indent -= 1;
        writeln!(self.w, "}}")
    }

    fn attr(&mut self, key: &str, val: &str) -> io::Result<()> {
        self.write_indent()?;
        writeln!(self.w, "{}={};", key, quote(val))
    }

    /// Default attributes for every following node or edge statement.
    fn defaults(&mut self, target: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
        self.write_indent()?;
        write!(self.w, "{} [", target)?;
        for (k, v) in attrs {
            write!(self.w, "{}={} ", k, quote(v))?;
        }
        writeln!(self.w, "];")
    }

    // State strings contain spaces and commas, so identifiers are always
    // quoted.
    fn node(&mut self, id: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
        self.write_indent()?;
        write!(self.w, "{} [", quote(id))?;
        for (k, v) in attrs {
            write!(self.w, "{}={} ", k, quote(v))?;
        }
        writeln!(self.w, "];")
    }

    fn edge(&mut self, src: &str, dst: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
        self.write_indent()?;
        write!(self.w, "{} -> {} [", quote(src), quote(dst))?;
        for (k, v) in attrs {
            write!(self.w, "{}={} ", k, quote(v))?;
        }
        writeln!(self.w, "];")
    }

    fn write_indent(&mut self) -> io::Result<()> {
        for _ in 0..self.indent {
            write!(self.w, "  ")?;
        }
        Ok(())
    }
}

/// Wraps the string in quotes, escaping quotes and newlines for DOT.
fn quote(s: &str) -> String {
    format!("{:?}", s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drilling::DrillingRobot;
    use crate::search::breadth_first_graph_search;

    fn render<P>(outcome: &SearchOutcome<P>) -> String
    where
        P: Problem,
        P::State: Display,
        P::Action: Display,
    {
        let mut buffer = Vec::new();
        write_dot(outcome, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn a_solved_run_colours_all_three_roles() {
        let problem: DrillingRobot = "1 3\n1 1 1\n0 0 2\n0 2 8\n".parse().unwrap();
        let outcome = breadth_first_graph_search(&problem);
        let dot = render(&outcome);

        assert!(dot.starts_with("digraph search_tree {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("rankdir=\"TB\";"));
        assert!(dot.contains("node [shape=\"box\" width=\"2.2\""));
        assert!(dot.contains("edge [fontsize=\"13\""));
        // Root node: on the solution path, tagged #0.
        assert!(dot.contains(
            "\"(0, 0, 2)\" [label=\"#0\\nS: (0, 0, 2)\\nd: 0\\ng(n): 0.0\" fillcolor=\"lightgreen\" ];"
        ));
        assert!(dot.contains("fillcolor=\"lightcoral\""));
        assert!(dot.contains("fillcolor=\"lightblue\""));
        assert!(dot.contains("\"(0, 1, 2)\" -> \"(0, 2, 2)\" [label=\"DRILL\" ];"));
    }

    #[test]
    fn every_generated_node_and_edge_is_drawn() {
        let problem: DrillingRobot = "2 2\n1 1\n1 1\n0 0 2\n1 1 8\n".parse().unwrap();
        let outcome = breadth_first_graph_search(&problem);
        let dot = render(&outcome);

        let nodes = dot.matches(" [label=\"#").count();
        assert_eq!(nodes, outcome.generation_log.len());
        let arrows = dot.matches(" -> ").count();
        assert_eq!(arrows, outcome.edges.len());
    }

    #[test]
    fn an_unsolved_run_has_no_green_nodes() {
        struct Stuck;

        impl Problem for Stuck {
            type State = u8;
            type Action = u8;

            fn initial(&self) -> u8 {
                0
            }

            fn actions(&self, _state: &u8) -> Vec<u8> {
                Vec::new()
            }

            fn result(&self, _state: &u8, action: &u8) -> u8 {
                *action
            }

            fn goal_test(&self, _state: &u8) -> bool {
                false
            }
        }

        let outcome = breadth_first_graph_search(&Stuck);
        let dot = render(&outcome);
        assert!(dot.contains("\"0\" [label=\"#0\\nS: 0\\nd: 0\\ng(n): 0.0\" fillcolor=\"lightcoral\" ];"));
        assert!(!dot.contains("lightgreen"));
        assert!(!dot.contains(" -> "));
    }
}
