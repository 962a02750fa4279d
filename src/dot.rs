//! Graphviz rendering of a state graph.

use std::{collections::HashMap, fmt::Write};

use crate::{GraphNode, Graph};

/// Render `graph` as a dot digraph. Node labels list at most `label_events` events.
pub fn render(graph: &Graph, label_events: usize) -> String {
    let index = graph
        .states()
        .enumerate()
        .map(|(idx, state)| (*state, idx))
        .collect::<HashMap<_, _>>();

    let mut out = String::new();
    out.push_str("digraph finite_state_machine {\n");
    out.push_str("    node [shape = point ]; state_init\n");
    for (idx, (_, node)) in graph.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "    node [shape = circle, label=\"{}\"] state_{};",
            label(node, label_events),
            idx
        );
    }
    for (state, node) in graph.iter() {
        for next in &node.successors {
            let _ = writeln!(out, "    state_{} -> state_{}", index[state], index[next]);
        }
    }
    let _ = writeln!(out, "    state_init -> state_{}", index[&graph.initial]);
    out.push_str("}\n");
    out
}

fn label(node: &GraphNode, limit: usize) -> String {
    if node.events.is_empty() {
        return " ".into();
    }
    node.events.iter().take(limit).map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{optimize, Grid, Options};

    #[test]
    fn corridor_diagram() {
        let (raw, _) = Graph::build(&Grid::parse("+++.\n====")).unwrap();
        let graph = optimize(&raw, &Options::default());
        assert_eq!(
            render(&graph, 30),
            "digraph finite_state_machine {\n\
             \x20   node [shape = point ]; state_init\n\
             \x20   node [shape = circle, label=\"3+1.\"] state_0;\n\
             \x20   node [shape = circle, label=\" \"] state_1;\n\
             \x20   state_0 -> state_1\n\
             \x20   state_init -> state_0\n\
             }\n"
        );
    }

    #[test]
    fn labels_are_truncated() {
        let (raw, _) = Graph::build(&Grid::parse("+-+-\n====")).unwrap();
        let graph = optimize(&raw, &Options::default());
        assert!(render(&graph, 2).contains("label=\"1+1-\""));
    }

    #[test]
    fn branch_has_two_edges() {
        let (graph, _) = Graph::build(&Grid::parse("[:\n==")).unwrap();
        let dot = render(&graph, 30);
        let branch_edges = dot.lines().filter(|line| line.starts_with("    state_0 -> ")).count();
        assert_eq!(branch_edges, 2);
    }
}
