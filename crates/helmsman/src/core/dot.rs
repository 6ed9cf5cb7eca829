//! DOT source emission
//!
//! Turns an accumulated [`Diagram`](super::diagram::Diagram) into Graphviz
//! DOT text. Emission is deterministic: nodes, clusters, and edges appear in
//! declaration order, so two builds of the same definition produce
//! byte-identical source.

use std::fmt::Write;

use super::diagram::Diagram;
use super::types::EdgeData;

const GRAPH_FONT: &str = "Sans-Serif";
const CLUSTER_BGCOLOR: &str = "#E5F5FD";
const CLUSTER_PENCOLOR: &str = "#AEB6BE";

/// Escape a string for use inside a double-quoted DOT string
///
/// Newlines become the DOT `\n` escape so multi-line labels render as
/// centered line breaks.
pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("    ");
    }
}

fn emit_node(out: &mut String, diagram: &Diagram, index: usize, depth: usize) {
    let node = &diagram.nodes()[index];
    indent(out, depth);
    let _ = writeln!(
        out,
        "n{} [label=\"{}\", shape=\"{}\", fillcolor=\"{}\"];",
        index,
        escape(&node.label),
        node.category.dot_shape(),
        node.category.fill_color(),
    );
}

fn emit_cluster(
    out: &mut String,
    diagram: &Diagram,
    cluster: usize,
    children: &[Vec<usize>],
    members: &[Vec<usize>],
    depth: usize,
) {
    indent(out, depth);
    let _ = writeln!(out, "subgraph \"cluster_{}\" {{", cluster);
    indent(out, depth + 1);
    let _ = writeln!(
        out,
        "graph [label=\"{}\", labeljust=\"l\", style=\"rounded\", bgcolor=\"{}\", pencolor=\"{}\", fontsize=\"12\"];",
        escape(&diagram.clusters()[cluster].name),
        CLUSTER_BGCOLOR,
        CLUSTER_PENCOLOR,
    );
    for &node in &members[cluster] {
        emit_node(out, diagram, node, depth + 1);
    }
    for &child in &children[cluster] {
        emit_cluster(out, diagram, child, children, members, depth + 1);
    }
    indent(out, depth);
    out.push_str("}\n");
}

fn emit_edge(out: &mut String, edge: &EdgeData) {
    let mut attrs: Vec<String> = Vec::new();
    if let Some(color) = &edge.attr.color {
        attrs.push(format!("color=\"{}\"", color.as_dot()));
    }
    if let Some(style) = &edge.attr.style {
        attrs.push(format!("style=\"{}\"", style.as_dot()));
    }
    if let Some(label) = &edge.attr.label {
        attrs.push(format!("label=\"{}\"", escape(label)));
    }
    if !edge.attr.directed {
        attrs.push("dir=\"none\"".to_string());
    }
    indent(out, 1);
    if attrs.is_empty() {
        let _ = writeln!(out, "n{} -> n{};", edge.from, edge.to);
    } else {
        let _ = writeln!(out, "n{} -> n{} [{}];", edge.from, edge.to, attrs.join(", "));
    }
}

/// Emit the diagram as DOT source
pub(crate) fn emit(diagram: &Diagram) -> String {
    let clusters = diagram.clusters();
    let nodes = diagram.nodes();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); clusters.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (i, c) in clusters.iter().enumerate() {
        match c.parent {
            Some(p) => children[p].push(i),
            None => roots.push(i),
        }
    }

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); clusters.len()];
    let mut top_level: Vec<usize> = Vec::new();
    for (i, n) in nodes.iter().enumerate() {
        match n.cluster {
            Some(c) => members[c].push(i),
            None => top_level.push(i),
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "digraph \"{}\" {{", escape(diagram.title()));
    indent(&mut out, 1);
    let _ = writeln!(
        out,
        "graph [label=\"{}\", labelloc=\"t\", fontsize=\"15\", fontname=\"{}\", rankdir=\"{}\", pad=\"2.0\", nodesep=\"0.60\", ranksep=\"0.75\", splines=\"ortho\"];",
        escape(diagram.title()),
        GRAPH_FONT,
        diagram.direction().as_rankdir(),
    );
    indent(&mut out, 1);
    let _ = writeln!(
        out,
        "node [shape=\"box\", style=\"rounded,filled\", fontname=\"{}\", fontsize=\"13\", fillcolor=\"white\"];",
        GRAPH_FONT,
    );
    indent(&mut out, 1);
    let _ = writeln!(out, "edge [fontname=\"{}\", fontsize=\"11\"];", GRAPH_FONT);

    for &node in &top_level {
        emit_node(&mut out, diagram, node, 1);
    }
    for &root in &roots {
        emit_cluster(&mut out, diagram, root, &children, &members, 1);
    }
    for edge in diagram.edges() {
        emit_edge(&mut out, edge);
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diagram::Diagram;
    use crate::core::types::{Category, Color, Direction, EdgeAttr, EdgeStyle};

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a \"quote\""), "a \\\"quote\\\"");
        assert_eq!(escape("two\nlines"), "two\\nlines");
        assert_eq!(escape("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_emit_minimal_graph() {
        let mut d = Diagram::new("Minimal", Direction::LeftRight);
        let a = d.node(Category::Pod, "A");
        let b = d.node(Category::Pod, "B");
        d.edge(a, b, EdgeAttr::new()).unwrap();

        let dot = d.to_dot();
        assert!(dot.starts_with("digraph \"Minimal\" {"));
        assert!(dot.contains("rankdir=\"LR\""));
        assert!(dot.contains("n0 [label=\"A\""));
        assert!(dot.contains("n1 [label=\"B\""));
        assert!(dot.contains("n0 -> n1;"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_emit_edge_attributes() {
        let mut d = Diagram::new("Attrs", Direction::TopDown);
        let a = d.node(Category::ConfigMap, "cfg");
        let b = d.node(Category::Pod, "app");
        d.edge(
            a,
            b,
            EdgeAttr::new()
                .color(Color::Brown)
                .style(EdgeStyle::Dotted)
                .label("configure"),
        )
        .unwrap();

        let dot = d.to_dot();
        assert!(dot.contains(
            "n0 -> n1 [color=\"brown\", style=\"dotted\", label=\"configure\"];"
        ));
    }

    #[test]
    fn test_emit_undirected_edge() {
        let mut d = Diagram::new("Undirected", Direction::TopDown);
        let a = d.node(Category::Namespace, "ns");
        let b = d.node(Category::Secret, "secret");
        d.link(a, b, EdgeAttr::new()).unwrap();

        let dot = d.to_dot();
        assert!(dot.contains("dir=\"none\""));
    }

    #[test]
    fn test_emit_nested_clusters() {
        let mut d = Diagram::new("Nested", Direction::TopDown);
        d.cluster("Worker Node", |d| {
            d.cluster("Basic Workload", |d| {
                d.node(Category::Pod, "nginx-pod");
                Ok(())
            })
        })
        .unwrap();

        let dot = d.to_dot();
        let outer = dot.find("subgraph \"cluster_0\"").unwrap();
        let inner = dot.find("subgraph \"cluster_1\"").unwrap();
        assert!(outer < inner, "inner cluster must be nested inside outer");
        assert!(dot.contains("label=\"Worker Node\""));
        assert!(dot.contains("label=\"Basic Workload\""));
        // The pod is emitted inside the inner subgraph.
        let pod = dot.find("n0 [label=\"nginx-pod\"").unwrap();
        assert!(pod > inner);
    }

    #[test]
    fn test_emit_is_deterministic() {
        let build = || {
            let mut d = Diagram::new("Same", Direction::TopDown);
            let api = d.node(Category::ApiServer, "kube-apiserver");
            let pods = d.node_group(Category::Pod, ["p1", "p2", "p3"]);
            d.fan_out(api, &pods, EdgeAttr::new().color(Color::Blue))
                .unwrap();
            d.to_dot()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_multiline_label_escaped() {
        let mut d = Diagram::new("Lines", Direction::TopDown);
        d.node(Category::Internet, "External\nNetwork");
        let dot = d.to_dot();
        assert!(dot.contains("label=\"External\\nNetwork\""));
        assert!(!dot.contains("External\nNetwork"));
    }
}
