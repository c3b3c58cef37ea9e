//! Graphviz DOT emission for [`Diagram`].

use std::fmt::Write as _;

use crate::model::{Cluster, Diagram, Edge, Node};

const FONT: &str = "Sans-Serif";

/// Quote and escape a DOT identifier or attribute value.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

pub fn to_dot(diagram: &Diagram) -> String {
    let mut out = String::new();
    out.push_str("digraph {\n");

    let graph_attrs = [
        ("rankdir", diagram.direction.rankdir().to_string()),
        ("label", diagram.name.clone()),
        ("labelloc", "t".to_string()),
        ("fontname", FONT.to_string()),
        ("fontsize", "15".to_string()),
        ("pad", "2.0".to_string()),
        ("splines", "ortho".to_string()),
        ("nodesep", "0.60".to_string()),
        ("ranksep", "0.75".to_string()),
    ];
    for (k, v) in graph_attrs {
        let _ = writeln!(out, "  {k}={};", quote(&v));
    }
    let _ = writeln!(
        out,
        "  node [shape=box, style=rounded, fontname={}, fontsize=13];",
        quote(FONT)
    );
    let _ = writeln!(out, "  edge [color=\"#7B8894\"];");

    for node in &diagram.nodes {
        write_node(&mut out, node, 1);
    }

    let mut next_cluster = 0usize;
    for cluster in &diagram.clusters {
        write_cluster(&mut out, cluster, 1, &mut next_cluster);
    }

    for edge in &diagram.edges {
        write_edge(&mut out, edge);
    }

    out.push_str("}\n");
    out
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let _ = writeln!(
        out,
        "{}{} [label={}];",
        indent(depth),
        quote(&node.id),
        quote(node.display_label())
    );
}

// Graphviz only boxes subgraphs whose name starts with `cluster`.
fn write_cluster(out: &mut String, cluster: &Cluster, depth: usize, next: &mut usize) {
    let id = *next;
    *next += 1;

    let pad = indent(depth);
    let _ = writeln!(out, "{pad}subgraph cluster_{id} {{");
    let _ = writeln!(out, "{pad}  label={};", quote(&cluster.label));
    let _ = writeln!(out, "{pad}  style=rounded;");
    for node in &cluster.nodes {
        write_node(out, node, depth + 1);
    }
    for sub in &cluster.clusters {
        write_cluster(out, sub, depth + 1, next);
    }
    let _ = writeln!(out, "{pad}}}");
}

fn write_edge(out: &mut String, edge: &Edge) {
    let deco = edge.style.decoration();
    let stroke = edge
        .style
        .palette_color()
        .map(|c| c.stroke_hex().to_string())
        .unwrap_or_else(|| edge.style.color.clone());

    let mut attrs = vec![
        format!("class={}", quote(&deco.class_attr())),
        format!("color={}", quote(&stroke)),
    ];
    for (k, v) in &deco.attributes {
        attrs.push(format!("{}={}", quote(k), quote(v)));
    }

    let _ = writeln!(
        out,
        "  {} -> {} [{}];",
        quote(&edge.from),
        quote(&edge.to),
        attrs.join(", ")
    );
}
