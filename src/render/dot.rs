//! Graphviz DOT backend.
//!
//! Emits DOT source; the actual drawing is delegated to a Graphviz
//! installation downstream. This is the path the `::`-delimiter
//! sanitization pass exists for.

use std::collections::HashMap;
use std::fmt::Write;

use super::Scene;
use crate::types::NodeId;

/// Escape special characters for DOT label strings.
fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Render the scene as Graphviz DOT source.
pub fn render_dot(scene: &Scene<'_>) -> String {
    let config = scene.config;
    let directed = scene.graph.directed;
    let connector = if directed { "->" } else { "--" };

    // DOT identifiers per node, in document order.
    let dot_ids: HashMap<&NodeId, String> = scene
        .graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (&n.id, format!("n{i}")))
        .collect();

    let node_colors = crate::color::expand_to_elements(scene.node_groups, scene.ntype_colors);
    let edge_colors = crate::color::expand_to_elements(scene.edge_groups, scene.etype_colors);

    let mut out = String::with_capacity(4096);
    let _ = writeln!(
        out,
        "{} g2vis {{",
        if directed { "digraph" } else { "graph" }
    );
    let _ = writeln!(
        out,
        "  node [shape=circle, style=filled, fontsize={}, fontname=\"{}\"];",
        config.node_label_font_size,
        escape_label(&config.font_family)
    );
    let _ = writeln!(out, "  edge [fontsize={}];", config.edge_label_font_size);
    out.push('\n');

    for node in &scene.graph.nodes {
        let label = scene
            .node_labels
            .get(&node.id)
            .map(String::as_str)
            .unwrap_or(&config.null_label);
        let fill = node_colors
            .get(&node.id)
            .map(String::as_str)
            .unwrap_or("#FFFFFF");
        let _ = writeln!(
            out,
            "  {} [label=\"{}\", fillcolor=\"{}\"];",
            dot_ids[&node.id],
            escape_label(label),
            fill,
        );
    }
    out.push('\n');

    for edge in &scene.graph.edges {
        let color = edge_colors
            .get(&edge.id())
            .map(String::as_str)
            .unwrap_or("#000000");
        let mut attrs = format!("color=\"{}\"", color);
        if config.with_edge_label {
            let label = crate::label::format_label(
                edge.attrs.get(&config.etype_key),
                config.max_label_len,
                &config.null_label,
            );
            let _ = write!(attrs, ", label=\"{}\"", escape_label(&label));
        }
        let _ = writeln!(
            out,
            "  {} {} {} [{}];",
            dot_ids[&edge.source], connector, dot_ids[&edge.target], attrs,
        );
    }

    out.push_str("}\n");
    out
}
