//! Interactive HTML chart backend.
//!
//! Emits a standalone HTML document embedding a scatter-style SVG chart:
//! one line run per edge type, one marker run per node type, hover text via
//! `<title>` tooltips and a legend built from the type groups.

use super::{escape_xml, to_pixels, Scene};
use crate::label::hover_text;

/// Marker radius in px.
const MARKER_SIZE: f64 = 7.0;
/// Marker outline color.
const MARKER_OUTLINE: &str = "DarkSlateGrey";
/// Edge stroke width in px.
const EDGE_WIDTH: f64 = 0.5;
/// Canvas margin in px.
const MARGIN: f64 = 40.0;

/// Chart dimensions grow with the node count, clamped to a minimum.
fn chart_size(node_count: usize) -> (f64, f64) {
    let width = 1024.0 / 900.0 * node_count as f64;
    let height = 768.0 / 900.0 * node_count as f64;
    (width.max(10.0), height.max(10.0))
}

/// Render the scene as a standalone interactive HTML document.
pub fn render_html(scene: &Scene<'_>) -> String {
    let (width, height) = chart_size(scene.graph.node_count());
    let px = to_pixels(scene.positions, width, height, MARGIN.min(width / 4.0));

    let mut parts: Vec<String> = Vec::new();

    let title = scene.config.title.as_deref().unwrap_or("");
    parts.push(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{ font-family: {font}; margin: 1em; }}
  svg .node:hover {{ stroke-width: 4; }}
  svg .edge:hover {{ stroke-width: 2; }}
</style>
</head>
<body>"#,
        title = escape_xml(title),
        font = escape_xml(&scene.config.font_family),
    ));
    if !title.is_empty() {
        parts.push(format!("<b>{}</b>", escape_xml(title)));
    }
    parts.push(format!(
        r#"<svg width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
    ));

    // Edge runs, one per edge type
    for (etype, members) in scene.edge_groups.iter() {
        let color = scene
            .etype_colors
            .get(etype)
            .map(String::as_str)
            .unwrap_or("#000000");
        for (source, target) in members {
            let (x1, y1) = px[source];
            let (x2, y2) = px[target];
            let text = scene
                .graph
                .edges
                .iter()
                .find(|e| &e.source == source && &e.target == target)
                .map(|e| hover_text(&e.attrs))
                .unwrap_or_default();
            parts.push(format!(
                r#"<line class="edge" x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{color}" stroke-width="{EDGE_WIDTH}"><title>{text}</title></line>"#,
                text = escape_xml(&text),
            ));
        }
    }

    // Marker runs, one per node type
    for (ntype, members) in scene.node_groups.iter() {
        let color = scene
            .ntype_colors
            .get(ntype)
            .map(String::as_str)
            .unwrap_or("#000000");
        for id in members {
            let (x, y) = px[id];
            let text = scene
                .graph
                .node(id)
                .map(|n| hover_text(&n.attrs))
                .unwrap_or_default();
            parts.push(format!(
                r#"<circle class="node" cx="{x:.1}" cy="{y:.1}" r="{MARKER_SIZE}" fill="{color}" stroke="{MARKER_OUTLINE}" stroke-width="2"><title>{text}</title></circle>"#,
                text = escape_xml(&text),
            ));
        }
    }

    parts.push("</svg>".to_string());
    parts.push(render_legend(scene));
    parts.push("</body>\n</html>".to_string());

    parts.join("\n")
}

fn render_legend(scene: &Scene<'_>) -> String {
    let mut items: Vec<String> = Vec::new();

    let entries = scene
        .node_groups
        .keys()
        .map(|t| (t, scene.ntype_colors.get(t)))
        .chain(
            scene
                .edge_groups
                .keys()
                .map(|t| (t, scene.etype_colors.get(t))),
        );

    for (type_name, color) in entries {
        let color = color.map(String::as_str).unwrap_or("#000000");
        items.push(format!(
            r#"<li><span style="color: {color}">&#9632;</span> {label}</li>"#,
            label = escape_xml(type_name),
        ));
    }

    format!("<ul>\n{}\n</ul>", items.join("\n"))
}
