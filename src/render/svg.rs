//! Static SVG backend.
//!
//! Renders back-to-front: edges → edge labels → nodes → node labels → legend.

use super::{escape_xml, to_pixels, Scene};
use crate::label::format_label;

/// Canvas margin in px.
const MARGIN: f64 = 60.0;

/// Pixels per figure inch; a tenth of the configured DPI.
fn px_per_inch(dpi: u32) -> f64 {
    dpi as f64 / 10.0
}

/// Render the scene as a static SVG figure.
pub fn render_svg(scene: &Scene<'_>) -> String {
    let config = scene.config;
    let width = config.figsize.0 as f64 * px_per_inch(config.dpi);
    let height = config.figsize.1 as f64 * px_per_inch(config.dpi);
    let px = to_pixels(scene.positions, width, height, MARGIN);
    let radius = (config.node_size as f64 / std::f64::consts::PI).sqrt();

    let mut parts: Vec<String> = Vec::new();

    parts.push(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{font}">"#,
        font = escape_xml(&config.font_family),
    ));
    parts.push(format!(
        r##"<rect width="{width}" height="{height}" fill="#FFFFFF" />"##
    ));

    // 1. Edges, grouped by type so each bundle shares its type color
    for (etype, members) in scene.edge_groups.iter() {
        let color = scene
            .etype_colors
            .get(etype)
            .map(String::as_str)
            .unwrap_or("#000000");
        for (source, target) in members {
            let (x1, y1) = px[source];
            let (x2, y2) = px[target];
            parts.push(format!(
                r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{color}" stroke-width="{w}" />"#,
                w = config.edge_width,
            ));
        }
    }

    // 2. Edge labels at segment midpoints
    if config.with_edge_label {
        for edge in &scene.graph.edges {
            let label = format_label(
                edge.attrs.get(&config.etype_key),
                config.max_label_len,
                &config.null_label,
            );
            let (x1, y1) = px[&edge.source];
            let (x2, y2) = px[&edge.target];
            parts.push(format!(
                r##"<text x="{x:.1}" y="{y:.1}" font-size="{size}" text-anchor="middle" fill="#333333">{label}</text>"##,
                x = (x1 + x2) / 2.0,
                y = (y1 + y2) / 2.0,
                size = config.edge_label_font_size,
                label = escape_xml(&label),
            ));
        }
    }

    // 3. Nodes, one circle run per type group
    for (ntype, members) in scene.node_groups.iter() {
        let color = scene
            .ntype_colors
            .get(ntype)
            .map(String::as_str)
            .unwrap_or("#000000");
        for id in members {
            let (x, y) = px[id];
            parts.push(format!(
                r##"<circle cx="{x:.1}" cy="{y:.1}" r="{radius:.1}" fill="{color}" stroke="#333333" stroke-width="0.5" />"##,
            ));
        }
    }

    // 4. Node labels, in document order so output is stable across runs
    for node in &scene.graph.nodes {
        let Some(label) = scene.node_labels.get(&node.id) else {
            continue;
        };
        let (x, y) = px[&node.id];
        parts.push(format!(
            r##"<text x="{x:.1}" y="{y:.1}" dy="0.35em" font-size="{size}" text-anchor="middle" fill="#000000">{label}</text>"##,
            size = config.node_label_font_size,
            label = escape_xml(label),
        ));
    }

    // 5. Legend: node types then edge types, top-left column
    parts.push(render_legend(scene));

    parts.push("</svg>".to_string());

    parts.join("\n")
}

fn render_legend(scene: &Scene<'_>) -> String {
    const SWATCH: f64 = 12.0;
    const LINE_HEIGHT: f64 = 18.0;

    let mut parts: Vec<String> = Vec::new();
    let mut y = MARGIN / 2.0;

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
        parts.push(format!(
            r#"<rect x="{x}" y="{y:.1}" width="{SWATCH}" height="{SWATCH}" fill="{color}" />"#,
            x = MARGIN / 2.0,
        ));
        parts.push(format!(
            r##"<text x="{x}" y="{ty:.1}" font-size="{size}" fill="#000000">{label}</text>"##,
            x = MARGIN / 2.0 + SWATCH + 6.0,
            ty = y + SWATCH - 2.0,
            size = scene.config.node_label_font_size,
            label = escape_xml(type_name),
        ));
        y += LINE_HEIGHT;
    }

    parts.join("\n")
}
