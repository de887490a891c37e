//! Rendering backends - convert a prepared scene into output text.
//!
//! Three backends, all pure string building:
//! - SVG (static figure, render_svg)
//! - HTML (interactive scatter chart, render_html)
//! - DOT (Graphviz source, render_dot)

mod dot;
mod html;
mod svg;

use std::collections::HashMap;

use crate::color::ColorMap;
use crate::config::VisConfig;
use crate::group::TypeGroups;
use crate::layout::PositionMap;
use crate::types::{EdgeId, Graph, NodeId};

pub use dot::render_dot;
pub use html::render_html;
pub use svg::render_svg;

/// Which rendering backend produces the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Svg,
    Html,
    Dot,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Svg => "svg",
            Backend::Html => "html",
            Backend::Dot => "dot",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a backend needs to draw: the graph plus every derived map.
pub struct Scene<'a> {
    pub graph: &'a Graph,
    pub positions: &'a PositionMap,
    pub node_groups: &'a TypeGroups<NodeId>,
    pub edge_groups: &'a TypeGroups<EdgeId>,
    pub ntype_colors: &'a ColorMap,
    pub etype_colors: &'a ColorMap,
    pub node_labels: &'a HashMap<NodeId, String>,
    pub config: &'a VisConfig,
}

/// Render the scene with the chosen backend.
pub fn render(scene: &Scene<'_>, backend: Backend) -> String {
    match backend {
        Backend::Svg => render_svg(scene),
        Backend::Html => render_html(scene),
        Backend::Dot => render_dot(scene),
    }
}

/// Escape text for embedding in XML/HTML content.
pub(crate) fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Map layout coordinates onto a pixel canvas, flipping the y axis so
/// layout-up is screen-up.
pub(crate) fn to_pixels(
    positions: &PositionMap,
    width: f64,
    height: f64,
    margin: f64,
) -> HashMap<NodeId, (f64, f64)> {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for (x, y) in positions.values() {
        min_x = min_x.min(*x);
        max_x = max_x.max(*x);
        min_y = min_y.min(*y);
        max_y = max_y.max(*y);
    }

    let span_x = (max_x - min_x).max(1e-9);
    let span_y = (max_y - min_y).max(1e-9);

    positions
        .iter()
        .map(|(id, (x, y))| {
            let px = margin + (x - min_x) / span_x * (width - 2.0 * margin);
            let py = margin + (max_y - y) / span_y * (height - 2.0 * margin);
            (id.clone(), (px, py))
        })
        .collect()
}
