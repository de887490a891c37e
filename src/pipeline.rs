//! End-to-end visualization runs.
//!
//! One run is a linear stage sequence:
//! load → sanitize (DOT only) → group → color → layout → label → render → save.
//! Every stage is fail-fast; an error aborts the run with no partial output.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::color::{assign_group_colors, Palette};
use crate::config::VisConfig;
use crate::error::Result;
use crate::label::node_labels;
use crate::layout::{compute_layout, rescale};
use crate::render::{render, Backend, Scene};
use crate::types::Graph;
use crate::{group, sanitize, store};

/// Render a graph to output text with the chosen backend.
///
/// Mutates the graph: multigraphs are coerced to simple graphs, and the DOT
/// path prunes node attributes to the type/label keys and double-quotes
/// delimited values.
pub fn render_graph(graph: &mut Graph, backend: Backend, config: &VisConfig) -> Result<String> {
    if graph.is_multigraph() {
        let dropped = graph.coerce_simple();
        warn!(dropped, "multigraph input coerced to simple graph, lossy");
    }

    if backend == Backend::Dot {
        info!("DOT backend requires delimiter sanitization of attribute values");
        sanitize::prune_node_attrs(graph, &[&config.ntype_key, &config.label_key]);
        sanitize::quote_delimited_edge_attrs(graph, &config.etype_key);
        sanitize::quote_delimited_node_attrs(graph, &config.ntype_key);
        sanitize::quote_delimited_node_attrs(graph, &config.label_key);
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let palette = Palette::new(config.palette);

    let node_groups = group::group_nodes(graph, &config.ntype_key);
    let edge_groups = group::group_edges(graph, &config.etype_key);

    let ntype_colors = assign_group_colors(
        &node_groups.keys().map(String::from).collect::<Vec<_>>(),
        &palette,
        &mut rng,
    )?;
    let etype_colors = assign_group_colors(
        &edge_groups.keys().map(String::from).collect::<Vec<_>>(),
        &palette,
        &mut rng,
    )?;

    let mut positions = compute_layout(graph, config.layout, seed);
    rescale(&mut positions, config.scale);

    let labels = node_labels(graph, &config.label_key, config.max_label_len, &config.null_label);

    let scene = Scene {
        graph,
        positions: &positions,
        node_groups: &node_groups,
        edge_groups: &edge_groups,
        ntype_colors: &ntype_colors,
        etype_colors: &etype_colors,
        node_labels: &labels,
        config,
    };

    Ok(render(&scene, backend))
}

/// Run one full pipeline: load the node-link document at `input`, render it
/// with `backend` and write the result to `output`, creating parent
/// directories as needed.
pub fn run(input: &Path, output: &Path, backend: Backend, config: &VisConfig) -> Result<()> {
    info!(
        input = %input.display(),
        output = %output.display(),
        backend = %backend,
        "starting visualization run"
    );

    let mut graph = store::load(input)?;
    let rendered = render_graph(&mut graph, backend, config)?;
    store::write_atomic(output, rendered.as_bytes())?;

    info!(output = %output.display(), "exported visualization");

    Ok(())
}
