//! Node positioning.
//!
//! Layout is a delegation point, not an algorithmic core: a deterministic
//! circular placement and a small seeded spring relaxation are enough to
//! hand every renderer a node-to-coordinate map.

use std::collections::HashMap;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::VisError;
use crate::types::{Graph, NodeId};

/// Mapping from node id to 2-D coordinate.
pub type PositionMap = HashMap<NodeId, (f64, f64)>;

/// Which layout algorithm positions the nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Circular,
    Spring,
}

impl FromStr for LayoutKind {
    type Err = VisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "circular" => Ok(LayoutKind::Circular),
            "spring" => Ok(LayoutKind::Spring),
            other => Err(VisError::UnsupportedLayout(other.to_string())),
        }
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutKind::Circular => write!(f, "circular"),
            LayoutKind::Spring => write!(f, "spring"),
        }
    }
}

/// Compute a position for every node of the graph.
pub fn compute_layout(graph: &Graph, kind: LayoutKind, seed: u64) -> PositionMap {
    let pos = match kind {
        LayoutKind::Circular => circular(graph),
        LayoutKind::Spring => spring(graph, seed),
    };

    debug!(layout = %kind, nodes = pos.len(), "computed node positions");

    pos
}

/// Evenly spaced placement on the unit circle, in node order.
fn circular(graph: &Graph) -> PositionMap {
    let n = graph.node_count();
    graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / n.max(1) as f64;
            (node.id.clone(), (angle.cos(), angle.sin()))
        })
        .collect()
}

/// Fruchterman-Reingold style relaxation from seeded random starting
/// positions. O(n^2) per iteration; fine at batch-script graph sizes.
fn spring(graph: &Graph, seed: u64) -> PositionMap {
    const ITERATIONS: usize = 50;

    let n = graph.node_count();
    if n == 0 {
        return PositionMap::new();
    }

    let ids: Vec<NodeId> = graph.nodes.iter().map(|node| node.id.clone()).collect();
    let index: HashMap<&NodeId, usize> = ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
    let edges: Vec<(usize, usize)> = graph
        .edges
        .iter()
        .filter(|e| e.source != e.target)
        .map(|e| (index[&e.source], index[&e.target]))
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect();

    // Ideal pairwise distance for a unit-area canvas.
    let k = (1.0 / n as f64).sqrt();
    let mut temperature = 0.1;
    let cooling = temperature / (ITERATIONS as f64 + 1.0);

    for _ in 0..ITERATIONS {
        let mut disp = vec![(0.0f64, 0.0f64); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
                let repulse = k * k / dist;
                let (ux, uy) = (dx / dist, dy / dist);
                disp[i].0 += ux * repulse;
                disp[i].1 += uy * repulse;
                disp[j].0 -= ux * repulse;
                disp[j].1 -= uy * repulse;
            }
        }

        for &(a, b) in &edges {
            let dx = pos[a].0 - pos[b].0;
            let dy = pos[a].1 - pos[b].1;
            let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
            let attract = dist * dist / k;
            let (ux, uy) = (dx / dist, dy / dist);
            disp[a].0 -= ux * attract;
            disp[a].1 -= uy * attract;
            disp[b].0 += ux * attract;
            disp[b].1 += uy * attract;
        }

        for i in 0..n {
            let (dx, dy) = disp[i];
            let len = (dx * dx + dy * dy).sqrt().max(1e-9);
            let step = len.min(temperature);
            pos[i].0 += dx / len * step;
            pos[i].1 += dy / len * step;
        }

        temperature -= cooling;
    }

    ids.into_iter().zip(pos).collect()
}

/// Center positions on the origin and scale the largest coordinate
/// magnitude to `scale`.
pub fn rescale(positions: &mut PositionMap, scale: f64) {
    if positions.is_empty() {
        return;
    }

    let n = positions.len() as f64;
    let (cx, cy) = positions
        .values()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    let (cx, cy) = (cx / n, cy / n);

    let mut max_mag: f64 = 0.0;
    for (x, y) in positions.values_mut() {
        *x -= cx;
        *y -= cy;
        max_mag = max_mag.max(x.abs()).max(y.abs());
    }
    if max_mag == 0.0 {
        return;
    }

    for (x, y) in positions.values_mut() {
        *x *= scale / max_mag;
        *y *= scale / max_mag;
    }
}
