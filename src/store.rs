//! Load and save graphs as node-link JSON documents.
//!
//! The on-disk format follows the conventional node-link schema: a `nodes`
//! list of `{id, ...attrs}` objects and a `links` list of
//! `{source, target, ...attrs}` objects, with `directed` and `multigraph`
//! flags at the top level.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, VisError};
use crate::types::{AttrMap, AttrValue, Graph, NodeId};

#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    id: NodeId,
    #[serde(flatten)]
    attrs: AttrMap,
}

#[derive(Debug, Serialize, Deserialize)]
struct LinkRecord {
    source: NodeId,
    target: NodeId,
    #[serde(flatten)]
    attrs: AttrMap,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeLinkDoc {
    #[serde(default)]
    directed: bool,
    #[serde(default)]
    multigraph: bool,
    #[serde(default)]
    graph: BTreeMap<String, AttrValue>,
    nodes: Vec<NodeRecord>,
    links: Vec<LinkRecord>,
}

/// Parse a node-link JSON document into a [`Graph`].
///
/// Fails fast on malformed JSON and on schema violations; an edge whose
/// endpoint is not in the node list is never guessed into existence.
pub fn load(path: &Path) -> Result<Graph> {
    let raw = fs::read_to_string(path).map_err(|e| VisError::io(path, e))?;
    let doc: NodeLinkDoc = serde_json::from_str(&raw)?;

    if !doc.graph.is_empty() {
        debug!(keys = ?doc.graph.keys().collect::<Vec<_>>(), "ignoring graph-level attributes");
    }
    if doc.multigraph {
        debug!("document declares a multigraph; parallel edges kept until coercion");
    }

    let mut graph = Graph::new(doc.directed);
    for record in doc.nodes {
        if graph.contains_node(&record.id) {
            return Err(VisError::schema(format!(
                "duplicate node id {} in node list",
                record.id
            )));
        }
        graph.add_node(record.id, record.attrs);
    }
    for record in doc.links {
        for endpoint in [&record.source, &record.target] {
            if !graph.contains_node(endpoint) {
                return Err(VisError::schema(format!(
                    "edge ({}, {}) references unknown node {}",
                    record.source, record.target, endpoint
                )));
            }
        }
        graph.add_edge(record.source, record.target, record.attrs);
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        path = %path.display(),
        "loaded node-link graph"
    );

    Ok(graph)
}

/// Serialize a [`Graph`] to a node-link JSON document at `path`.
///
/// Parent directories are created if absent. The document is written to a
/// temporary file in the target directory and renamed into place, so a
/// crashed run never leaves a half-written document.
pub fn save(graph: &Graph, path: &Path) -> Result<()> {
    let doc = NodeLinkDoc {
        directed: graph.directed,
        multigraph: graph.is_multigraph(),
        graph: BTreeMap::new(),
        nodes: graph
            .nodes
            .iter()
            .map(|n| NodeRecord {
                id: n.id.clone(),
                attrs: n.attrs.clone(),
            })
            .collect(),
        links: graph
            .edges
            .iter()
            .map(|e| LinkRecord {
                source: e.source.clone(),
                target: e.target.clone(),
                attrs: e.attrs.clone(),
            })
            .collect(),
    };

    let serialized = serde_json::to_string(&doc)?;
    write_atomic(path, serialized.as_bytes())?;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        path = %path.display(),
        "saved node-link graph"
    );

    Ok(())
}

/// Write `contents` to `path` via temp-file + rename, creating parent
/// directories as needed. Shared by the graph store and the renderers.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir).map_err(|e| VisError::io(dir, e))?;
    }

    let dir = parent.unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| VisError::io(dir, e))?;
    tmp.write_all(contents).map_err(|e| VisError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| VisError::io(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttrMap;
    use pretty_assertions::assert_eq;

    fn sample_graph() -> Graph {
        let mut g = Graph::new(true);
        let mut a = AttrMap::new();
        a.insert("ntype".into(), AttrValue::String("A".into()));
        let mut b = AttrMap::new();
        b.insert("ntype".into(), AttrValue::String("B".into()));
        g.add_node(0, a);
        g.add_node(1, b);
        let mut e = AttrMap::new();
        e.insert("etype".into(), AttrValue::String("E".into()));
        g.add_edge(0, 1, e);
        g
    }

    #[test]
    fn test_round_trip_preserves_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let g = sample_graph();

        save(&g, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, g);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep/nested/graph.json");
        save(&sample_graph(), &path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_load_rejects_unknown_edge_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"directed": true, "nodes": [{"id": 0}],
                "links": [{"source": 0, "target": 99}]}"#,
        )
        .unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, VisError::Schema(_)), "got {err:?}");
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load(&path).unwrap_err(), VisError::Parse(_)));
    }

    #[test]
    fn test_load_accepts_string_node_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.json");
        fs::write(
            &path,
            r#"{"nodes": [{"id": "alpha"}, {"id": "beta"}],
                "links": [{"source": "alpha", "target": "beta"}]}"#,
        )
        .unwrap();

        let g = load(&path).unwrap();
        assert!(g.contains_node(&NodeId::from("alpha")));
        assert_eq!(g.edge_count(), 1);
    }
}
