//! Type definitions for node-link graph structures

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute values carry whatever the source document held.
pub type AttrValue = serde_json::Value;

/// Attribute mapping attached to a node or an edge.
pub type AttrMap = BTreeMap<String, AttrValue>;

/// A node identifier: node-link documents use either integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(n) => write!(f, "{}", n),
            NodeId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Int(n)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Str(s.to_string())
    }
}

/// An edge is identified by its endpoint pair.
pub type EdgeId = (NodeId, NodeId);

/// A node in the graph
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub attrs: AttrMap,
}

/// An edge between two nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub attrs: AttrMap,
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        (self.source.clone(), self.target.clone())
    }
}

/// The complete graph: nodes and edges in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub directed: bool,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn add_node(&mut self, id: impl Into<NodeId>, attrs: AttrMap) {
        self.nodes.push(Node {
            id: id.into(),
            attrs,
        });
    }

    pub fn add_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        attrs: AttrMap,
    ) {
        self.edges.push(Edge {
            source: source.into(),
            target: target.into(),
            attrs,
        });
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.iter().any(|n| &n.id == id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    /// Look up one attribute of one node.
    pub fn node_attr(&self, id: &NodeId, key: &str) -> Option<&AttrValue> {
        self.node(id).and_then(|n| n.attrs.get(key))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True if any endpoint pair appears more than once.
    pub fn is_multigraph(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.edges.iter().any(|e| !seen.insert(e.id()))
    }

    /// Collapse parallel edges so every endpoint pair appears once.
    ///
    /// The last edge of a parallel bundle wins; its attributes replace the
    /// earlier ones. Returns the number of edges dropped. Lossy.
    pub fn coerce_simple(&mut self) -> usize {
        let before = self.edges.len();
        let mut kept: Vec<Edge> = Vec::with_capacity(before);
        let mut index: std::collections::HashMap<EdgeId, usize> = std::collections::HashMap::new();
        for edge in self.edges.drain(..) {
            match index.get(&edge.id()) {
                Some(&i) => kept[i] = edge,
                None => {
                    index.insert(edge.id(), kept.len());
                    kept.push(edge);
                }
            }
        }
        self.edges = kept;
        before - self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> AttrMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), AttrValue::String(v.to_string())))
            .collect()
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::Int(7).to_string(), "7");
        assert_eq!(NodeId::from("a").to_string(), "a");
    }

    #[test]
    fn test_coerce_simple_keeps_last_parallel_edge() {
        let mut g = Graph::new(true);
        g.add_node(0, AttrMap::new());
        g.add_node(1, AttrMap::new());
        g.add_edge(0, 1, attrs(&[("etype", "first")]));
        g.add_edge(0, 1, attrs(&[("etype", "second")]));
        g.add_edge(1, 0, attrs(&[("etype", "back")]));

        let dropped = g.coerce_simple();

        assert_eq!(dropped, 1);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(
            g.edges[0].attrs.get("etype"),
            Some(&AttrValue::String("second".to_string()))
        );
    }

    #[test]
    fn test_coerce_simple_noop_on_simple_graph() {
        let mut g = Graph::new(false);
        g.add_node(0, AttrMap::new());
        g.add_node(1, AttrMap::new());
        g.add_edge(0, 1, AttrMap::new());
        assert!(!g.is_multigraph());
        assert_eq!(g.coerce_simple(), 0);
        assert_eq!(g.edge_count(), 1);
    }
}
