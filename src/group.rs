//! Group nodes and edges by a categorical type attribute.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, info};

use crate::types::{AttrValue, EdgeId, Graph, NodeId};

/// Group key used for elements that carry no value under the type attribute.
pub const MISSING_TYPE: &str = "<missing>";

/// Ordered grouping of element ids by type name.
///
/// Keys keep first-seen order and each group keeps encounter order, the same
/// pattern as the document's own node/edge ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeGroups<K> {
    order: Vec<String>,
    groups: HashMap<String, Vec<K>>,
}

impl<K: Clone + Eq + Hash> TypeGroups<K> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            groups: HashMap::new(),
        }
    }

    pub fn insert(&mut self, type_name: impl Into<String>, id: K) {
        let type_name = type_name.into();
        match self.groups.get_mut(&type_name) {
            Some(members) => members.push(id),
            None => {
                self.order.push(type_name.clone());
                self.groups.insert(type_name, vec![id]);
            }
        }
    }

    /// Type names in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn get(&self, type_name: &str) -> Option<&[K]> {
        self.groups.get(type_name).map(Vec::as_slice)
    }

    /// (type name, members) pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[K])> {
        self.order
            .iter()
            .map(move |k| (k.as_str(), self.groups[k].as_slice()))
    }

    /// Number of distinct type groups.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of grouped element ids across all groups.
    pub fn element_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Group sizes by type name, in first-seen order.
    pub fn counts(&self) -> Vec<(String, usize)> {
        self.order
            .iter()
            .map(|k| (k.clone(), self.groups[k].len()))
            .collect()
    }
}

/// Render an attribute value as a group key.
///
/// String values group by their content; other non-null values group by their
/// JSON rendering; absent and null values fall into the [`MISSING_TYPE`] group.
fn type_key(value: Option<&AttrValue>) -> String {
    match value {
        None | Some(AttrValue::Null) => MISSING_TYPE.to_string(),
        Some(AttrValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Partition node ids into groups keyed by the `attr_key` node attribute.
pub fn group_nodes(graph: &Graph, attr_key: &str) -> TypeGroups<NodeId> {
    debug!(attr_key, "grouping nodes by type attribute");

    let mut groups = TypeGroups::new();
    for node in &graph.nodes {
        groups.insert(type_key(node.attrs.get(attr_key)), node.id.clone());
    }

    info!(
        attr_key,
        groups = groups.len(),
        counts = ?groups.counts(),
        "grouped nodes by type"
    );

    groups
}

/// Partition edge ids into groups keyed by the `attr_key` edge attribute.
pub fn group_edges(graph: &Graph, attr_key: &str) -> TypeGroups<EdgeId> {
    debug!(attr_key, "grouping edges by type attribute");

    let mut groups = TypeGroups::new();
    for edge in &graph.edges {
        groups.insert(type_key(edge.attrs.get(attr_key)), edge.id());
    }

    info!(
        attr_key,
        groups = groups.len(),
        counts = ?groups.counts(),
        "grouped edges by type"
    );

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttrMap;
    use std::collections::HashSet;

    fn typed(ntype: &str) -> AttrMap {
        let mut m = AttrMap::new();
        m.insert("ntype".into(), AttrValue::String(ntype.into()));
        m
    }

    fn sample() -> Graph {
        let mut g = Graph::new(false);
        g.add_node(0, typed("A"));
        g.add_node(1, typed("B"));
        g.add_node(2, typed("A"));
        g.add_node(3, AttrMap::new());
        g
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let groups = group_nodes(&sample(), "ntype");
        let keys: Vec<_> = groups.keys().collect();
        assert_eq!(keys, vec!["A", "B", MISSING_TYPE]);
        assert_eq!(groups.get("A"), Some(&[NodeId::Int(0), NodeId::Int(2)][..]));
    }

    #[test]
    fn test_groups_partition_the_id_set() {
        let g = sample();
        let groups = group_nodes(&g, "ntype");

        let mut seen: HashSet<NodeId> = HashSet::new();
        for (_, members) in groups.iter() {
            for id in members {
                assert!(seen.insert(id.clone()), "{id} appears in two groups");
            }
        }
        let all: HashSet<NodeId> = g.nodes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(seen, all);
        assert_eq!(groups.element_count(), g.node_count());
    }

    #[test]
    fn test_group_edges_by_etype() {
        let mut g = sample();
        let mut e = AttrMap::new();
        e.insert("etype".into(), AttrValue::String("E".into()));
        g.add_edge(0, 1, e.clone());
        g.add_edge(1, 2, e);
        g.add_edge(2, 3, AttrMap::new());

        let groups = group_edges(&g, "etype");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get("E").unwrap().len(), 2);
        assert_eq!(groups.get(MISSING_TYPE).unwrap().len(), 1);
    }

    #[test]
    fn test_non_string_type_values_group_by_json_rendering() {
        let mut g = Graph::new(false);
        let mut m = AttrMap::new();
        m.insert("ntype".into(), AttrValue::from(3));
        g.add_node(0, m);
        let groups = group_nodes(&g, "ntype");
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["3"]);
    }
}
