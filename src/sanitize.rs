//! Rewrite attribute values that would break the DOT text format.
//!
//! The layout-engine backend treats `::` as a reserved delimiter inside
//! attribute values, so any string value containing it is wrapped in double
//! quotes before the graph reaches the emitter. Policy: non-string values are
//! never quoted and never an error, on both the node and the edge path.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::types::{AttrValue, Graph};

/// The reserved delimiter token.
const DELIMITER: &str = "::";

fn quote_value(value: &mut AttrValue) -> bool {
    if let AttrValue::String(s) = value {
        let already_quoted = s.starts_with('"') && s.ends_with('"') && s.len() >= 2;
        if s.contains(DELIMITER) && !already_quoted {
            *s = format!("\"{}\"", s);
            return true;
        }
    }
    false
}

/// Double-quote every delimited string value of the `attr_key` node
/// attribute. Returns the number of values rewritten. Idempotent.
pub fn quote_delimited_node_attrs(graph: &mut Graph, attr_key: &str) -> usize {
    let mut rewritten = 0;
    for node in &mut graph.nodes {
        if let Some(value) = node.attrs.get_mut(attr_key) {
            if quote_value(value) {
                rewritten += 1;
            }
        }
    }

    debug!(
        attr_key,
        rewritten, "double-quoted delimited node attribute values"
    );

    rewritten
}

/// Double-quote every delimited string value of the `attr_key` edge
/// attribute. Returns the number of values rewritten. Idempotent.
pub fn quote_delimited_edge_attrs(graph: &mut Graph, attr_key: &str) -> usize {
    let mut rewritten = 0;
    for edge in &mut graph.edges {
        if let Some(value) = edge.attrs.get_mut(attr_key) {
            if quote_value(value) {
                rewritten += 1;
            }
        }
    }

    debug!(
        attr_key,
        rewritten, "double-quoted delimited edge attribute values"
    );

    rewritten
}

/// Strip every node attribute whose key is not in `keep_keys`.
///
/// Mutates nodes in place and returns how often each removed key occurred,
/// for diagnostics.
pub fn prune_node_attrs(graph: &mut Graph, keep_keys: &[&str]) -> HashMap<String, usize> {
    let mut removed: HashMap<String, usize> = HashMap::new();
    for node in &mut graph.nodes {
        node.attrs.retain(|key, _| {
            if keep_keys.contains(&key.as_str()) {
                true
            } else {
                *removed.entry(key.clone()).or_insert(0) += 1;
                false
            }
        });
    }

    info!(removed = ?removed, keep = ?keep_keys, "pruned node attributes");

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttrMap;

    fn graph_with_node_attr(value: AttrValue) -> Graph {
        let mut g = Graph::new(false);
        let mut m = AttrMap::new();
        m.insert("ntype".into(), value);
        g.add_node(0, m);
        g
    }

    fn node_attr(g: &Graph) -> &AttrValue {
        g.nodes[0].attrs.get("ntype").unwrap()
    }

    #[test]
    fn test_delimited_value_is_quoted() {
        let mut g = graph_with_node_attr(AttrValue::String("pkg::item".into()));
        assert_eq!(quote_delimited_node_attrs(&mut g, "ntype"), 1);
        assert_eq!(node_attr(&g), &AttrValue::String("\"pkg::item\"".into()));
    }

    #[test]
    fn test_quoting_is_idempotent() {
        let mut g = graph_with_node_attr(AttrValue::String("pkg::item".into()));
        quote_delimited_node_attrs(&mut g, "ntype");
        let once = node_attr(&g).clone();
        assert_eq!(quote_delimited_node_attrs(&mut g, "ntype"), 0);
        assert_eq!(node_attr(&g), &once);
    }

    #[test]
    fn test_plain_and_non_string_values_untouched() {
        let mut g = graph_with_node_attr(AttrValue::String("plain".into()));
        assert_eq!(quote_delimited_node_attrs(&mut g, "ntype"), 0);
        assert_eq!(node_attr(&g), &AttrValue::String("plain".into()));

        let mut g = graph_with_node_attr(AttrValue::from(12));
        assert_eq!(quote_delimited_node_attrs(&mut g, "ntype"), 0);
        assert_eq!(node_attr(&g), &AttrValue::from(12));
    }

    #[test]
    fn test_quote_delimited_edge_attrs() {
        let mut g = Graph::new(true);
        g.add_node(0, AttrMap::new());
        g.add_node(1, AttrMap::new());
        let mut e = AttrMap::new();
        e.insert("etype".into(), AttrValue::String("a::b".into()));
        g.add_edge(0, 1, e);

        assert_eq!(quote_delimited_edge_attrs(&mut g, "etype"), 1);
        assert_eq!(
            g.edges[0].attrs.get("etype"),
            Some(&AttrValue::String("\"a::b\"".into()))
        );
    }

    #[test]
    fn test_prune_node_attrs_counts_removals() {
        let mut g = Graph::new(false);
        for i in 0..3 {
            let mut m = AttrMap::new();
            m.insert("ntype".into(), AttrValue::String("A".into()));
            m.insert("payload".into(), AttrValue::from(i));
            m.insert("note".into(), AttrValue::String("x".into()));
            g.add_node(i, m);
        }

        let removed = prune_node_attrs(&mut g, &["ntype"]);

        assert_eq!(removed.get("payload"), Some(&3));
        assert_eq!(removed.get("note"), Some(&3));
        assert!(removed.get("ntype").is_none());
        for node in &g.nodes {
            assert_eq!(node.attrs.keys().collect::<Vec<_>>(), vec!["ntype"]);
        }
    }
}
