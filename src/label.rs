//! Derive display labels and hover text from node/edge attributes.

use std::collections::HashMap;

use tracing::debug;

use crate::types::{AttrMap, AttrValue, Graph, NodeId};

/// Attribute values longer than this never appear in hover text.
const HOVER_VALUE_LIMIT: usize = 40;

fn stringify(value: &AttrValue) -> String {
    match value {
        AttrValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format one raw attribute value as a display label.
///
/// Absent and null values become `null_placeholder`; everything else is
/// stringified and hard-truncated to `max_len` characters, no ellipsis.
pub fn format_label(raw: Option<&AttrValue>, max_len: usize, null_placeholder: &str) -> String {
    match raw {
        None | Some(AttrValue::Null) => null_placeholder.to_string(),
        Some(value) => stringify(value).chars().take(max_len).collect(),
    }
}

/// Build the per-node label map from the `attr_key` node attribute.
pub fn node_labels(
    graph: &Graph,
    attr_key: &str,
    max_len: usize,
    null_placeholder: &str,
) -> HashMap<NodeId, String> {
    let labels: HashMap<NodeId, String> = graph
        .nodes
        .iter()
        .map(|n| {
            (
                n.id.clone(),
                format_label(n.attrs.get(attr_key), max_len, null_placeholder),
            )
        })
        .collect();

    debug!(attr_key, labels = labels.len(), "formatted node labels");

    labels
}

/// Join an element's short attributes into hover text, one `key: value`
/// line per attribute. Null values and values longer than 40 characters
/// are skipped.
pub fn hover_text(attrs: &AttrMap) -> String {
    attrs
        .iter()
        .filter(|(_, v)| !matches!(v, AttrValue::Null))
        .filter_map(|(k, v)| {
            let v_str = stringify(v);
            (v_str.chars().count() <= HOVER_VALUE_LIMIT).then(|| format!("{}: {}", k, v_str))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
