//! Output of a merge: one annotated entry per key.

use std::collections::BTreeMap;

use serde_json::{Map, Value as Json};

use crate::classify::ChangeKind;
use crate::delta::Delta;
use crate::value::Value;

/// One key of a merged node.
///
/// Borrows from the base document and the delta it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedNode<'a> {
    pub key: String,
    pub kind: ChangeKind,
    /// Value in the base document. For a move destination this is the value
    /// found at the origin index.
    pub base_value: Option<&'a Value>,
    /// The key's own delta, if any.
    pub delta: Option<&'a Delta>,
    /// Origin key (e.g. `"_0"`) when this key is a move destination.
    pub moved_from: Option<&'a str>,
    /// Merged children; only [`ChangeKind::Node`] entries have any.
    pub children: Vec<MergedNode<'a>>,
}

impl<'a> MergedNode<'a> {
    /// New value of an added key.
    pub fn added_value(&self) -> Option<&'a Value> {
        match self.delta? {
            Delta::Added(value) => Some(value),
            _ => None,
        }
    }

    /// Old value of a deleted key.
    pub fn deleted_value(&self) -> Option<&'a Value> {
        match self.delta? {
            Delta::Deleted(value) => Some(value),
            _ => None,
        }
    }

    /// `(old, new)` of a modified key.
    pub fn modified_values(&self) -> Option<(&'a Value, &'a Value)> {
        match self.delta? {
            Delta::Modified(old, new) => Some((old, new)),
            _ => None,
        }
    }

    /// Destination key of a moved element.
    pub fn move_destination(&self) -> Option<&'a str> {
        match self.delta? {
            Delta::Moved { destination, .. } => Some(destination.as_str()),
            _ => None,
        }
    }

    /// Opaque patch text of a text diff.
    pub fn text_patch(&self) -> Option<&'a str> {
        match self.delta? {
            Delta::TextDiff(patch) => Some(patch.as_str()),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.kind != ChangeKind::Node
    }

    /// JSON view of the entry, for debugging and tooling.
    ///
    /// Absent fields are omitted; `children` is only written for nodes.
    pub fn to_json(&self) -> Json {
        let mut map = Map::new();
        map.insert("key".to_string(), Json::from(self.key.as_str()));
        map.insert("kind".to_string(), Json::from(self.kind.as_str()));
        if let Some(value) = self.base_value {
            map.insert("baseValue".to_string(), value.to_json());
        }
        if let Some(delta) = self.delta {
            map.insert("delta".to_string(), delta.to_json());
        }
        if let Some(origin) = self.moved_from {
            map.insert("movedFrom".to_string(), Json::from(origin));
        }
        if self.kind == ChangeKind::Node {
            map.insert("children".to_string(), to_json(&self.children));
        }
        Json::Object(map)
    }
}

/// JSON view of a merged sequence.
pub fn to_json(nodes: &[MergedNode<'_>]) -> Json {
    Json::Array(nodes.iter().map(MergedNode::to_json).collect())
}

/// Count entries per kind across the whole merged tree.
pub fn kind_counts(nodes: &[MergedNode<'_>]) -> BTreeMap<ChangeKind, usize> {
    let mut counts = BTreeMap::new();
    let mut stack: Vec<&MergedNode<'_>> = nodes.iter().collect();
    while let Some(node) = stack.pop() {
        *counts.entry(node.kind).or_insert(0) += 1;
        stack.extend(node.children.iter());
    }
    counts
}
