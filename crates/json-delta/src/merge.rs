//! Reconcile a base document with its delta into an ordered change tree.
//!
//! For every node the merge:
//!
//! 1. takes the union of the base value's own keys and the delta's keys,
//!    plus the destinations of elements moved inside this node;
//! 2. orders them: numerically for array nodes (`_1 < 1 < _2`), by string
//!    otherwise;
//! 3. records, before classifying anything, which keys are move
//!    destinations and where they came from;
//! 4. classifies each key and recurses into nested nodes.

use std::collections::BTreeMap;

use json_delta_util::{strip_origin_prefix, KeyOrder, MARKER_KEY};
use thiserror::Error;

use crate::classify::{classify, ChangeKind};
use crate::delta::Delta;
use crate::merged::MergedNode;
use crate::value::Value;

/// Default limit on node nesting below the root.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("invalid input shape: base must be an object or an array, got {0}")]
    InvalidBase(&'static str),
    #[error("invalid input shape: delta must be an object")]
    InvalidDelta,
    #[error("maximum nesting depth of {max} exceeded")]
    DepthExceeded { max: usize },
}

/// Options for [`merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Emit entries for keys without changes.
    pub include_unchanged: bool,
    /// Fail with [`MergeError::DepthExceeded`] when nodes nest deeper than
    /// this. `None` disables the limit.
    pub max_depth: Option<usize>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            include_unchanged: false,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_unchanged(mut self, include: bool) -> Self {
        self.include_unchanged = include;
        self
    }

    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Merge a base document with its delta.
///
/// `base` must be an object or an array and `delta`, when present, must be a
/// node. Below the root nothing fails: unknown delta shapes classify as
/// unchanged and missing base values come back as `None`.
///
/// # Errors
///
/// - [`MergeError::InvalidBase`] if `base` is a scalar
/// - [`MergeError::InvalidDelta`] if `delta` is a leaf operation
/// - [`MergeError::DepthExceeded`] if nodes nest deeper than `max_depth`
///
/// # Example
///
/// ```
/// use json_delta::{merge, ChangeKind, Delta, MergeOptions, Value};
/// use serde_json::json;
///
/// let base = Value::from(json!({"a": 1, "b": 2}));
/// let delta = Delta::from_json(&json!({"a": [1, 5]}));
///
/// let merged = merge(&base, Some(&delta), &MergeOptions::new().include_unchanged(true)).unwrap();
/// assert_eq!(merged.len(), 2);
/// assert_eq!((merged[0].key.as_str(), merged[0].kind), ("a", ChangeKind::Modified));
/// assert_eq!((merged[1].key.as_str(), merged[1].kind), ("b", ChangeKind::Unchanged));
/// ```
pub fn merge<'a>(
    base: &'a Value,
    delta: Option<&'a Delta>,
    options: &MergeOptions,
) -> Result<Vec<MergedNode<'a>>, MergeError> {
    if !base.is_container() {
        return Err(MergeError::InvalidBase(base.type_name()));
    }
    if matches!(delta, Some(d) if d.children().is_none()) {
        return Err(MergeError::InvalidDelta);
    }
    TreeMerger { options }.merge_node(Some(base), delta, 0)
}

/// Merge a base document with a delta given in wire form.
///
/// The inputs are decoded into [`Value`] and [`Delta`] first and the merged
/// tree is returned in its JSON view (see [`MergedNode::to_json`]).
pub fn merge_json(
    base: &serde_json::Value,
    delta: Option<&serde_json::Value>,
    options: &MergeOptions,
) -> Result<serde_json::Value, MergeError> {
    let base = Value::from(base);
    let delta = delta.map(Delta::from_json);
    let merged = merge(&base, delta.as_ref(), options)?;
    Ok(crate::merged::to_json(&merged))
}

/// Where a moved element came from.
struct MoveOrigin<'a> {
    key: &'a str,
    value: Option<&'a Value>,
}

struct TreeMerger<'o> {
    options: &'o MergeOptions,
}

impl TreeMerger<'_> {
    fn merge_node<'a>(
        &self,
        base: Option<&'a Value>,
        delta: Option<&'a Delta>,
        depth: usize,
    ) -> Result<Vec<MergedNode<'a>>, MergeError> {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return Err(MergeError::DepthExceeded { max });
            }
        }

        let children = delta.and_then(Delta::children);
        let order = if delta.is_some_and(Delta::is_array_node) {
            KeyOrder::Array
        } else {
            KeyOrder::Object
        };

        let moves = move_destinations(base, children);
        let keys = merged_keys(base, children, &moves, order);

        tracing::debug!(
            depth,
            keys = keys.len(),
            moves = moves.len(),
            array = (order == KeyOrder::Array),
            "merging node"
        );

        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            let moved_from = moves.get(key.as_str());
            let key_delta = children.and_then(|c| c.get(&key));
            let kind = classify(key_delta, moved_from.is_some());
            let value = match moved_from {
                Some(origin) => origin.value,
                None => base.and_then(|b| b.get(&key)),
            };

            if let Some(Delta::Unrecognized(json)) = key_delta {
                tracing::debug!(key = %key, delta = %json, "unrecognized delta shape, treating as unchanged");
            }

            let nested = match kind {
                ChangeKind::Unchanged if !self.options.include_unchanged => continue,
                ChangeKind::Node => self.merge_node(value, key_delta, depth + 1)?,
                _ => Vec::new(),
            };

            out.push(MergedNode {
                key,
                kind,
                base_value: value,
                delta: key_delta,
                moved_from: moved_from.map(|origin| origin.key),
                children: nested,
            });
        }
        Ok(out)
    }
}

/// Index the move destinations of a node: destination key -> origin.
///
/// Runs over the delta alone before any key is classified, since a
/// destination usually has no delta entry of its own.
fn move_destinations<'a>(
    base: Option<&'a Value>,
    children: Option<&'a BTreeMap<String, Delta>>,
) -> BTreeMap<&'a str, MoveOrigin<'a>> {
    let mut moves = BTreeMap::new();
    for (key, child) in children.into_iter().flatten() {
        if classify(Some(child), false) != ChangeKind::Moved {
            continue;
        }
        if let Delta::Moved { destination, .. } = child {
            tracing::trace!(origin = %key, destination = %destination, "move registered");
            moves.insert(
                destination.as_str(),
                MoveOrigin {
                    key: key.as_str(),
                    value: base.and_then(|b| b.get(strip_origin_prefix(key))),
                },
            );
        }
    }
    moves
}

/// Ordered, duplicate-free union of the keys a node has to emit.
fn merged_keys(
    base: Option<&Value>,
    children: Option<&BTreeMap<String, Delta>>,
    moves: &BTreeMap<&str, MoveOrigin<'_>>,
    order: KeyOrder,
) -> Vec<String> {
    let mut keys: Vec<String> = base.map(Value::own_keys).unwrap_or_default();
    keys.extend(children.into_iter().flat_map(|c| c.keys().cloned()));
    keys.extend(moves.keys().map(|k| k.to_string()));
    keys.retain(|k| k != MARKER_KEY);
    order.sort(&mut keys);
    // The comparators only tie on identical keys, so duplicates are adjacent.
    keys.dedup();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(base: serde_json::Value, delta: serde_json::Value, include_unchanged: bool) -> serde_json::Value {
        let options = MergeOptions::new().include_unchanged(include_unchanged);
        merge_json(&base, Some(&delta), &options).unwrap()
    }

    fn keys_and_kinds(merged: &[MergedNode<'_>]) -> Vec<(String, ChangeKind)> {
        merged.iter().map(|n| (n.key.clone(), n.kind)).collect()
    }

    #[test]
    fn test_unchanged_suppressed_by_default() {
        let out = run(json!({"a": 1, "b": 2}), json!({"a": [1, 5]}), false);
        assert_eq!(out, json!([{"key": "a", "kind": "modified", "baseValue": 1, "delta": [1, 5]}]));
    }

    #[test]
    fn test_unchanged_included_on_request() {
        let out = run(json!({"a": 1, "b": 2}), json!({"a": [1, 5]}), true);
        assert_eq!(
            out,
            json!([
                {"key": "a", "kind": "modified", "baseValue": 1, "delta": [1, 5]},
                {"key": "b", "kind": "unchanged", "baseValue": 2}
            ])
        );
    }

    #[test]
    fn test_nested_node() {
        let base = json!({"country": {"name": "X", "pop": 1}});
        let delta = json!({"country": {"pop": [1, 2]}});
        assert_eq!(
            run(base.clone(), delta.clone(), false),
            json!([{
                "key": "country",
                "kind": "node",
                "baseValue": {"name": "X", "pop": 1},
                "delta": {"pop": [1, 2]},
                "children": [{"key": "pop", "kind": "modified", "baseValue": 1, "delta": [1, 2]}]
            }])
        );
        let with_unchanged = run(base, delta, true);
        assert_eq!(
            with_unchanged[0]["children"],
            json!([
                {"key": "name", "kind": "unchanged", "baseValue": "X"},
                {"key": "pop", "kind": "modified", "baseValue": 1, "delta": [1, 2]}
            ])
        );
    }

    #[test]
    fn test_added_and_deleted_leaves() {
        let base = Value::from(json!({"x": "old"}));
        let added = Delta::from_json(&json!({"x": ["new"]}));
        let merged = merge(&base, Some(&added), &MergeOptions::new()).unwrap();
        assert_eq!(merged[0].kind, ChangeKind::Added);
        assert!(merged[0].is_leaf());
        assert_eq!(merged[0].added_value(), Some(&Value::from(json!("new"))));

        let deleted = Delta::from_json(&json!({"x": ["old", 0, 0]}));
        let merged = merge(&base, Some(&deleted), &MergeOptions::new()).unwrap();
        assert_eq!(merged[0].kind, ChangeKind::Deleted);
        assert_eq!(merged[0].deleted_value(), Some(&Value::from(json!("old"))));
    }

    #[test]
    fn test_move_emits_origin_and_destination() {
        let base = Value::from(json!(["value", "other"]));
        let delta = Delta::from_json(&json!({"_0": ["value", 2, 3]}));
        let merged = merge(&base, Some(&delta), &MergeOptions::new()).unwrap();

        assert_eq!(
            keys_and_kinds(&merged),
            vec![("2".to_string(), ChangeKind::MoveDestination), ("_0".to_string(), ChangeKind::Moved)]
        );
        let dest = &merged[0];
        assert_eq!(dest.moved_from, Some("_0"));
        assert_eq!(dest.base_value, Some(&Value::from(json!("value"))));
        let moved = &merged[1];
        assert_eq!(moved.move_destination(), Some("2"));
        assert_eq!(moved.base_value, Some(&Value::from(json!("value"))));
    }

    #[test]
    fn test_array_node_ordering() {
        let base = Value::from(json!(["a", "b", "c"]));
        let delta = Delta::from_json(&json!({
            "_t": "a",
            "_1": ["b", 0, 0],
            "1": ["B"],
            "_2": ["", 0, 3],
            "3": ["d"]
        }));
        let merged = merge(&base, Some(&delta), &MergeOptions::new().include_unchanged(true)).unwrap();
        assert_eq!(
            keys_and_kinds(&merged),
            vec![
                ("0".to_string(), ChangeKind::MoveDestination),
                ("_1".to_string(), ChangeKind::Deleted),
                ("1".to_string(), ChangeKind::Added),
                ("_2".to_string(), ChangeKind::Moved),
                ("2".to_string(), ChangeKind::Unchanged),
                ("3".to_string(), ChangeKind::Added),
            ]
        );
        assert_eq!(merged[0].base_value, Some(&Value::from(json!("c"))));
        assert_eq!(merged[1].base_value, Some(&Value::from(json!("b"))));
    }

    #[test]
    fn test_marker_never_emitted() {
        let base = Value::from(json!({"_t": "kept?", "a": 1}));
        let delta = Delta::from_json(&json!({"_t": "a", "a": [1, 2]}));
        let merged = merge(&base, Some(&delta), &MergeOptions::new().include_unchanged(true)).unwrap();
        assert!(merged.iter().all(|n| n.key != "_t"));
    }

    #[test]
    fn test_moved_element_with_inner_changes() {
        let base = Value::from(json!([{"name": "Peru", "capital": "Lima"}, {"name": "Chile"}]));
        let delta = Delta::from_json(&json!({
            "_t": "a",
            "_0": ["", 1, 3],
            "1": {"capital": ["Lima", "Cusco"]}
        }));
        let merged = merge(&base, Some(&delta), &MergeOptions::new()).unwrap();
        assert_eq!(
            keys_and_kinds(&merged),
            vec![("_0".to_string(), ChangeKind::Moved), ("1".to_string(), ChangeKind::Node)]
        );
        let node = &merged[1];
        assert_eq!(node.moved_from, Some("_0"));
        assert_eq!(keys_and_kinds(&node.children), vec![("capital".to_string(), ChangeKind::Modified)]);
        assert_eq!(node.children[0].base_value, Some(&Value::from(json!("Lima"))));
    }

    #[test]
    fn test_missing_move_origin_resolves_to_none() {
        let base = Value::from(json!(["only"]));
        let delta = Delta::from_json(&json!({"_t": "a", "_5": ["", 0, 3]}));
        let merged = merge(&base, Some(&delta), &MergeOptions::new()).unwrap();
        let dest = merged.iter().find(|n| n.kind == ChangeKind::MoveDestination).unwrap();
        assert_eq!(dest.key, "0");
        assert_eq!(dest.base_value, None);
        assert_eq!(dest.moved_from, Some("_5"));
    }

    #[test]
    fn test_node_over_scalar_base() {
        let base = Value::from(json!({"a": 5}));
        let delta = Delta::from_json(&json!({"a": {"x": ["new"]}}));
        let merged = merge(&base, Some(&delta), &MergeOptions::new().include_unchanged(true)).unwrap();
        assert_eq!(merged[0].kind, ChangeKind::Node);
        assert!(!merged[0].is_leaf());
        assert_eq!(keys_and_kinds(&merged[0].children), vec![("x".to_string(), ChangeKind::Added)]);
    }

    #[test]
    fn test_unrecognized_shape_degrades_to_unchanged() {
        let base = Value::from(json!({"a": 1}));
        let delta = Delta::from_json(&json!({"a": [1, 2, 9], "b": 7}));
        assert!(merge(&base, Some(&delta), &MergeOptions::new()).unwrap().is_empty());
        let merged = merge(&base, Some(&delta), &MergeOptions::new().include_unchanged(true)).unwrap();
        assert_eq!(
            keys_and_kinds(&merged),
            vec![("a".to_string(), ChangeKind::Unchanged), ("b".to_string(), ChangeKind::Unchanged)]
        );
        assert_eq!(merged[1].base_value, None);
    }

    #[test]
    fn test_absent_delta() {
        let base = Value::from(json!({"b": 1, "a": 2}));
        assert!(merge(&base, None, &MergeOptions::new()).unwrap().is_empty());
        let merged = merge(&base, None, &MergeOptions::new().include_unchanged(true)).unwrap();
        assert_eq!(
            keys_and_kinds(&merged),
            vec![("a".to_string(), ChangeKind::Unchanged), ("b".to_string(), ChangeKind::Unchanged)]
        );
    }

    #[test]
    fn test_empty_result() {
        let base = Value::from(json!({}));
        let delta = Delta::from_json(&json!({}));
        assert!(merge(&base, Some(&delta), &MergeOptions::new().include_unchanged(true)).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_top_level_shapes() {
        let scalar = Value::from(json!(3));
        assert_eq!(merge(&scalar, None, &MergeOptions::new()), Err(MergeError::InvalidBase("number")));

        let base = Value::from(json!({}));
        let leaf = Delta::from_json(&json!(["x"]));
        assert_eq!(merge(&base, Some(&leaf), &MergeOptions::new()), Err(MergeError::InvalidDelta));
    }

    #[test]
    fn test_depth_limit() {
        let base = Value::from(json!({"a": {"b": {"c": 1}}}));
        let delta = Delta::from_json(&json!({"a": {"b": {"c": [1, 2]}}}));

        let err = merge(&base, Some(&delta), &MergeOptions::new().max_depth(Some(1))).unwrap_err();
        assert_eq!(err, MergeError::DepthExceeded { max: 1 });
        assert!(merge(&base, Some(&delta), &MergeOptions::new().max_depth(Some(2))).is_ok());
        assert!(merge(&base, Some(&delta), &MergeOptions::new().max_depth(None)).is_ok());
    }

    #[test]
    fn test_merge_is_deterministic() {
        let base = json!({"z": [1, 2, 3], "a": {"k": "v"}, "m": true});
        let delta = json!({"z": {"_t": "a", "_0": ["", 2, 3], "3": [4]}, "a": {"k": ["v", "w"]}, "n": [null]});
        let first = run(base.clone(), delta.clone(), true);
        let second = run(base, delta, true);
        assert_eq!(first, second);
    }
}
