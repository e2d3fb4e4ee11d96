//! Change classification of a single key.

use std::fmt;

use crate::delta::Delta;

/// The kind of change recorded for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
    /// The element left this (origin) index.
    Moved,
    /// Placeholder at the index a moved element arrived at.
    MoveDestination,
    TextDiff,
    /// Nested changes below this key.
    Node,
    Unchanged,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 8] = [
        ChangeKind::Added,
        ChangeKind::Deleted,
        ChangeKind::Modified,
        ChangeKind::Moved,
        ChangeKind::MoveDestination,
        ChangeKind::TextDiff,
        ChangeKind::Node,
        ChangeKind::Unchanged,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Modified => "modified",
            ChangeKind::Moved => "moved",
            ChangeKind::MoveDestination => "moveDestination",
            ChangeKind::TextDiff => "textDiff",
            ChangeKind::Node => "node",
            ChangeKind::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the delta recorded for a key.
///
/// `is_move_destination` only matters when the key has no delta of its own:
/// such a key is the landing spot of a moved element. Shapes the wire format
/// does not define classify as [`ChangeKind::Unchanged`].
///
/// # Example
///
/// ```
/// use json_delta::{classify, ChangeKind, Delta};
/// use serde_json::json;
///
/// assert_eq!(classify(None, false), ChangeKind::Unchanged);
/// assert_eq!(classify(None, true), ChangeKind::MoveDestination);
/// assert_eq!(classify(Some(&Delta::from_json(&json!(["old", 0, 0]))), false), ChangeKind::Deleted);
/// assert_eq!(classify(Some(&Delta::from_json(&json!([1, 2, 7]))), false), ChangeKind::Unchanged);
/// ```
pub fn classify(delta: Option<&Delta>, is_move_destination: bool) -> ChangeKind {
    match delta {
        None if is_move_destination => ChangeKind::MoveDestination,
        None => ChangeKind::Unchanged,
        Some(Delta::Added(_)) => ChangeKind::Added,
        Some(Delta::Modified(_, _)) => ChangeKind::Modified,
        Some(Delta::Deleted(_)) => ChangeKind::Deleted,
        Some(Delta::TextDiff(_)) => ChangeKind::TextDiff,
        Some(Delta::Moved { .. }) => ChangeKind::Moved,
        Some(Delta::Node { .. }) => ChangeKind::Node,
        Some(Delta::Unrecognized(_)) => ChangeKind::Unchanged,
    }
}

/// Classify a delta still in its wire form.
pub fn classify_json(delta: Option<&serde_json::Value>, is_move_destination: bool) -> ChangeKind {
    let decoded = delta.map(Delta::from_json);
    classify(decoded.as_ref(), is_move_destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_delta() {
        assert_eq!(classify_json(None, false), ChangeKind::Unchanged);
        assert_eq!(classify_json(None, true), ChangeKind::MoveDestination);
    }

    #[test]
    fn test_leaf_shapes() {
        assert_eq!(classify_json(Some(&json!(["new"])), false), ChangeKind::Added);
        assert_eq!(classify_json(Some(&json!([1, 2])), false), ChangeKind::Modified);
        assert_eq!(classify_json(Some(&json!(["old", 0, 0])), false), ChangeKind::Deleted);
        assert_eq!(classify_json(Some(&json!(["@@ -1 +1 @@", 0, 2])), false), ChangeKind::TextDiff);
        assert_eq!(classify_json(Some(&json!(["", 4, 3])), false), ChangeKind::Moved);
    }

    #[test]
    fn test_node_shapes() {
        assert_eq!(classify_json(Some(&json!({})), false), ChangeKind::Node);
        assert_eq!(classify_json(Some(&json!({"_t": "a"})), false), ChangeKind::Node);
        assert_eq!(classify_json(Some(&json!({"a": [1]})), false), ChangeKind::Node);
    }

    #[test]
    fn test_own_delta_wins_over_move_destination() {
        assert_eq!(classify_json(Some(&json!({"name": [1, 2]})), true), ChangeKind::Node);
        assert_eq!(classify_json(Some(&json!(["x"])), true), ChangeKind::Added);
    }

    #[test]
    fn test_malformed_shapes_are_unchanged() {
        for json in [json!([]), json!([1, 2, 1]), json!([1, 2, 3, 4]), json!(42), json!("x"), json!(null)] {
            assert_eq!(classify_json(Some(&json), false), ChangeKind::Unchanged, "{json}");
        }
    }

    #[test]
    fn test_kind_names() {
        let names: Vec<_> = ChangeKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            vec!["added", "deleted", "modified", "moved", "moveDestination", "textDiff", "node", "unchanged"]
        );
    }
}
