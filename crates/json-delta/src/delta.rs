//! Structural delta: the wire format produced by a structural JSON differ.
//!
//! Leaf operations travel as short arrays, nested changes as objects:
//!
//! | wire form                 | meaning                                  |
//! |---------------------------|------------------------------------------|
//! | `[new]`                   | added                                    |
//! | `[old, new]`              | modified                                 |
//! | `[old, 0, 0]`             | deleted                                  |
//! | `[patch, 0, 2]`           | text diff (patch text is opaque)         |
//! | `[old, dest, 3]`          | array element moved to index `dest`      |
//! | `{ key: delta, ... }`     | nested changes; `"_t": "a"` marks arrays |
//!
//! Decoding is total: any other shape becomes [`Delta::Unrecognized`].

use std::collections::BTreeMap;

use json_delta_util::{key_string, ARRAY_MARKER_VALUE, MARKER_KEY};

use crate::value::Value;

/// Third-element tag of a deleted entry.
pub const TAG_DELETED: u64 = 0;
/// Third-element tag of a text diff entry.
pub const TAG_TEXT_DIFF: u64 = 2;
/// Third-element tag of a moved entry.
pub const TAG_MOVED: u64 = 3;

/// A decoded delta node.
#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    Added(Value),
    Modified(Value, Value),
    Deleted(Value),
    /// Opaque edit script. Non-string payloads keep their JSON text.
    TextDiff(String),
    Moved {
        value: Value,
        /// Key of the destination index, e.g. `"2"`.
        destination: String,
    },
    /// Nested changes. `array` is set when the node carried the `_t` marker;
    /// the marker itself is not kept among the children.
    Node {
        array: bool,
        children: BTreeMap<String, Delta>,
    },
    /// Any shape the wire format does not define, kept verbatim.
    Unrecognized(serde_json::Value),
}

impl Delta {
    /// Decode a delta from its wire form.
    ///
    /// # Example
    ///
    /// ```
    /// use json_delta::{Delta, Value};
    /// use serde_json::json;
    ///
    /// assert_eq!(Delta::from_json(&json!(["new"])), Delta::Added(Value::Text("new".into())));
    /// assert!(matches!(Delta::from_json(&json!({"_t": "a"})), Delta::Node { array: true, .. }));
    /// assert!(matches!(Delta::from_json(&json!([1, 2, 9])), Delta::Unrecognized(_)));
    /// ```
    pub fn from_json(json: &serde_json::Value) -> Delta {
        match json {
            serde_json::Value::Array(items) => decode_leaf(items).unwrap_or_else(|| Delta::Unrecognized(json.clone())),
            serde_json::Value::Object(map) => {
                let array = map.contains_key(MARKER_KEY);
                let children = map
                    .iter()
                    .filter(|(key, _)| key.as_str() != MARKER_KEY)
                    .map(|(key, child)| (key.clone(), Delta::from_json(child)))
                    .collect();
                Delta::Node { array, children }
            }
            _ => Delta::Unrecognized(json.clone()),
        }
    }

    /// Encode the delta back to its wire form.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Delta::Added(value) => Json::Array(vec![value.to_json()]),
            Delta::Modified(old, new) => Json::Array(vec![old.to_json(), new.to_json()]),
            Delta::Deleted(old) => Json::Array(vec![old.to_json(), Json::from(0), Json::from(TAG_DELETED)]),
            Delta::TextDiff(patch) => Json::Array(vec![Json::from(patch.as_str()), Json::from(0), Json::from(TAG_TEXT_DIFF)]),
            Delta::Moved { value, destination } => {
                let dest = json_delta_util::parse_index(destination)
                    .map(Json::from)
                    .unwrap_or_else(|| Json::from(destination.as_str()));
                Json::Array(vec![value.to_json(), dest, Json::from(TAG_MOVED)])
            }
            Delta::Node { array, children } => {
                let mut map = serde_json::Map::new();
                if *array {
                    map.insert(MARKER_KEY.to_string(), Json::from(ARRAY_MARKER_VALUE));
                }
                for (key, child) in children {
                    map.insert(key.clone(), child.to_json());
                }
                Json::Object(map)
            }
            Delta::Unrecognized(json) => json.clone(),
        }
    }

    /// Children of a node delta, `None` for leaf operations.
    pub fn children(&self) -> Option<&BTreeMap<String, Delta>> {
        match self {
            Delta::Node { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Whether this is a node carrying the array marker.
    pub fn is_array_node(&self) -> bool {
        matches!(self, Delta::Node { array: true, .. })
    }
}

impl From<&serde_json::Value> for Delta {
    fn from(json: &serde_json::Value) -> Self {
        Delta::from_json(json)
    }
}

fn decode_leaf(items: &[serde_json::Value]) -> Option<Delta> {
    match items {
        [new] => Some(Delta::Added(Value::from(new))),
        [old, new] => Some(Delta::Modified(Value::from(old), Value::from(new))),
        [first, second, tag] => match leaf_tag(tag)? {
            TAG_DELETED => Some(Delta::Deleted(Value::from(first))),
            TAG_TEXT_DIFF => Some(Delta::TextDiff(match first {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })),
            TAG_MOVED => Some(Delta::Moved {
                value: Value::from(first),
                destination: key_string(second),
            }),
            _ => None,
        },
        _ => None,
    }
}

/// Numeric tag of a three-element entry; `0` and `0.0` are the same tag.
fn leaf_tag(tag: &serde_json::Value) -> Option<u64> {
    let n = tag.as_f64()?;
    if n.fract() != 0.0 || n < 0.0 {
        return None;
    }
    Some(n as u64)
}
