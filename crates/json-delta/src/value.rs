//! Tagged document value.
//!
//! The JSON shape of a document is decided once, when it is converted from
//! [`serde_json::Value`], so the merge walk never has to re-inspect raw JSON.

use std::collections::BTreeMap;
use std::fmt;

use json_delta_util::ArrayKey;
use serde_json::Number;

/// A JSON-like document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    /// Whether the value has own keys (a mapping, or a sequence keyed by index).
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    /// Short name of the value's kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "string",
            Value::Sequence(_) => "array",
            Value::Mapping(_) => "object",
        }
    }

    /// Own keys of the value.
    ///
    /// Mappings yield their keys, sequences yield their indices as strings,
    /// scalars yield nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use json_delta::Value;
    /// use serde_json::json;
    ///
    /// let doc = Value::from(json!({"b": 1, "a": [true, false]}));
    /// assert_eq!(doc.own_keys(), vec!["a", "b"]);
    /// assert_eq!(doc.get("a").unwrap().own_keys(), vec!["0", "1"]);
    /// assert!(Value::from(json!(3)).own_keys().is_empty());
    /// ```
    pub fn own_keys(&self) -> Vec<String> {
        match self {
            Value::Mapping(map) => map.keys().cloned().collect(),
            Value::Sequence(items) => (0..items.len()).map(|i| i.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    /// Look up a child by key.
    ///
    /// In a sequence both `N` and `_N` address index `N`, since array deltas
    /// name base elements with the `_` prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use json_delta::Value;
    /// use serde_json::json;
    ///
    /// let doc = Value::from(json!(["x", "y"]));
    /// assert_eq!(doc.get("1"), Some(&Value::Text("y".into())));
    /// assert_eq!(doc.get("_1"), Some(&Value::Text("y".into())));
    /// assert_eq!(doc.get("2"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Mapping(map) => map.get(key),
            Value::Sequence(items) => match ArrayKey::parse(key) {
                ArrayKey::Origin(i) | ArrayKey::Current(i) => items.get(i),
                ArrayKey::Marker | ArrayKey::Other => None,
            },
            _ => None,
        }
    }

    /// Convert back to a [`serde_json::Value`].
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Sequence(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Mapping(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => {
                Value::Mapping(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        Value::from(value.clone())
    }
}

/// Compact JSON text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
