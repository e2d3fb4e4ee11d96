//! json-delta: reconcile a JSON document with a structural delta.
//!
//! Given a base document and a delta computed against it by a structural
//! differ, [`merge`] produces an ordered tree of [`MergedNode`]s telling, key
//! by key, what was added, deleted, modified, moved, text-diffed, or left
//! alone. Renderers read that tree; they never look at the delta themselves.
//!
//! # Example
//!
//! ```
//! use json_delta::{merge, ChangeKind, Delta, MergeOptions, Value};
//! use serde_json::json;
//!
//! let base = Value::from(json!({"country": {"name": "X", "pop": 1}}));
//! let delta = Delta::from_json(&json!({"country": {"pop": [1, 2]}}));
//!
//! let merged = merge(&base, Some(&delta), &MergeOptions::default()).unwrap();
//! assert_eq!(merged[0].kind, ChangeKind::Node);
//! assert_eq!(merged[0].children[0].key, "pop");
//! assert_eq!(merged[0].children[0].kind, ChangeKind::Modified);
//! ```

pub mod classify;
pub mod delta;
pub mod json_cli;
pub mod logging;
pub mod merge;
pub mod merged;
pub mod render;
pub mod value;

pub use classify::{classify, classify_json, ChangeKind};
pub use delta::Delta;
pub use merge::{merge, merge_json, MergeError, MergeOptions, DEFAULT_MAX_DEPTH};
pub use merged::{kind_counts, MergedNode};
pub use render::{OutlineRenderer, Renderer};
pub use value::Value;
