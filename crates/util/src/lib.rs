//! json-delta-util - Helpers shared by the json-delta crates
//!
//! Key conventions of the structural delta wire format: array-diff key
//! parsing, key ordering, and key stringification of scalar values.

pub mod array_key;
pub mod key_cmp;
pub mod key_string;

// Re-exports for convenience
pub use array_key::{parse_index, strip_origin_prefix, ArrayKey, ARRAY_MARKER_VALUE, MARKER_KEY};
pub use key_cmp::{array_key_cmp, obj_key_cmp, KeyOrder};
pub use key_string::key_string;
