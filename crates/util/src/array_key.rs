//! Array-diff key conventions.
//!
//! Inside an array node of a delta, a key prefixed with `_` names an index of
//! the base array (the origin) and a bare key names an index of the new array
//! (the destination). The reserved `_t` key marks the node as an array node.

/// Reserved key marking a delta node as an array node.
pub const MARKER_KEY: &str = "_t";

/// Value conventionally stored under [`MARKER_KEY`].
pub const ARRAY_MARKER_VALUE: &str = "a";

const ORIGIN_PREFIX: char = '_';

/// A classified array-node key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayKey {
    /// The `_t` marker itself.
    Marker,
    /// `_N`: index `N` in the base array.
    Origin(usize),
    /// `N`: index `N` in the new array.
    Current(usize),
    /// Anything that is not an index.
    Other,
}

impl ArrayKey {
    /// Classify an array-node key.
    ///
    /// # Example
    ///
    /// ```
    /// use json_delta_util::ArrayKey;
    ///
    /// assert_eq!(ArrayKey::parse("_t"), ArrayKey::Marker);
    /// assert_eq!(ArrayKey::parse("_3"), ArrayKey::Origin(3));
    /// assert_eq!(ArrayKey::parse("3"), ArrayKey::Current(3));
    /// assert_eq!(ArrayKey::parse("name"), ArrayKey::Other);
    /// ```
    pub fn parse(key: &str) -> Self {
        if key == MARKER_KEY {
            return ArrayKey::Marker;
        }
        match key.strip_prefix(ORIGIN_PREFIX) {
            Some(rest) => parse_index(rest).map_or(ArrayKey::Other, ArrayKey::Origin),
            None => parse_index(key).map_or(ArrayKey::Other, ArrayKey::Current),
        }
    }

    /// Position of the key on the numeric sort axis.
    ///
    /// Origins sort at their index, destinations at index + 0.1, so a
    /// destination lands right after the origin with the same number.
    /// Keys that are not indices have no position.
    pub fn sort_number(self) -> Option<f64> {
        match self {
            ArrayKey::Marker => Some(-1.0),
            ArrayKey::Origin(n) => Some(n as f64),
            ArrayKey::Current(n) => Some(n as f64 + 0.1),
            ArrayKey::Other => None,
        }
    }
}

/// Parse a string of ASCII digits as an index.
///
/// Unlike `str::parse`, a leading `+` is rejected.
pub fn parse_index(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Drop the origin prefix from an array-node key, if present.
///
/// ```
/// use json_delta_util::strip_origin_prefix;
///
/// assert_eq!(strip_origin_prefix("_4"), "4");
/// assert_eq!(strip_origin_prefix("4"), "4");
/// ```
pub fn strip_origin_prefix(key: &str) -> &str {
    key.strip_prefix(ORIGIN_PREFIX).unwrap_or(key)
}
