use std::cmp::Ordering;

use crate::array_key::ArrayKey;

/// Compare two object keys.
///
/// Object keys are ordered by plain string comparison.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use json_delta_util::key_cmp::obj_key_cmp;
///
/// assert_eq!(obj_key_cmp("a", "b"), Ordering::Less);
/// assert_eq!(obj_key_cmp("aa", "b"), Ordering::Less);
/// assert_eq!(obj_key_cmp("B", "a"), Ordering::Less); // uppercase first
/// ```
pub fn obj_key_cmp(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Compare two keys of an array node.
///
/// Keys are compared by [`ArrayKey::sort_number`], so `_1 < 1 < _2 < 2`.
/// Keys without a sort number come after every index key, in string order.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use json_delta_util::key_cmp::array_key_cmp;
///
/// assert_eq!(array_key_cmp("_1", "1"), Ordering::Less);
/// assert_eq!(array_key_cmp("1", "_2"), Ordering::Less);
/// assert_eq!(array_key_cmp("10", "9"), Ordering::Greater);
/// assert_eq!(array_key_cmp("x", "100"), Ordering::Greater);
/// ```
pub fn array_key_cmp(a: &str, b: &str) -> Ordering {
    let ord = match (ArrayKey::parse(a).sort_number(), ArrayKey::parse(b).sort_number()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    // "_1" and "_01" share a sort number; string order keeps the result total.
    ord.then_with(|| a.cmp(b))
}

/// Ordering mode for the merged key list of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrder {
    /// Plain string order.
    Object,
    /// Numeric index order with origins before destinations.
    Array,
}

impl KeyOrder {
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            KeyOrder::Object => obj_key_cmp(a, b),
            KeyOrder::Array => array_key_cmp(a, b),
        }
    }

    /// Sort keys in place.
    pub fn sort<S: AsRef<str>>(self, keys: &mut [S]) {
        keys.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }
}
