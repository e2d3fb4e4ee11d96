use serde_json::Value;

/// Turn a JSON value into the key it addresses.
///
/// Move destinations arrive as numbers on the wire but are looked up as keys,
/// so `2` and `2.0` both become `"2"`. Strings are used as-is; other values
/// fall back to their JSON text.
///
/// # Examples
///
/// ```
/// use json_delta_util::key_string;
/// use serde_json::json;
///
/// assert_eq!(key_string(&json!(2)), "2");
/// assert_eq!(key_string(&json!(2.0)), "2");
/// assert_eq!(key_string(&json!("4")), "4");
/// assert_eq!(key_string(&json!(true)), "true");
/// ```
pub fn key_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u.to_string()
            } else if let Some(i) = n.as_i64() {
                i.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 => {
                        (f as i64).to_string()
                    }
                    _ => n.to_string(),
                }
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
