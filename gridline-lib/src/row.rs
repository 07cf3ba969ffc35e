//! Dynamic row model and dotted property-path resolution.
//!
//! Rows are plain JSON objects ([`serde_json::Value`]), so the grid and the
//! query layer can work over any tabular dataset without knowing its
//! concrete shape. Nested objects are reached with dot-separated paths
//! (`"category.name"`).

use std::cmp::Ordering;

use serde_json::Value;

/// A single row of tabular data: a JSON object with arbitrary, possibly
/// nested fields.
pub type Row = Value;

/// Resolves a dot-separated property path against a row.
///
/// Walks the row one segment at a time and short-circuits to `None` as soon
/// as the current value is not an object or the segment is absent. Never
/// panics, has no side effects, and is safe to memoize per `(row, path)`
/// pair.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use gridline_lib::row::resolve_path;
///
/// let row = json!({"category": {"name": "Electronics"}});
/// assert_eq!(resolve_path(&row, "category.name"), Some(&json!("Electronics")));
/// assert_eq!(resolve_path(&row, "category.missing"), None);
///
/// let row = json!({"category": null});
/// assert_eq!(resolve_path(&row, "category.name"), None);
/// ```
pub fn resolve_path<'a>(row: &'a Row, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = row;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Returns the display form of a resolved value.
///
/// Strings come back unquoted; numbers and booleans use their canonical
/// text form; `null` is empty. Arrays and objects fall back to compact JSON
/// so unexpected shapes still render something inspectable.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// Total ordering over JSON values, used when sorting a collection in
/// memory.
///
/// Values rank by kind first: null < booleans < numbers < strings < arrays
/// < objects. Numbers compare as `f64`; strings compare case-insensitively.
/// Equal keys leave rows in input order (callers sort stably), so the same
/// input always produces the same output.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(left), Value::Bool(right)) => left.cmp(right),
        (Value::Number(left), Value::Number(right)) => {
            let left = left.as_f64().unwrap_or(0.0);
            let right = right.as_f64().unwrap_or(0.0);
            left.partial_cmp(&right).unwrap_or(Ordering::Equal)
        }
        (Value::String(left), Value::String(right)) => {
            left.to_lowercase().cmp(&right.to_lowercase())
        }
        (left, right) => rank(left).cmp(&rank(right)),
    }
}
