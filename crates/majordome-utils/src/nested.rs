//! Nested lookup over JSON values
//!
//! Follows a key path through nested objects in one call instead of a
//! chain of `get`s.

use serde_json::Value;

/// Retrieve a nested value by key path
///
/// Returns None as soon as a key is missing or an intermediate value is
/// not an object.
pub fn get_nested<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(key))
}

/// Retrieve a nested value as `f64`
pub fn get_nested_f64(value: &Value, path: &[&str]) -> Option<f64> {
    get_nested(value, path)?.as_f64()
}
