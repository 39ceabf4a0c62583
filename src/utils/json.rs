//! JSON manipulation utilities
//!
//! This module provides functions for working with JSON data.

use serde_json::Value;

/// Merge two JSON objects
///
/// The `target` object will be modified to include values from the `source` object.
/// If a key exists in both objects, the value from `source` will override the value in `target`,
/// except when both values are objects, in which case they are merged recursively.
/// Nothing happens unless both values are objects.
pub fn merge_json_objects(target: &mut Value, source: &Value) {
    if let (Value::Object(target_map), Value::Object(source_map)) = (target, source) {
        for (key, value) in source_map {
            match target_map.get_mut(key) {
                Some(target_value) if target_value.is_object() && value.is_object() => {
                    merge_json_objects(target_value, value);
                }
                Some(target_value) => {
                    *target_value = value.clone();
                }
                None => {
                    target_map.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_json_objects() {
        let mut target = json!({
            "timeout": 60000,
            "headers": {
                "Accept": "application/json"
            }
        });

        let source = json!({
            "timeout": 5000,
            "headers": {
                "X-Trace": "abc"
            },
            "userAgent": "rpc/1.0"
        });

        merge_json_objects(&mut target, &source);

        assert_eq!(
            target,
            json!({
                "timeout": 5000,
                "headers": {
                    "Accept": "application/json",
                    "X-Trace": "abc"
                },
                "userAgent": "rpc/1.0"
            })
        );
    }

    #[test]
    fn test_merge_replaces_mismatched_types() {
        let mut target = json!({ "headers": {} });
        merge_json_objects(&mut target, &json!({ "headers": "oops" }));
        assert_eq!(target, json!({ "headers": "oops" }));
    }

    #[test]
    fn test_merge_ignores_non_objects() {
        let mut target = json!([1, 2]);
        merge_json_objects(&mut target, &json!({ "a": 1 }));
        assert_eq!(target, json!([1, 2]));
    }
}
