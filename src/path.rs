//! Path-expression resolver — dotted/bracket traversal over JSON values.
//!
//! Grammar:
//! ```text
//! path    := segment ('.' segment)*
//! segment := name | name '[' index ']' | '[' index ']'
//! index   := base-10 integer
//! ```
//!
//! Traversal is strictly left to right with no backtracking; the first
//! failing segment aborts resolution with a [`PathError`].

use serde_json::Value;

use crate::error::PathError;

/// Resolve a path expression against a JSON value.
///
/// An empty path returns the value unchanged. A bare segment (no dots, no
/// brackets) is a single-key shortcut with one quirk kept for
/// compatibility with existing mapping tables: when the key is absent and
/// the path text parses as a number, the text itself is returned as a
/// literal string. This lets a mapping entry inject a fixed value without
/// a separate constant syntax. Key lookup always wins over the literal.
pub fn resolve(data: &Value, path: &str) -> Result<Value, PathError> {
    if path.is_empty() {
        return Ok(data.clone());
    }

    if !path.contains('.') && !path.contains('[') && !path.contains(']') {
        if let Some(map) = data.as_object() {
            if let Some(v) = map.get(path) {
                return Ok(v.clone());
            }
        }
        if path.parse::<f64>().is_ok() {
            return Ok(Value::String(path.to_string()));
        }
        return match data.as_object() {
            // Absent key degrades to null here, unlike multi-segment
            // traversal where a missing key is an error.
            Some(map) => Ok(map.get(path).cloned().unwrap_or(Value::Null)),
            None => Err(PathError::NotAnObject(path.to_string())),
        };
    }

    let mut current = data.clone();
    for segment in path.split('.') {
        if segment.is_empty() {
            continue;
        }
        current = if segment.contains('[') && segment.contains(']') {
            descend_indexed(current, segment)?
        } else {
            descend_key(current, segment)?
        };
    }
    Ok(current)
}

/// Descend one `name[index]` segment. A leading name is looked up first;
/// a bare `[index]` indexes the current value directly. Negative indices
/// count from the end of the array.
fn descend_indexed(current: Value, segment: &str) -> Result<Value, PathError> {
    let Some((name, bracket)) = segment.split_once('[') else {
        return descend_key(current, segment);
    };
    let index_text = bracket.trim_end_matches(']');

    let base = if name.is_empty() {
        current
    } else {
        descend_key(current, name)?
    };

    let index: i64 = index_text
        .parse()
        .map_err(|_| PathError::InvalidIndex(index_text.to_string()))?;

    let Value::Array(items) = base else {
        return Err(PathError::NotAnArray(segment.to_string()));
    };

    let effective = if index < 0 {
        index + items.len() as i64
    } else {
        index
    };
    if effective < 0 || effective as usize >= items.len() {
        return Err(PathError::OutOfBounds {
            index,
            len: items.len(),
        });
    }
    Ok(items[effective as usize].clone())
}

fn descend_key(current: Value, key: &str) -> Result<Value, PathError> {
    match current {
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| PathError::MissingKey(key.to_string())),
        _ => Err(PathError::NotAnObject(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_path_returns_data() {
        let data = json!({"a": 1});
        assert_eq!(resolve(&data, "").unwrap(), data);
    }

    #[test]
    fn test_nested_round_trip() {
        let data = json!({"a": {"b": [{"c": 5}]}});
        assert_eq!(resolve(&data, "a.b[0].c").unwrap(), json!(5));
    }

    #[test]
    fn test_empty_array_is_out_of_bounds() {
        let data = json!({"a": {"b": []}});
        assert!(matches!(
            resolve(&data, "a.b[0].c"),
            Err(PathError::OutOfBounds { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_bare_numeric_literal_fallback() {
        // Against data without the key, numeric-looking text is a literal.
        assert_eq!(resolve(&json!({}), "42").unwrap(), json!("42"));
        assert_eq!(resolve(&json!({}), "3.5").unwrap(), json!("3.5"));
        // Key lookup wins over the literal.
        assert_eq!(resolve(&json!({"42": "x"}), "42").unwrap(), json!("x"));
    }

    #[test]
    fn test_bare_missing_key_degrades_to_null() {
        assert_eq!(resolve(&json!({"a": 1}), "missing").unwrap(), Value::Null);
    }

    #[test]
    fn test_bare_key_on_scalar_fails() {
        assert!(matches!(
            resolve(&json!(7), "name"),
            Err(PathError::NotAnObject(_))
        ));
        // Numeric-looking paths still resolve to literals on any shape.
        assert_eq!(resolve(&json!(7), "10").unwrap(), json!("10"));
    }

    #[test]
    fn test_multi_segment_missing_key_is_error() {
        assert!(matches!(
            resolve(&json!({"a": {}}), "a.b"),
            Err(PathError::MissingKey(_))
        ));
    }

    #[test]
    fn test_descend_into_scalar_is_error() {
        assert!(matches!(
            resolve(&json!({"a": 3}), "a.b"),
            Err(PathError::NotAnObject(_))
        ));
    }

    #[test]
    fn test_bare_bracket_indexes_current_value() {
        let data = json!({"a": [10, 20]});
        assert_eq!(resolve(&data, "a.[1]").unwrap(), json!(20));
    }

    #[test]
    fn test_negative_index_counts_from_end() {
        let data = json!({"items": [1, 2, 3]});
        assert_eq!(resolve(&data, "items[-1]").unwrap(), json!(3));
        assert!(resolve(&data, "items[-4]").is_err());
    }

    #[test]
    fn test_non_integer_index() {
        assert!(matches!(
            resolve(&json!({"a": [1]}), "a[x]"),
            Err(PathError::InvalidIndex(_))
        ));
    }

    #[test]
    fn test_indexing_non_array() {
        assert!(matches!(
            resolve(&json!({"a": {"b": 1}}), "a[0]"),
            Err(PathError::NotAnArray(_))
        ));
    }

    #[test]
    fn test_empty_segments_skipped() {
        let data = json!({"a": {"b": 1}});
        assert_eq!(resolve(&data, "a..b").unwrap(), json!(1));
    }

    #[test]
    fn test_resolution_is_pure() {
        let data = json!({"a": {"b": [{"c": 5}]}});
        let first = resolve(&data, "a.b[0].c").unwrap();
        let second = resolve(&data, "a.b[0].c").unwrap();
        assert_eq!(first, second);
        assert_eq!(data, json!({"a": {"b": [{"c": 5}]}}));
    }
}
