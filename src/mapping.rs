//! Mapping applier — field tables over raw data, with per-field isolation.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::error::PathError;
use crate::path;

/// Flat, field-name keyed view of the acquired data. Unresolved fields
/// hold `Value::Null`; renderers supply their own display defaults.
pub type MappedData = HashMap<String, Value>;

/// Apply a field -> path-expression table to raw acquired data.
///
/// Every field resolves independently; a failed path logs a warning and
/// degrades to null instead of aborting the render. The result always has
/// exactly the same key set as the mapping table.
pub fn apply_mapping(raw: &Value, mapping: &HashMap<String, String>) -> MappedData {
    // Resolve first, then materialize, so degradation stays a separate
    // stage from resolution.
    let resolved: Vec<(&str, &str, Result<Value, PathError>)> = mapping
        .iter()
        .map(|(field, path)| (field.as_str(), path.as_str(), path::resolve(raw, path)))
        .collect();

    let mut mapped = MappedData::with_capacity(resolved.len());
    for (field, path, result) in resolved {
        let value = match result {
            Ok(value) => value,
            Err(e) => {
                warn!(field, path, error = %e, "failed to resolve mapping path");
                Value::Null
            }
        };
        mapped.insert(field.to_string(), value);
    }
    mapped
}
