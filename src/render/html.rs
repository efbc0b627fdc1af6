//! Small HTML helpers shared by every renderer.

use serde_json::Value;

use crate::mapping::MappedData;

/// Escape text for interpolation into a fragment.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Coerce a JSON value to display text. Null is the empty string, never
/// the word "null"; strings render bare, compound values as JSON.
pub fn coerce(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Look up a mapped field as display text. The default applies only when
/// the field is absent; a field that resolved to null coerces to "".
pub fn text_or(data: &MappedData, field: &str, default: &str) -> String {
    match data.get(field) {
        Some(value) => coerce(value),
        None => default.to_string(),
    }
}

/// Character-budget truncation with an ellipsis marker. Not word-boundary
/// aware; the display surface is the budget.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

/// Format a number the way the display shows it: integral values without
/// a decimal point.
pub fn fmt_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
