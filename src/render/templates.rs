//! The template catalog — one renderer per display template.
//!
//! Shared rules: every interpolated value is escaped, every field has a
//! display default, list templates truncate to a fixed cap for the
//! display surface, and a failed list element is skipped rather than
//! aborting the whole list.

use chrono::Local;
use serde_json::Value;
use tracing::warn;

use crate::error::{PathError, TemplateError};
use crate::mapping::MappedData;
use crate::path;
use crate::render::html::{coerce, escape, fmt_number, text_or, truncate};

/// Character budget for the article body in `rss_summary`.
const SUMMARY_BODY_CHARS: usize = 200;

/// Character budget for the feed description in `rss_feed_info`.
const FEED_INFO_DESC_CHARS: usize = 150;

/// Wrap inner markup in the standard widget container.
fn widget_content(inner: &str) -> String {
    format!("<div class=\"widget-content\">\n{inner}\n</div>")
}

/// A `<div class="...">` block, emitted only when the text is non-empty.
fn div_if(class: &str, text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("<div class=\"{class}\">{}</div>", escape(text))
    }
}

pub(super) fn key_value(data: &MappedData) -> String {
    let title = text_or(data, "title", "Value");
    let value = text_or(data, "value", "N/A");
    let unit = text_or(data, "unit", "");
    widget_content(&format!(
        "<div class=\"value-display text-center\">\n\
         <div class=\"label mb-sm\">{}</div>\n\
         <div class=\"value value--large\">{}{}</div>\n\
         </div>",
        escape(&title),
        escape(&value),
        escape(&unit),
    ))
}

pub(super) fn title_subtitle_value(data: &MappedData) -> String {
    let title = text_or(data, "title", "Title");
    let subtitle = text_or(data, "subtitle", "");
    let value = text_or(data, "value", "N/A");
    let description = text_or(data, "description", "");
    format!(
        "<div class=\"widget-content text-center\">\n\
         <div class=\"title mb-md\">{}</div>\n\
         {}\n\
         <div class=\"value value--large mb-md\">{}</div>\n\
         {}\n\
         </div>",
        escape(&title),
        div_if("subtitle mb-sm", &subtitle),
        escape(&value),
        div_if("description mt-sm", &description),
    )
}

pub(super) fn metric_grid(data: &MappedData) -> Result<String, TemplateError> {
    let title_path = text_or(data, "metric_title_path", "name");
    let value_path = text_or(data, "metric_value_path", "value");
    let unit_path = text_or(data, "metric_unit_path", "unit");
    let metrics = required_array(data, "metrics", "Metrics")?;

    let mut cells = Vec::new();
    for metric in metrics.iter().take(8) {
        match metric_cell(metric, &title_path, &value_path, &unit_path) {
            Ok(cell) => cells.push(cell),
            Err(e) => warn!(error = %e, "skipping metric that failed to resolve"),
        }
    }

    Ok(widget_content(&format!(
        "<div class=\"metrics-grid\">\n{}\n</div>",
        cells.join("\n"),
    )))
}

fn metric_cell(
    metric: &Value,
    title_path: &str,
    value_path: &str,
    unit_path: &str,
) -> Result<String, PathError> {
    let title = path::resolve(metric, title_path)?;
    let value = path::resolve(metric, value_path)?;
    let unit = path::resolve(metric, unit_path).unwrap_or(Value::Null);
    Ok(format!(
        "<div class=\"metric-item\">\n\
         <div class=\"metric-info\">\n\
         <div class=\"label\">{}</div>\n\
         <div class=\"value\">{}{}</div>\n\
         </div>\n\
         </div>",
        escape(&coerce(&title)),
        escape(&coerce(&value)),
        escape(&coerce(&unit)),
    ))
}

pub(super) fn weather_current(data: &MappedData) -> String {
    let temperature = text_or(data, "temperature", "N/A");
    let condition = text_or(data, "condition", "Unknown");
    let icon = text_or(data, "icon", "🌤️");
    let humidity = text_or(data, "humidity", "");
    let wind_speed = text_or(data, "wind_speed", "");

    let mut details = String::new();
    if !humidity.is_empty() {
        details.push_str(&format!(
            "<div class=\"description\">Humidity: {}%</div>\n",
            escape(&humidity)
        ));
    }
    if !wind_speed.is_empty() {
        details.push_str(&format!(
            "<div class=\"description\">Wind: {} m/s</div>\n",
            escape(&wind_speed)
        ));
    }

    widget_content(&format!(
        "<div class=\"weather-current\">\n\
         <div class=\"weather-icon\">\n\
         <div style=\"font-size: 48px;\">{}</div>\n\
         </div>\n\
         <div class=\"weather-temp\">\n\
         <div class=\"value value--huge\">{}°</div>\n\
         <div class=\"subtitle\">{}</div>\n\
         </div>\n\
         </div>\n\
         {}",
        escape(&icon),
        escape(&temperature),
        escape(&condition),
        details,
    ))
}

pub(super) fn time_display(data: &MappedData) -> String {
    // Absent fields fall back to the current wall clock; a field that
    // resolved to null still coerces to "".
    let time_val = match data.get("time") {
        Some(v) => coerce(v),
        None => Local::now().format("%H:%M:%S").to_string(),
    };
    let date_val = match data.get("date") {
        Some(v) => coerce(v),
        None => Local::now().format("%Y-%m-%d").to_string(),
    };
    let timezone = text_or(data, "timezone", "");
    let format_type = text_or(data, "format", "");

    widget_content(&format!(
        "<div class=\"time-display\">\n\
         <div class=\"time-main\">\n\
         <div class=\"value value--huge\">{}</div>\n\
         <div class=\"subtitle\">{}</div>\n\
         </div>\n\
         <div class=\"time-meta\">\n{}\n{}\n</div>\n\
         </div>",
        escape(&time_val),
        escape(&date_val),
        div_if("meta", &timezone),
        div_if("meta", &format_type),
    ))
}

pub(super) fn status_list(data: &MappedData) -> Result<String, TemplateError> {
    let name_path = text_or(data, "item_name_path", "name");
    let status_path = text_or(data, "item_status_path", "status");
    let message_path = text_or(data, "item_message_path", "message");
    let items = required_array(data, "items", "Items")?;

    let mut rows = Vec::new();
    for item in items.iter().take(10) {
        match status_row(item, &name_path, &status_path, &message_path) {
            Ok(row) => rows.push(row),
            Err(e) => warn!(error = %e, "skipping status item that failed to resolve"),
        }
    }

    Ok(widget_content(&format!(
        "<div class=\"metrics-grid\">\n{}\n</div>",
        rows.join("\n"),
    )))
}

fn status_row(
    item: &Value,
    name_path: &str,
    status_path: &str,
    message_path: &str,
) -> Result<String, PathError> {
    let name = path::resolve(item, name_path)?;
    let status = path::resolve(item, status_path)?;
    let message = path::resolve(item, message_path).unwrap_or(Value::Null);

    let status_text = coerce(&status);
    Ok(format!(
        "<div class=\"metric-item\">\n\
         <div class=\"metric-icon\">{}</div>\n\
         <div class=\"metric-info\">\n\
         <div class=\"subtitle\">{}</div>\n\
         <div class=\"status-indicator {}\">{}</div>\n\
         {}\n\
         </div>\n\
         </div>",
        status_icon(&status_text),
        escape(&coerce(&name)),
        status_class(&status_text),
        escape(&status_text),
        div_if("description", &coerce(&message)),
    ))
}

fn status_icon(status: &str) -> &'static str {
    match status.to_lowercase().as_str() {
        "online" | "ok" | "healthy" | "success" | "active" | "running" => "✅",
        "offline" | "error" | "failed" | "down" | "inactive" => "❌",
        "warning" | "degraded" | "partial" | "slow" => "⚠️",
        _ => "🔵",
    }
}

fn status_class(status: &str) -> &'static str {
    match status.to_lowercase().as_str() {
        "offline" | "error" | "failed" | "down" | "inactive" => "status-indicator--error",
        "warning" | "degraded" | "partial" | "slow" => "status-indicator--warning",
        _ => "status-indicator--success",
    }
}

pub(super) fn icon_list(data: &MappedData) -> Result<String, TemplateError> {
    let icon_path = text_or(data, "item_icon_path", "icon");
    let title_path = text_or(data, "item_title_path", "title");
    let description_path = text_or(data, "item_description_path", "description");
    let items = required_array(data, "items", "Items")?;

    let mut rows = Vec::new();
    for item in items.iter().take(8) {
        match icon_row(item, &icon_path, &title_path, &description_path) {
            Ok(row) => rows.push(row),
            Err(e) => warn!(error = %e, "skipping icon item that failed to resolve"),
        }
    }

    Ok(widget_content(&format!(
        "<div class=\"metrics-grid\">\n{}\n</div>",
        rows.join("\n"),
    )))
}

fn icon_row(
    item: &Value,
    icon_path: &str,
    title_path: &str,
    description_path: &str,
) -> Result<String, PathError> {
    let icon = path::resolve(item, icon_path).unwrap_or(Value::Null);
    let title = path::resolve(item, title_path)?;
    let description = path::resolve(item, description_path).unwrap_or(Value::Null);

    Ok(format!(
        "<div class=\"metric-item\">\n\
         {}\n\
         <div class=\"metric-info\">\n\
         <div class=\"subtitle\">{}</div>\n\
         {}\n\
         </div>\n\
         </div>",
        div_if("metric-icon", &coerce(&icon)),
        escape(&coerce(&title)),
        div_if("description", &coerce(&description)),
    ))
}

pub(super) fn text_block(data: &MappedData) -> String {
    let title = text_or(data, "title", "");
    let content = text_or(data, "content", "No content");
    let author = text_or(data, "author", "");
    let timestamp = text_or(data, "timestamp", "");

    let author_html = if author.is_empty() {
        String::new()
    } else {
        format!("<div class=\"meta\">— {}</div>", escape(&author))
    };

    widget_content(&format!(
        "{}\n\
         <div class=\"description mb-md\">{}</div>\n\
         {}\n\
         {}",
        div_if("title mb-md", &title),
        escape(&content),
        author_html,
        div_if("meta", &timestamp),
    ))
}

pub(super) fn chart_simple(data: &MappedData) -> Result<String, TemplateError> {
    let title = text_or(data, "title", "Chart");
    let unit = text_or(data, "unit", "");
    let points = required_array(data, "data_points", "Data points")?;

    // Non-numeric entries are skipped like any other failed list element.
    let values: Vec<f64> = points.iter().filter_map(Value::as_f64).collect();

    let stats = if values.is_empty() {
        "<div class=\"description\">No data available</div>".to_string()
    } else {
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        format!(
            "<div class=\"metrics-grid\">\n\
             {}\n{}\n{}\n\
             </div>",
            stat_cell("Min", &fmt_number(min), &unit),
            stat_cell("Max", &fmt_number(max), &unit),
            stat_cell("Avg", &format!("{mean:.1}"), &unit),
        )
    };

    Ok(widget_content(&format!(
        "<div class=\"title mb-md\">{}</div>\n{}",
        escape(&title),
        stats,
    )))
}

fn stat_cell(label: &str, value: &str, unit: &str) -> String {
    format!(
        "<div class=\"metric-item\">\n\
         <div class=\"metric-info\">\n\
         <div class=\"label\">{label}</div>\n\
         <div class=\"value\">{value} {}</div>\n\
         </div>\n\
         </div>",
        escape(unit),
    )
}

pub(super) fn image_caption(data: &MappedData) -> Result<String, TemplateError> {
    let image_url = text_or(data, "image_url", "");
    if image_url.is_empty() {
        return Err(TemplateError::MissingField("Image URL"));
    }
    let caption = text_or(data, "caption", "");
    let alt_text = text_or(data, "alt_text", "Image");
    let title = text_or(data, "title", "");

    Ok(format!(
        "<div class=\"widget-content text-center\">\n\
         {}\n\
         <img src=\"{}\" alt=\"{}\" style=\"max-width: 100%; height: auto; border-radius: var(--border-radius);\">\n\
         {}\n\
         </div>",
        div_if("title mb-md", &title),
        escape(&image_url),
        escape(&alt_text),
        div_if("description mt-md", &caption),
    ))
}

pub(super) fn rss_headlines(data: &MappedData) -> Result<String, TemplateError> {
    let feed_title = text_or(data, "feed_title", "RSS Feed");
    let items = required_array(data, "items", "RSS items")?;

    let mut rows: Vec<String> = items.iter().take(10).map(headline_row).collect();
    if rows.is_empty() {
        rows.push("<div class=\"description\">No headlines available</div>".to_string());
    }

    Ok(widget_content(&format!(
        "<div class=\"title mb-md\">{}</div>\n\
         <div class=\"metrics-grid\">\n{}\n</div>",
        escape(&feed_title),
        rows.join("\n"),
    )))
}

fn headline_row(item: &Value) -> String {
    // A bare scalar item renders as a title-only headline.
    let Some(entry) = item.as_object() else {
        return format!(
            "<div class=\"metric-item\">\n\
             <div class=\"metric-info\">\n\
             <div class=\"subtitle\">• {}</div>\n\
             </div>\n\
             </div>",
            escape(&coerce(item)),
        );
    };

    let title = entry.get("title").map(coerce).unwrap_or_else(|| "Untitled".to_string());
    let link = entry.get("link").map(coerce).unwrap_or_default();
    let pub_date = entry.get("pub_date").map(coerce).unwrap_or_default();

    let headline = if link.is_empty() {
        format!("• {}", escape(&title))
    } else {
        format!(
            "• <a href=\"{}\" target=\"_blank\">{}</a>",
            escape(&link),
            escape(&title),
        )
    };

    format!(
        "<div class=\"metric-item\">\n\
         <div class=\"metric-info\">\n\
         <div class=\"subtitle\">{}</div>\n\
         {}\n\
         </div>\n\
         </div>",
        headline,
        div_if("meta", &pub_date),
    )
}

pub(super) fn rss_summary(data: &MappedData) -> String {
    let feed_title = text_or(data, "feed_title", "RSS Feed");
    let items = data.get("items").and_then(Value::as_array);

    let Some(first) = items.and_then(|list| list.first()) else {
        return format!(
            "<div class=\"widget-content text-center\">\n\
             <div class=\"title mb-md\">{}</div>\n\
             <div class=\"description\">No articles available</div>\n\
             </div>",
            escape(&feed_title),
        );
    };

    let (title, description, author, pub_date, link) = match first.as_object() {
        Some(entry) => (
            entry.get("title").map(coerce).unwrap_or_else(|| "Untitled".to_string()),
            entry.get("description").map(coerce).unwrap_or_default(),
            entry.get("author").map(coerce).unwrap_or_default(),
            entry.get("pub_date").map(coerce).unwrap_or_default(),
            entry.get("link").map(coerce).unwrap_or_default(),
        ),
        None => (coerce(first), String::new(), String::new(), String::new(), String::new()),
    };

    let description = truncate(&description, SUMMARY_BODY_CHARS);

    let author_html = if author.is_empty() {
        String::new()
    } else {
        format!("<div class=\"meta\">By: {}</div>", escape(&author))
    };
    let link_html = if link.is_empty() {
        String::new()
    } else {
        format!(
            "<div class=\"meta\"><a href=\"{}\" target=\"_blank\">Read more</a></div>",
            escape(&link),
        )
    };

    widget_content(&format!(
        "<div class=\"title mb-md\">{}</div>\n\
         <div class=\"subtitle mb-sm\">{}</div>\n\
         <div class=\"description mb-md\">{}</div>\n\
         {}\n{}\n{}",
        escape(&feed_title),
        escape(&title),
        escape(&description),
        author_html,
        div_if("meta", &pub_date),
        link_html,
    ))
}

pub(super) fn rss_feed_info(data: &MappedData) -> String {
    let feed_title = text_or(data, "feed_title", "RSS Feed");
    let feed_description = truncate(&text_or(data, "feed_description", ""), FEED_INFO_DESC_CHARS);
    let feed_link = text_or(data, "feed_link", "");
    let last_updated = text_or(data, "last_updated", "");
    let item_count = data
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);

    let link_html = if feed_link.is_empty() {
        String::new()
    } else {
        format!(
            "<div class=\"meta\"><a href=\"{}\" target=\"_blank\">Visit Feed</a></div>",
            escape(&feed_link),
        )
    };
    let updated_html = if last_updated.is_empty() {
        String::new()
    } else {
        format!("<div class=\"meta\">Last Updated: {}</div>", escape(&last_updated))
    };

    format!(
        "<div class=\"widget-content text-center\">\n\
         <div class=\"title mb-md\">{}</div>\n\
         {}\n\
         <div class=\"value value--large mb-md\">{item_count}</div>\n\
         <div class=\"subtitle mb-md\">Articles Available</div>\n\
         {}\n{}\n\
         </div>",
        escape(&feed_title),
        div_if("description mb-md", &feed_description),
        link_html,
        updated_html,
    )
}

/// A field that must hold a sequence when present. Absent degrades to an
/// empty list; present with any other shape is a template error.
fn required_array<'a>(
    data: &'a MappedData,
    field: &str,
    label: &'static str,
) -> Result<&'a [Value], TemplateError> {
    match data.get(field) {
        None => Ok(&[]),
        Some(Value::Array(list)) => Ok(list),
        Some(_) => Err(TemplateError::ExpectedArray(label)),
    }
}
