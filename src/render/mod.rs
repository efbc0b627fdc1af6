//! Template renderer registry — a fixed catalog of fragment renderers.
//!
//! Dispatch is an exhaustive match over [`TemplateId`] rather than a
//! string-keyed function table, so adding a template is a compile-checked
//! change and an unrecognized identifier has exactly one handling path.

pub mod html;
mod templates;

use crate::error::TemplateError;
use crate::mapping::MappedData;

/// The fixed template catalog, plus an `Unknown` arm so an unrecognized
/// identifier degrades to an error fragment at render time instead of
/// failing configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateId {
    KeyValue,
    TitleSubtitleValue,
    MetricGrid,
    WeatherCurrent,
    TimeDisplay,
    StatusList,
    IconList,
    TextBlock,
    ChartSimple,
    ImageCaption,
    RssHeadlines,
    RssSummary,
    RssFeedInfo,
    Unknown(String),
}

impl TemplateId {
    /// Identifiers of every known template, in catalog order.
    pub const KNOWN: [&'static str; 13] = [
        "key_value",
        "title_subtitle_value",
        "metric_grid",
        "weather_current",
        "time_display",
        "status_list",
        "icon_list",
        "text_block",
        "chart_simple",
        "image_caption",
        "rss_headlines",
        "rss_summary",
        "rss_feed_info",
    ];

    pub fn parse(id: &str) -> Self {
        match id {
            "key_value" => Self::KeyValue,
            "title_subtitle_value" => Self::TitleSubtitleValue,
            "metric_grid" => Self::MetricGrid,
            "weather_current" => Self::WeatherCurrent,
            "time_display" => Self::TimeDisplay,
            "status_list" => Self::StatusList,
            "icon_list" => Self::IconList,
            "text_block" => Self::TextBlock,
            "chart_simple" => Self::ChartSimple,
            "image_caption" => Self::ImageCaption,
            "rss_headlines" => Self::RssHeadlines,
            "rss_summary" => Self::RssSummary,
            "rss_feed_info" => Self::RssFeedInfo,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Render mapped data through the template named by `template_type`.
///
/// Pure and single-pass: same identifier and data, same fragment (the one
/// exception is `time_display`, whose clock fallback reads the wall
/// clock). Errors carry the user-facing message verbatim.
pub fn render(template_type: &str, data: &MappedData) -> Result<String, TemplateError> {
    match TemplateId::parse(template_type) {
        TemplateId::KeyValue => Ok(templates::key_value(data)),
        TemplateId::TitleSubtitleValue => Ok(templates::title_subtitle_value(data)),
        TemplateId::MetricGrid => templates::metric_grid(data),
        TemplateId::WeatherCurrent => Ok(templates::weather_current(data)),
        TemplateId::TimeDisplay => Ok(templates::time_display(data)),
        TemplateId::StatusList => templates::status_list(data),
        TemplateId::IconList => templates::icon_list(data),
        TemplateId::TextBlock => Ok(templates::text_block(data)),
        TemplateId::ChartSimple => templates::chart_simple(data),
        TemplateId::ImageCaption => templates::image_caption(data),
        TemplateId::RssHeadlines => templates::rss_headlines(data),
        TemplateId::RssSummary => Ok(templates::rss_summary(data)),
        TemplateId::RssFeedInfo => Ok(templates::rss_feed_info(data)),
        TemplateId::Unknown(other) => Err(TemplateError::Unknown(other)),
    }
}

/// Uniform error fragment: a fixed-shape snippet with an icon and the
/// escaped failure message. Every fatal pipeline condition ends here.
pub fn error_fragment(message: &str) -> String {
    format!(
        "<div class=\"widget-error\">\n\
         <div class=\"error-icon\">⚠️</div>\n\
         <div class=\"error-message\">{}</div>\n\
         </div>",
        html::escape(message),
    )
}
