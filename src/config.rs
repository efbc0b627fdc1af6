//! Widget configuration — the declarative input for one render.

use serde::Deserialize;
use std::collections::HashMap;

/// Which acquisition strategy feeds the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Single GET against a generic JSON endpoint.
    #[default]
    Api,
    /// Tiered RSS acquisition: preview service first, direct parse on
    /// connection failure.
    Rss,
}

/// Declarative configuration for a single widget render.
///
/// Field names match the JSON emitted by the dashboard's widget builder,
/// so existing stored configurations deserialize unchanged. The config is
/// immutable for the duration of one render and shares no state with any
/// other invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub data_source: DataSource,

    /// Endpoint URL — a JSON API for `api` sources, a feed URL for `rss`.
    #[serde(default)]
    pub api_url: String,

    /// Operator-supplied request headers. A default user-agent is merged
    /// underneath; operator values win on collision.
    #[serde(default)]
    pub api_headers: HashMap<String, String>,

    /// Template identifier, resolved against the catalog at render time.
    /// An unknown identifier renders an error fragment rather than failing
    /// configuration parsing.
    #[serde(default = "default_template")]
    pub template_type: String,

    /// Field name -> path expression, applied to the acquired data.
    #[serde(default)]
    pub data_mapping: HashMap<String, String>,

    /// Options forwarded verbatim to the RSS preview service; `max_items`
    /// also bounds the direct feed parser.
    #[serde(default)]
    pub rss_config: serde_json::Map<String, serde_json::Value>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_template() -> String {
    "key_value".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl WidgetConfig {
    /// Parse a configuration from its serialized JSON form.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Item cap for direct feed parsing (`rss_config.max_items`, default 10).
    pub fn max_items(&self) -> usize {
        self.rss_config
            .get("max_items")
            .and_then(|v| v.as_u64())
            .unwrap_or(10) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::from_json("{}").unwrap();
        assert_eq!(config.data_source, DataSource::Api);
        assert_eq!(config.template_type, "key_value");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.max_items(), 10);
        assert!(config.api_url.is_empty());
        assert!(config.data_mapping.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = WidgetConfig::from_json(
            r#"{
                "data_source": "rss",
                "api_url": "https://example.com/feed.xml",
                "api_headers": {"Authorization": "Bearer x"},
                "template_type": "rss_headlines",
                "data_mapping": {"feed_title": "title", "items": "items"},
                "rss_config": {"max_items": 5},
                "timeout": 10
            }"#,
        )
        .unwrap();
        assert_eq!(config.data_source, DataSource::Rss);
        assert_eq!(config.max_items(), 5);
        assert_eq!(config.timeout, 10);
        assert_eq!(config.data_mapping["feed_title"], "title");
    }

    #[test]
    fn test_unknown_data_source_rejected() {
        assert!(WidgetConfig::from_json(r#"{"data_source": "carrier-pigeon"}"#).is_err());
    }
}
