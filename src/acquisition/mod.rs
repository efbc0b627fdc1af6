//! Data acquisition — fetch raw widget data from remote sources.
//!
//! Two source kinds: a generic JSON API (single GET) and RSS feeds (tiered
//! protocol in [`rss`]). Acquisition failures are fatal for the render and
//! are never retried; each request carries the configured timeout.

pub mod http_client;
pub mod rss;

use serde_json::Value;

use crate::config::{DataSource, WidgetConfig};
use crate::error::AcquisitionError;

/// Fetch raw data for a widget according to its configured source.
pub async fn acquire(config: &WidgetConfig) -> Result<Value, AcquisitionError> {
    match config.data_source {
        DataSource::Api => fetch_api(config).await,
        DataSource::Rss => rss::RssSource::new().fetch(config).await,
    }
}

/// Single GET against the configured endpoint; the response must be HTTP
/// success and decode as JSON.
async fn fetch_api(config: &WidgetConfig) -> Result<Value, AcquisitionError> {
    if config.api_url.is_empty() {
        return Err(AcquisitionError::InvalidConfig(
            "API URL is required".to_string(),
        ));
    }
    let client = http_client::HttpClient::new(config.timeout);
    client.get_json(&config.api_url, &config.api_headers).await
}
