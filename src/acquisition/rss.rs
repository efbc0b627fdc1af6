//! RSS acquisition — delegated preview service with direct-parse fallback.
//!
//! Tier 1 POSTs the feed URL to the dashboard's local preview service,
//! which owns content cleanup for the display. If the service cannot be
//! reached at all (a typed connection failure, never inferred from error
//! message text) the feed is fetched and parsed directly with quick-xml.
//! Data and parse errors from the preview service stay fatal.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{json, Value};
use tracing::debug;

use crate::acquisition::http_client::{HttpClient, RSS_USER_AGENT};
use crate::config::WidgetConfig;
use crate::error::AcquisitionError;

/// Fixed endpoint of the dashboard's preview service.
pub const DEFAULT_PREVIEW_URL: &str = "http://localhost:8080/api/rss/preview";

/// Environment override for the preview endpoint.
pub const PREVIEW_URL_ENV: &str = "SLATE_RSS_PREVIEW_URL";

/// Tiered RSS feed source.
pub struct RssSource {
    preview_url: String,
}

impl RssSource {
    pub fn new() -> Self {
        let preview_url =
            std::env::var(PREVIEW_URL_ENV).unwrap_or_else(|_| DEFAULT_PREVIEW_URL.to_string());
        Self { preview_url }
    }

    /// Point tier 1 at a different preview service (used by tests).
    pub fn with_preview_url(url: impl Into<String>) -> Self {
        Self {
            preview_url: url.into(),
        }
    }

    /// Fetch feed data for a widget, preview service first.
    pub async fn fetch(&self, config: &WidgetConfig) -> Result<Value, AcquisitionError> {
        if config.api_url.is_empty() {
            return Err(AcquisitionError::InvalidConfig(
                "RSS feed URL is required".to_string(),
            ));
        }
        let client = HttpClient::new(config.timeout);
        match self.fetch_preview(&client, config).await {
            Ok(feed) => Ok(feed),
            Err(AcquisitionError::Connection(e)) => {
                debug!(error = %e, "preview service unreachable, falling back to direct fetch");
                self.fetch_direct(&client, config).await
            }
            Err(e) => Err(e),
        }
    }

    /// Tier 1: delegate to the preview service. The response must be JSON
    /// carrying a `feed` key.
    async fn fetch_preview(
        &self,
        client: &HttpClient,
        config: &WidgetConfig,
    ) -> Result<Value, AcquisitionError> {
        let payload = json!({
            "feed_url": config.api_url,
            "rss_config": config.rss_config,
        });
        let mut response = client.post_json(&self.preview_url, &payload).await?;
        match response.get_mut("feed") {
            Some(feed) => Ok(feed.take()),
            None => Err(AcquisitionError::Feed(
                "Invalid RSS API response format".to_string(),
            )),
        }
    }

    /// Tier 3: fetch the feed URL directly and parse it ourselves.
    async fn fetch_direct(
        &self,
        client: &HttpClient,
        config: &WidgetConfig,
    ) -> Result<Value, AcquisitionError> {
        let body = client.get_text(&config.api_url, RSS_USER_AGENT).await?;
        parse_feed(&body, config.max_items())
    }
}

impl Default for RssSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct ItemFields {
    title: String,
    description: String,
    link: String,
    pub_date: String,
    author: String,
    guid: String,
}

impl ItemFields {
    fn into_value(self) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "link": self.link,
            "pub_date": self.pub_date,
            "author": self.author,
            "guid": self.guid,
        })
    }
}

/// Parse an RSS 2.0 document into the same JSON shape the preview service
/// returns: `{title, description, link, items: [...]}`.
///
/// A `channel` element is required. Missing sub-elements default to the
/// empty string; items beyond `max_items` are dropped.
pub fn parse_feed(xml: &str, max_items: usize) -> Result<Value, AcquisitionError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut saw_channel = false;
    let mut in_item = false;
    let mut current_tag = String::new();
    let mut feed_title = String::new();
    let mut feed_description = String::new();
    let mut feed_link = String::new();
    let mut item = ItemFields::default();
    let mut items: Vec<Value> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "channel" => saw_channel = true,
                    "item" => {
                        in_item = true;
                        item = ItemFields::default();
                        current_tag.clear();
                    }
                    _ => current_tag = name,
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if name == "item" && in_item {
                    if items.len() < max_items {
                        items.push(std::mem::take(&mut item).into_value());
                    }
                    in_item = false;
                }
                current_tag.clear();
            }
            Ok(Event::Text(t)) => {
                let text = t.unescape().unwrap_or_default();
                if in_item {
                    assign_item_text(&mut item, &current_tag, text.trim());
                } else if saw_channel {
                    // First match wins, like a direct-child lookup.
                    match current_tag.as_str() {
                        "title" => set_if_empty(&mut feed_title, text.trim()),
                        "description" => set_if_empty(&mut feed_description, text.trim()),
                        "link" => set_if_empty(&mut feed_link, text.trim()),
                        _ => {}
                    }
                }
            }
            Ok(Event::CData(t)) => {
                // Descriptions commonly ship as CDATA blocks.
                let text = String::from_utf8_lossy(&t.into_inner()).to_string();
                if in_item {
                    assign_item_text(&mut item, &current_tag, text.trim());
                } else if saw_channel && current_tag == "description" {
                    set_if_empty(&mut feed_description, text.trim());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AcquisitionError::Feed(format!(
                    "RSS XML parsing failed: {e}"
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    if !saw_channel {
        return Err(AcquisitionError::Feed(
            "Invalid RSS format: no channel element found".to_string(),
        ));
    }

    Ok(json!({
        "title": feed_title,
        "description": feed_description,
        "link": feed_link,
        "items": items,
    }))
}

fn assign_item_text(item: &mut ItemFields, tag: &str, text: &str) {
    match tag {
        "title" => set_if_empty(&mut item.title, text),
        "description" => set_if_empty(&mut item.description, text),
        "link" => set_if_empty(&mut item.link, text),
        "pubDate" => set_if_empty(&mut item.pub_date, text),
        "author" => set_if_empty(&mut item.author, text),
        "guid" => set_if_empty(&mut item.guid, text),
        _ => {}
    }
}

fn set_if_empty(slot: &mut String, text: &str) {
    if slot.is_empty() {
        *slot = text.to_string();
    }
}
