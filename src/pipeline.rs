//! Widget pipeline — acquire, map, render.
//!
//! [`run`] is the total entry point: it always yields a displayable HTML
//! fragment. Internal failures are converted to the uniform error fragment
//! rather than surfaced to the caller, since a dashboard slot with nothing
//! in it is worse than one explaining what went wrong.

use tracing::debug;

use crate::acquisition;
use crate::config::WidgetConfig;
use crate::error::{WidgetError, WidgetResult};
use crate::mapping;
use crate::render;

/// Execute a widget end to end, never failing outward.
///
/// Template-level errors (unknown identifier, wrong data shape) render
/// their message bare; acquisition errors get the pipeline prefix.
pub async fn run(config: &WidgetConfig) -> String {
    match execute(config).await {
        Ok(fragment) => fragment,
        Err(WidgetError::Template(e)) => render::error_fragment(&e.to_string()),
        Err(e) => render::error_fragment(&format!("Widget execution failed: {e}")),
    }
}

async fn execute(config: &WidgetConfig) -> WidgetResult<String> {
    let raw = acquisition::acquire(config).await?;
    let data = mapping::apply_mapping(&raw, &config.data_mapping);
    debug!(
        template = %config.template_type,
        fields = data.len(),
        "rendering widget"
    );
    Ok(render::render(&config.template_type, &data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_api_url_renders_error_fragment() {
        let config = WidgetConfig::from_json(
            r#"{"data_source": "api", "template_type": "key_value"}"#,
        )
        .unwrap();
        let fragment = run(&config).await;
        assert!(fragment.contains("widget-error"));
        assert!(fragment.contains("Widget execution failed: API URL is required"));
    }

    #[tokio::test]
    async fn test_missing_feed_url_renders_error_fragment() {
        let config = WidgetConfig::from_json(
            r#"{"data_source": "rss", "template_type": "rss_headlines"}"#,
        )
        .unwrap();
        let fragment = run(&config).await;
        assert!(fragment.contains("Widget execution failed: RSS feed URL is required"));
    }
}
