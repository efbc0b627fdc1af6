//! Render a widget configuration to an HTML fragment.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::WidgetConfig;
use crate::pipeline;

/// Run the widget pipeline for a configuration given inline or as a file.
///
/// The pipeline itself never fails outward (failures render as error
/// fragments), so the only hard errors here are argument and parse
/// problems.
pub async fn run(inline: Option<&str>, file: Option<&Path>) -> Result<()> {
    let raw = match (inline, file) {
        (Some(json), None) => json.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (Some(_), Some(_)) => bail!("pass either inline JSON or --file, not both"),
        (None, None) => bail!("a widget configuration is required (inline JSON or --file)"),
    };

    let config = WidgetConfig::from_json(&raw).context("invalid JSON configuration")?;

    println!("{}", pipeline::run(&config).await);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_requires_exactly_one_source() {
        assert!(run(None, None).await.is_err());
        assert!(run(Some("{}"), Some(Path::new("x.json"))).await.is_err());
    }

    #[tokio::test]
    async fn test_rejects_malformed_json() {
        let err = run(Some("{not json"), None).await.unwrap_err();
        assert!(err.to_string().contains("invalid JSON configuration"));
    }

    #[tokio::test]
    async fn test_reads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // The empty URL renders an error fragment but the command itself
        // succeeds.
        write!(
            file,
            r#"{{"data_source": "api", "api_url": "", "template_type": "key_value"}}"#
        )
        .unwrap();
        run(None, Some(file.path())).await.unwrap();
    }
}
