use anyhow::{Context, Result};
use serde_json::Value;

use super::DocumentFormat;

/// Parse a configuration document in any compiled-in format into JSON.
/// Surrounding whitespace is ignored.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    let contents = contents.trim();
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).context("failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).context("failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::from_str::<toml::Table>(contents)
            .context("failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}
