use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use super::DocumentFormat;

/// File name offered for an app's exported configuration, e.g.
/// `dns-config.json`.
pub fn export_file_name(app_id: &str, format: DocumentFormat) -> String {
    format!("{app_id}-config.{}", format.extension())
}

/// Where an exported configuration goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Stdout,
    /// Exact file path.
    File(PathBuf),
    /// Directory that receives `<app id>-config.<ext>`.
    Directory(PathBuf),
}

impl OutputDestination {
    pub fn file(path: impl AsRef<Path>) -> Self {
        OutputDestination::File(path.as_ref().to_path_buf())
    }

    pub fn directory(path: impl AsRef<Path>) -> Self {
        OutputDestination::Directory(path.as_ref().to_path_buf())
    }

    /// Concrete file this destination writes for `app_id`, if any.
    pub fn resolve(&self, app_id: &str, format: DocumentFormat) -> Option<PathBuf> {
        match self {
            OutputDestination::Stdout => None,
            OutputDestination::File(path) => Some(path.clone()),
            OutputDestination::Directory(dir) => Some(dir.join(export_file_name(app_id, format))),
        }
    }
}

/// Encoding and targets of one configuration export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    pub format: DocumentFormat,
    pub pretty: bool,
    pub destinations: Vec<OutputDestination>,
}

impl OutputOptions {
    /// Pretty output in `format`, printed to stdout.
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: true,
            destinations: vec![OutputDestination::Stdout],
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_destinations(mut self, destinations: Vec<OutputDestination>) -> Self {
        self.destinations = destinations;
        self
    }

    pub fn add_destination(mut self, destination: OutputDestination) -> Self {
        self.destinations.push(destination);
        self
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self::new(DocumentFormat::Json)
    }
}

/// Serialize `value` once and write it to every destination. Returns the
/// files written, in destination order.
pub fn emit(value: &Value, app_id: &str, options: &OutputOptions) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    if options.destinations.is_empty() {
        return Ok(written);
    }
    let payload = serialize_value(value, options.format, options.pretty)?;
    for destination in &options.destinations {
        match destination.resolve(app_id, options.format) {
            None => print_payload(&payload).context("failed to write to stdout")?,
            Some(path) => {
                write_file(&path, &payload)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                written.push(path);
            }
        }
    }
    tracing::info!(
        app = app_id,
        format = %options.format,
        destinations = options.destinations.len(),
        files = written.len(),
        "exported configuration"
    );
    Ok(written)
}

/// Text form of an exported configuration. Pretty JSON uses two-space
/// indentation.
pub fn serialize_value(value: &Value, format: DocumentFormat, pretty: bool) -> Result<String> {
    encode(value, format, pretty).with_context(|| format!("failed to serialize {format}"))
}

fn encode(value: &Value, format: DocumentFormat, pretty: bool) -> Result<String> {
    let text = match format {
        DocumentFormat::Json if pretty => serde_json::to_string_pretty(value)?,
        DocumentFormat::Json => serde_json::to_string(value)?,
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(value)?,
        #[cfg(feature = "toml")]
        DocumentFormat::Toml if pretty => toml::to_string_pretty(value)?,
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::to_string(value)?,
    };
    Ok(text)
}

fn print_payload(payload: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{payload}")?;
    stdout.flush()
}

fn write_file(path: &Path, payload: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, format!("{payload}\n"))?;
    Ok(())
}
