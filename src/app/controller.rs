use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use crossterm::event::KeyEvent;
use thiserror::Error;

use crate::{
    catalog::{CatalogError, SchemaCatalog},
    domain::{AppDescriptor, AppSchema, SchemaRef},
    form::{FieldPath, FormCommand, FormError, ImportParseError},
    io::{
        DocumentFormat, OutputOptions, emit, export_file_name, parse_document_str, serialize_value,
    },
};

use super::{options::FormOptions, session::AppSession, status::StatusLine};

#[derive(Debug, Error)]
pub enum ConfiguratorError {
    #[error("no app is selected")]
    NoSelection,
    #[error(transparent)]
    Import(#[from] ImportParseError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("{0:#}")]
    Document(anyhow::Error),
}

/// Token for one in-flight selection. Only the newest ticket may commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    generation: u64,
    descriptor: AppDescriptor,
}

impl SelectionTicket {
    pub fn app_id(&self) -> &str {
        &self.descriptor.id
    }

    /// Reference the host should load before completing the selection.
    pub fn schema_ref(&self) -> &SchemaRef {
        &self.descriptor.schema_ref
    }
}

/// Top-level controller: app list, current session and status line.
pub struct Configurator<C> {
    catalog: C,
    options: FormOptions,
    apps: Vec<AppDescriptor>,
    session: Option<AppSession>,
    status: StatusLine,
    generation: u64,
}

impl<C: SchemaCatalog> Configurator<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_options(catalog, FormOptions::default())
    }

    pub fn with_options(catalog: C, options: FormOptions) -> Self {
        Self {
            catalog,
            options,
            apps: Vec::new(),
            session: None,
            status: StatusLine::new(),
            generation: 0,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Read every schema the catalog lists and keep those with metadata,
    /// sorted by name. A failing catalog leaves the list empty.
    pub fn load_apps(&mut self) -> &[AppDescriptor] {
        self.apps.clear();
        let references = match self.catalog.list_schemas() {
            Ok(references) => references,
            Err(err) => {
                tracing::error!(error = %err, "failed to list schemas");
                self.status.apps_failed();
                return &self.apps;
            }
        };
        for reference in references {
            match self.catalog.load_schema(&reference) {
                Ok(schema) => {
                    if self.apps.iter().any(|app| app.id == schema.id) {
                        tracing::warn!(id = %schema.id, reference = %reference, "duplicate app id, skipping");
                        continue;
                    }
                    self.apps.push(AppDescriptor {
                        id: schema.id,
                        name: schema.name,
                        description: schema.description,
                        schema_ref: reference,
                    });
                }
                Err(err) => {
                    tracing::warn!(reference = %reference, error = %err, "skipping schema");
                }
            }
        }
        self.apps
            .sort_by_cached_key(|app| app.name.to_lowercase());
        tracing::info!(apps = self.apps.len(), "loaded app catalog");
        &self.apps
    }

    pub fn apps(&self) -> &[AppDescriptor] {
        &self.apps
    }

    /// Select an app and load its schema through the catalog. Returns
    /// whether a session is active afterwards.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(ticket) = self.begin_selection(id) else {
            return self.session.is_some();
        };
        let result = self.catalog.load_schema(ticket.schema_ref());
        self.complete_selection(ticket, result);
        self.session.is_some()
    }

    /// Start selecting `id`. An empty id deselects; an unknown id changes
    /// nothing. The current session is discarded as soon as a new
    /// selection begins.
    pub fn begin_selection(&mut self, id: &str) -> Option<SelectionTicket> {
        if id.is_empty() {
            self.deselect();
            return None;
        }
        let Some(descriptor) = self.apps.iter().find(|app| app.id == id).cloned() else {
            tracing::debug!(id, "ignoring selection of unknown app");
            return None;
        };
        self.generation += 1;
        self.session = None;
        tracing::debug!(id, generation = self.generation, "selection started");
        Some(SelectionTicket {
            generation: self.generation,
            descriptor,
        })
    }

    /// Commit a loaded schema for `ticket`. Stale tickets are ignored and
    /// return `false`.
    pub fn complete_selection(
        &mut self,
        ticket: SelectionTicket,
        result: Result<AppSchema, CatalogError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                id = %ticket.descriptor.id,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale selection"
            );
            return false;
        }
        match result {
            Ok(schema) => {
                let session = AppSession::new(ticket.descriptor, schema);
                tracing::info!(id = %session.id(), fields = session.fields().len(), "app selected");
                self.status.editing(session.name());
                self.session = Some(session);
            }
            Err(err) => {
                tracing::warn!(id = %ticket.descriptor.id, error = %err, "failed to load app schema");
                self.status.load_failed(&ticket.descriptor.name);
                self.session = None;
            }
        }
        true
    }

    pub fn deselect(&mut self) {
        self.generation += 1;
        self.session = None;
        self.status.ready();
    }

    pub fn session(&self) -> Option<&AppSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut AppSession> {
        self.session.as_mut()
    }

    pub fn apply(&mut self, command: FormCommand) -> Result<(), ConfiguratorError> {
        let session = self.session.as_mut().ok_or(ConfiguratorError::NoSelection)?;
        session.apply(command)?;
        Ok(())
    }

    pub fn handle_key(&mut self, path: &FieldPath, key: &KeyEvent) -> Result<bool, ConfiguratorError> {
        let step = self.options.number_step;
        let session = self.session.as_mut().ok_or(ConfiguratorError::NoSelection)?;
        Ok(session.handle_key(path, key, step)?)
    }

    /// Collected configuration in the configured export format.
    pub fn export_text(&self) -> Result<String> {
        let Some(session) = &self.session else {
            bail!("no app is selected");
        };
        serialize_value(&session.collect(), self.options.export_format, self.options.pretty)
            .with_context(|| format!("failed to export configuration for {}", session.name()))
    }

    /// Output settings matching the configured export format, printed to
    /// stdout until destinations are added.
    pub fn output_options(&self) -> OutputOptions {
        OutputOptions::new(self.options.export_format).with_pretty(self.options.pretty)
    }

    /// Write the collected configuration to every destination in `output`
    /// and return the files written.
    pub fn export_to(&mut self, output: &OutputOptions) -> Result<Vec<PathBuf>> {
        let Some(session) = &self.session else {
            bail!("no app is selected");
        };
        match emit(&session.collect(), session.id(), output) {
            Ok(written) => {
                self.status.exported(output.destinations.len());
                Ok(written)
            }
            Err(err) => {
                self.status.error(format!("Export failed: {err:#}"));
                Err(err)
            }
        }
    }

    /// Suggested download name, e.g. `dns-config.json`.
    pub fn export_file_name(&self) -> Option<String> {
        self.session
            .as_ref()
            .map(|session| export_file_name(session.id(), self.options.export_format))
    }

    /// Import JSON text into the current form. Invalid text leaves the form
    /// untouched.
    pub fn import_text(&mut self, text: &str) -> Result<(), ConfiguratorError> {
        let session = self.session.as_mut().ok_or(ConfiguratorError::NoSelection)?;
        match session.import_json(text) {
            Ok(()) => {
                tracing::info!(id = %session.id(), "configuration imported");
                self.status.imported();
                Ok(())
            }
            Err(err) => {
                tracing::info!(id = %session.id(), error = %err, "import rejected");
                self.status.invalid_import();
                Err(err.into())
            }
        }
    }

    /// Import a document in any compiled-in format.
    pub fn import_document(&mut self, text: &str, format: DocumentFormat) -> Result<(), ConfiguratorError> {
        if format == DocumentFormat::Json {
            return self.import_text(text);
        }
        let session = self.session.as_mut().ok_or(ConfiguratorError::NoSelection)?;
        let parsed = parse_document_str(text, format).and_then(|value| {
            if value.is_object() {
                Ok(value)
            } else {
                bail!("expected a mapping at the document root")
            }
        });
        match parsed {
            Ok(value) => {
                session.populate(&value);
                tracing::info!(id = %session.id(), %format, "configuration imported");
                self.status.imported();
                Ok(())
            }
            Err(err) => {
                tracing::info!(id = %session.id(), %format, error = %err, "import rejected");
                self.status
                    .error(format!("Invalid {}. Please check your configuration.", format.extension().to_uppercase()));
                Err(ConfiguratorError::Document(err))
            }
        }
    }

    pub fn reset(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reset();
            self.status.reset();
        }
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }
}
