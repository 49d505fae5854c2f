/// Tone of the current status message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusKind {
    #[default]
    Info,
    Success,
    Error,
}

/// Last user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    kind: StatusKind,
    message: String,
}

pub const READY_STATUS: &str = "Select an app to configure.";
pub const IMPORT_SUCCESS: &str = "Configuration imported successfully!";
pub const IMPORT_INVALID: &str = "Invalid JSON. Please check your configuration.";
pub const APPS_FAILED: &str = "Error loading apps - please refresh";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            kind: StatusKind::Info,
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, kind: StatusKind, msg: impl Into<String>) {
        self.kind = kind;
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.set_raw(StatusKind::Info, READY_STATUS);
    }

    pub fn editing(&mut self, name: &str) {
        self.set_raw(StatusKind::Info, format!("Editing {name}"));
    }

    pub fn imported(&mut self) {
        self.set_raw(StatusKind::Success, IMPORT_SUCCESS);
    }

    pub fn invalid_import(&mut self) {
        self.set_raw(StatusKind::Error, IMPORT_INVALID);
    }

    pub fn exported(&mut self, destinations: usize) {
        self.set_raw(
            StatusKind::Success,
            format!("Configuration exported to {destinations} destination(s)"),
        );
    }

    pub fn reset(&mut self) {
        self.set_raw(StatusKind::Info, "Form reset to defaults");
    }

    pub fn load_failed(&mut self, name: &str) {
        self.set_raw(StatusKind::Error, format!("Failed to load configuration for {name}"));
    }

    pub fn apps_failed(&mut self) {
        self.set_raw(StatusKind::Error, APPS_FAILED);
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.set_raw(StatusKind::Error, msg);
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
