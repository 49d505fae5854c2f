use thiserror::Error;

/// Failure of a user action addressed by a qualified field path.
/// The form state is unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("invalid field path '{0}'")]
    InvalidPath(String),
    #[error("no field at '{0}'")]
    UnknownPath(String),
    #[error("index {index} is out of range for '{path}' ({len} items)")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },
    #[error("cannot move '{path}' by {delta}: the list has {len} items")]
    MoveOutOfRange { path: String, delta: i32, len: usize },
    #[error("'{path}' is a {kind} field and cannot {action}")]
    Unsupported {
        path: String,
        kind: &'static str,
        action: &'static str,
    },
}

/// Import text that could not be applied. Import never touches the form
/// when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportParseError {
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("expected a JSON object at the document root, found {found}")]
    NotAnObject { found: &'static str },
}

impl From<serde_json::Error> for ImportParseError {
    fn from(err: serde_json::Error) -> Self {
        ImportParseError::Syntax {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
