//! Error types for the macro exchange.

use thiserror::Error;

/// Faults raised while talking to the remote office instance.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Bridge transport error: {0}")]
    Transport(String),

    #[error("Bridge protocol error: {0}")]
    Protocol(String),

    #[error("No such element: {0}")]
    NoSuchElement(String),

    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    #[error("Element name is not text: {0}")]
    InvalidKey(String),

    #[error("Remote exception {kind}: {message}")]
    Exception { kind: String, message: String },

    #[error("Unexpected value from {method}: expected {expected}")]
    UnexpectedValue {
        method: String,
        expected: &'static str,
    },
}

/// Errors surfaced by resolution, library access and the exchange operations.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("No active document in the office instance")]
    NoActiveDocument,

    #[error("Library not found: {0}")]
    ContainerNotFound(String),

    #[error("Library is read-only: {0}")]
    ReadOnly(String),

    #[error("Library is password protected: {0}")]
    PasswordProtected(String),

    #[error("Illegal macro name: {0}. Expected library.module[.routine]")]
    IllegalMacroName(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid key type: {0} (keys must be text)")]
    InvalidKeyType(String),

    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Remote error: {0}")]
    Remote(RemoteError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ExchangeError {
    fn from(err: config::ConfigError) -> Self {
        ExchangeError::ConfigError(err.to_string())
    }
}

/// Remote lookup failures keep their domain meaning; everything else stays a remote fault.
impl From<RemoteError> for ExchangeError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::NoSuchElement(name) => ExchangeError::KeyNotFound(name),
            RemoteError::InvalidKey(key) => ExchangeError::InvalidKeyType(key),
            other => ExchangeError::Remote(other),
        }
    }
}

impl ExchangeError {
    /// Name of the document, library or key the error refers to, if any.
    pub fn subject(&self) -> Option<&str> {
        match self {
            ExchangeError::DocumentNotFound(name)
            | ExchangeError::ContainerNotFound(name)
            | ExchangeError::ReadOnly(name)
            | ExchangeError::PasswordProtected(name)
            | ExchangeError::IllegalMacroName(name)
            | ExchangeError::KeyNotFound(name)
            | ExchangeError::InvalidKeyType(name) => Some(name),
            _ => None,
        }
    }
}
