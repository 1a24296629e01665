//! Error types for linkwright.
//!
//! Every fallible operation in the crate returns [`ShortcutError`]. COM
//! failures keep their raw HRESULT so installers can report the exact code.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for shortcut operations.
#[derive(Debug, Error)]
pub enum ShortcutError {
    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Shortcut file path is not absolute: {0:?}")]
    PathNotAbsolute(PathBuf),

    // Validation errors
    #[error("Invalid AppUserModelId {id:?}: {reason}")]
    InvalidAppUserModelId { id: String, reason: String },

    #[error("Invalid app name {name:?}: {reason}")]
    InvalidAppName { name: String, reason: String },

    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    // Shell link errors
    #[error("{operation} failed with HRESULT 0x{code:08X}")]
    Com { operation: String, code: i32 },

    #[error("Unsupported on this platform: {message}")]
    Unsupported { message: String },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for shortcut operations.
pub type Result<T> = std::result::Result<T, ShortcutError>;

impl From<std::io::Error> for ShortcutError {
    fn from(err: std::io::Error) -> Self {
        ShortcutError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for ShortcutError {
    fn from(err: serde_json::Error) -> Self {
        ShortcutError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

#[cfg(windows)]
impl ShortcutError {
    /// Wrap a COM error with the name of the call that produced it.
    pub(crate) fn com(operation: impl Into<String>, err: windows::core::Error) -> Self {
        ShortcutError::Com {
            operation: operation.into(),
            code: err.code().0,
        }
    }
}

impl ShortcutError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ShortcutError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Raw HRESULT of a failed shell-link call, if this is one.
    pub fn hresult(&self) -> Option<i32> {
        match self {
            ShortcutError::Com { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Convert to a process exit code.
    ///
    /// - 1: generic failure
    /// - 2: invalid input (paths, names, AppUserModelIds, settings files)
    /// - 3: the Shell Link object rejected a call
    /// - 4: file system failure
    pub fn exit_code(&self) -> i32 {
        match self {
            ShortcutError::PathNotAbsolute(_)
            | ShortcutError::InvalidAppUserModelId { .. }
            | ShortcutError::InvalidAppName { .. }
            | ShortcutError::Validation { .. }
            | ShortcutError::Json { .. } => 2,

            ShortcutError::Com { .. } => 3,

            ShortcutError::Io { .. } => 4,

            _ => 1,
        }
    }
}
