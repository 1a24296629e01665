//! Application User Model IDs.
//!
//! The taskbar groups windows, jump lists and notifications by this ID. A
//! shortcut carrying the same ID as the running process lets Windows tie the
//! two together.

use crate::config::ShortcutConfig;
use crate::error::{Result, ShortcutError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated AppUserModelId, e.g. `Contoso.Paint.Viewer`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppUserModelId(String);

impl AppUserModelId {
    /// Parse and validate an AppUserModelId.
    ///
    /// Windows requires at most 128 UTF-16 code units and no spaces.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();

        let invalid = |reason: &str| ShortcutError::InvalidAppUserModelId {
            id: id.clone(),
            reason: reason.to_string(),
        };

        if id.is_empty() {
            return Err(invalid("must not be empty"));
        }

        let len = id.encode_utf16().count();
        if len > ShortcutConfig::APP_ID_MAX_LEN {
            return Err(invalid(&format!(
                "is {} characters long, the limit is {}",
                len,
                ShortcutConfig::APP_ID_MAX_LEN
            )));
        }

        if id.chars().any(char::is_whitespace) {
            return Err(invalid("must not contain whitespace"));
        }

        if id.chars().any(char::is_control) {
            return Err(invalid("must not contain control characters"));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for AppUserModelId {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for AppUserModelId {
    type Error = ShortcutError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<AppUserModelId> for String {
    fn from(id: AppUserModelId) -> Self {
        id.0
    }
}

impl AsRef<str> for AppUserModelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppUserModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_dotted_id() {
        let id: AppUserModelId = "itch.io.Itch".parse().unwrap();
        assert_eq!(id.as_str(), "itch.io.Itch");
        assert_eq!(id.to_string(), "itch.io.Itch");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            AppUserModelId::new(""),
            Err(ShortcutError::InvalidAppUserModelId { .. })
        ));
    }

    #[test]
    fn test_rejects_spaces() {
        let err = AppUserModelId::new("Contoso Paint").unwrap_err();
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn test_length_limit_counts_utf16_units() {
        assert!(AppUserModelId::new("a".repeat(128)).is_ok());
        assert!(AppUserModelId::new("a".repeat(129)).is_err());

        // Each of these is two UTF-16 code units.
        assert!(AppUserModelId::new("\u{1F600}".repeat(64)).is_ok());
        assert!(AppUserModelId::new("\u{1F600}".repeat(65)).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let id: AppUserModelId = serde_json::from_str("\"Contoso.App\"").unwrap();
        assert_eq!(id.as_str(), "Contoso.App");
        assert!(serde_json::from_str::<AppUserModelId>("\"has space\"").is_err());
    }
}
