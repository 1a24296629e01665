//! Shortcut settings.
//!
//! Describes one `.lnk` file: where it lives, what it launches and the
//! optional metadata stored alongside the target.

use crate::aumid::AppUserModelId;
use crate::config::ShortcutConfig;
use crate::error::{Result, ShortcutError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for a single shortcut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortcutSettings {
    /// Where the `.lnk` file is written. Must be absolute.
    pub shortcut_path: PathBuf,
    /// Program the shortcut launches.
    pub target_path: PathBuf,
    /// Command-line arguments passed to the target.
    #[serde(default)]
    pub arguments: Option<String>,
    /// Tooltip shown by Explorer.
    #[serde(default)]
    pub description: Option<String>,
    /// File holding the icon resource.
    #[serde(default)]
    pub icon_location: Option<PathBuf>,
    /// Index of the icon within `icon_location`.
    #[serde(default)]
    pub icon_index: i32,
    /// Start-in directory.
    #[serde(default)]
    pub working_directory: Option<PathBuf>,
    /// AppUserModelId stored in the shortcut's property store.
    #[serde(default)]
    pub app_user_model_id: Option<String>,
    /// Only refresh an existing shortcut, never create a new one.
    #[serde(default)]
    pub only_if_exists: bool,
}

impl ShortcutSettings {
    /// Create a new settings builder.
    pub fn builder(
        shortcut_path: impl Into<PathBuf>,
        target_path: impl Into<PathBuf>,
    ) -> ShortcutSettingsBuilder {
        ShortcutSettingsBuilder::new(shortcut_path, target_path)
    }

    /// Load settings from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| ShortcutError::io_with_path(e, path))?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// The parsed AppUserModelId, if one was given.
    ///
    /// An empty string counts as no ID.
    pub fn app_user_model_id(&self) -> Result<Option<AppUserModelId>> {
        match self.app_user_model_id.as_deref() {
            None | Some("") => Ok(None),
            Some(id) => AppUserModelId::new(id).map(Some),
        }
    }

    /// Check the settings before anything touches the disk.
    pub fn validate(&self) -> Result<()> {
        if !self.shortcut_path.is_absolute() {
            return Err(ShortcutError::PathNotAbsolute(self.shortcut_path.clone()));
        }

        if self.shortcut_path.file_name().is_none() {
            return Err(ShortcutError::Validation {
                field: "shortcut_path".to_string(),
                message: format!("{} has no file name", self.shortcut_path.display()),
            });
        }

        if self.target_path.as_os_str().is_empty() {
            return Err(ShortcutError::Validation {
                field: "target_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        self.app_user_model_id()?;

        Ok(())
    }
}

/// Builder for shortcut settings.
pub struct ShortcutSettingsBuilder {
    settings: ShortcutSettings,
}

impl ShortcutSettingsBuilder {
    /// Create a new builder.
    pub fn new(shortcut_path: impl Into<PathBuf>, target_path: impl Into<PathBuf>) -> Self {
        Self {
            settings: ShortcutSettings {
                shortcut_path: shortcut_path.into(),
                target_path: target_path.into(),
                arguments: None,
                description: None,
                icon_location: None,
                icon_index: ShortcutConfig::DEFAULT_ICON_INDEX,
                working_directory: None,
                app_user_model_id: None,
                only_if_exists: false,
            },
        }
    }

    /// Set the command-line arguments.
    pub fn arguments(mut self, arguments: impl Into<String>) -> Self {
        self.settings.arguments = Some(arguments.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.settings.description = Some(description.into());
        self
    }

    /// Set the icon file.
    pub fn icon_location(mut self, icon: impl Into<PathBuf>) -> Self {
        self.settings.icon_location = Some(icon.into());
        self
    }

    /// Set the icon index.
    pub fn icon_index(mut self, index: i32) -> Self {
        self.settings.icon_index = index;
        self
    }

    /// Set the working directory.
    pub fn working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.settings.working_directory = Some(dir.into());
        self
    }

    /// Set the AppUserModelId.
    pub fn app_user_model_id(mut self, id: impl Into<String>) -> Self {
        self.settings.app_user_model_id = Some(id.into());
        self
    }

    /// Only update the shortcut if it already exists.
    pub fn only_if_exists(mut self, only_if_exists: bool) -> Self {
        self.settings.only_if_exists = only_if_exists;
        self
    }

    /// Build the settings.
    pub fn build(self) -> ShortcutSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn absolute(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn test_builder() {
        let settings = ShortcutSettings::builder(absolute("App.lnk"), absolute("app.exe"))
            .arguments("--prefer-launch")
            .description("Launch the app")
            .icon_location(absolute("app.ico"))
            .icon_index(2)
            .working_directory(std::env::temp_dir())
            .app_user_model_id("Contoso.App")
            .build();

        assert_eq!(settings.arguments.as_deref(), Some("--prefer-launch"));
        assert_eq!(settings.description.as_deref(), Some("Launch the app"));
        assert_eq!(settings.icon_index, 2);
        assert!(!settings.only_if_exists);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_relative_shortcut_path_rejected() {
        let settings = ShortcutSettings::builder("App.lnk", absolute("app.exe")).build();
        assert!(matches!(
            settings.validate(),
            Err(ShortcutError::PathNotAbsolute(_))
        ));
    }

    #[test]
    fn test_empty_target_rejected() {
        let settings = ShortcutSettings::builder(absolute("App.lnk"), "").build();
        assert!(matches!(
            settings.validate(),
            Err(ShortcutError::Validation { ref field, .. }) if field == "target_path"
        ));
    }

    #[test]
    fn test_empty_app_id_is_absent() {
        let settings = ShortcutSettings::builder(absolute("App.lnk"), absolute("app.exe"))
            .app_user_model_id("")
            .build();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.app_user_model_id().unwrap(), None);
    }

    #[test]
    fn test_invalid_app_id_rejected() {
        let settings = ShortcutSettings::builder(absolute("App.lnk"), absolute("app.exe"))
            .app_user_model_id("not valid")
            .build();
        assert!(matches!(
            settings.validate(),
            Err(ShortcutError::InvalidAppUserModelId { .. })
        ));
    }

    #[test]
    fn test_from_json_file_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let json_path = temp_dir.path().join("shortcut.json");
        let shortcut = temp_dir.path().join("App.lnk");
        let target = temp_dir.path().join("app.exe");

        let json = serde_json::json!({
            "shortcut_path": shortcut,
            "target_path": target,
            "app_user_model_id": "Contoso.App",
        });
        fs::write(&json_path, json.to_string()).unwrap();

        let settings = ShortcutSettings::from_json_file(&json_path).unwrap();
        assert_eq!(settings.shortcut_path, shortcut);
        assert_eq!(settings.arguments, None);
        assert_eq!(settings.icon_index, 0);
        assert!(!settings.only_if_exists);
        assert_eq!(
            settings.app_user_model_id().unwrap().unwrap().as_str(),
            "Contoso.App"
        );
    }

    #[test]
    fn test_from_json_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = ShortcutSettings::from_json_file(&temp_dir.path().join("nope.json"))
            .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
