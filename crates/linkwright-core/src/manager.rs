//! Installer-facing shortcut management.
//!
//! An installed application gets up to three shortcuts: one on the desktop,
//! one in the Start Menu and, if the user pinned the app, the taskbar's own
//! copy. [`ShortcutManager`] creates, refreshes and removes that set.

use crate::config::ShortcutConfig;
use crate::error::{Result, ShortcutError};
use crate::platform::{shortcut_extension, ShortcutLocations};
use crate::settings::ShortcutSettings;
use crate::shortcut::{create_shortcut, remove_shortcut, ShortcutOutcome};
use crate::writer::{platform_writer, LinkWriter};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where a shortcut of the standard set lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutKind {
    Desktop,
    StartMenu,
    Taskbar,
}

impl ShortcutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShortcutKind::Desktop => "desktop",
            ShortcutKind::StartMenu => "start_menu",
            ShortcutKind::Taskbar => "taskbar",
        }
    }
}

impl std::fmt::Display for ShortcutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the standard shortcut set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutSpec {
    pub kind: ShortcutKind,
    pub path: PathBuf,
    /// Never create this shortcut, only refresh it.
    pub only_if_exists: bool,
}

/// Shared content of every shortcut in the set.
#[derive(Debug, Clone, Default)]
pub struct ShortcutTemplate {
    pub target_path: PathBuf,
    pub arguments: Option<String>,
    pub description: Option<String>,
    pub icon_location: Option<PathBuf>,
    pub icon_index: i32,
    pub working_directory: Option<PathBuf>,
    pub app_user_model_id: Option<String>,
}

impl ShortcutTemplate {
    /// Settings for one spec.
    pub fn to_settings(&self, spec: &ShortcutSpec) -> ShortcutSettings {
        ShortcutSettings {
            shortcut_path: spec.path.clone(),
            target_path: self.target_path.clone(),
            arguments: self.arguments.clone(),
            description: self.description.clone(),
            icon_location: self.icon_location.clone(),
            icon_index: self.icon_index,
            working_directory: self.working_directory.clone(),
            app_user_model_id: self.app_user_model_id.clone(),
            only_if_exists: spec.only_if_exists,
        }
    }
}

/// Install options.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallParams {
    /// Refresh existing shortcuts only, so shortcuts the user deleted stay
    /// deleted across upgrades.
    pub for_upgrade: bool,
}

/// Result for one spec of an install.
#[derive(Debug, Clone, Serialize)]
pub struct InstallEntry {
    pub kind: ShortcutKind,
    pub path: PathBuf,
    /// `None` if the spec failed.
    pub outcome: Option<ShortcutOutcome>,
    pub error: Option<String>,
}

/// Result of [`ShortcutManager::install`].
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    /// Whether every spec succeeded (skips count as success).
    pub success: bool,
    pub entries: Vec<InstallEntry>,
    /// Joined error messages if any spec failed.
    pub error: Option<String>,
}

/// Result of [`ShortcutManager::uninstall`].
#[derive(Debug, Clone, Serialize)]
pub struct UninstallReport {
    pub success: bool,
    /// Shortcuts that existed and were removed.
    pub removed: Vec<ShortcutKind>,
    pub error: Option<String>,
}

/// Which shortcuts of the set exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutState {
    pub app_name: String,
    pub desktop: bool,
    pub start_menu: bool,
    pub taskbar: bool,
}

/// Check that a name can be used as a single path component on Windows.
fn validate_component(name: &str, what: &str) -> Result<()> {
    let invalid = |reason: &str| ShortcutError::InvalidAppName {
        name: name.to_string(),
        reason: format!("{} {}", what, reason),
    };

    if name.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }

    if let Some(c) = name
        .chars()
        .find(|c| ShortcutConfig::FORBIDDEN_FILE_NAME_CHARS.contains(c) || c.is_control())
    {
        return Err(invalid(&format!("must not contain {:?}", c)));
    }

    if name.ends_with('.') || name.ends_with(' ') {
        return Err(invalid("must not end with a dot or a space"));
    }

    Ok(())
}

/// File name of an app's shortcut: `<app_name>.lnk`.
pub fn shortcut_file_name(app_name: &str) -> Result<String> {
    validate_component(app_name, "app name")?;
    Ok(format!("{}.{}", app_name, ShortcutConfig::EXTENSION))
}

/// High-level shortcut manager.
pub struct ShortcutManager {
    /// Application name, also the shortcut file stem.
    app_name: String,
    /// Start Menu folder grouping the publisher's apps.
    publisher: Option<String>,
    /// Target directories.
    locations: ShortcutLocations,
    /// Back end writing the files.
    writer: Box<dyn LinkWriter>,
}

impl ShortcutManager {
    /// Create a manager for the current user's folders.
    ///
    /// # Arguments
    ///
    /// * `app_name` - Application name, used as the shortcut file name
    pub fn new(app_name: impl Into<String>) -> Result<Self> {
        Self::with_locations(
            app_name,
            ShortcutLocations::current_user()?,
            platform_writer()?,
        )
    }

    /// Create a manager with explicit folders and writer.
    pub fn with_locations(
        app_name: impl Into<String>,
        locations: ShortcutLocations,
        writer: Box<dyn LinkWriter>,
    ) -> Result<Self> {
        let app_name = app_name.into();
        validate_component(&app_name, "app name")?;

        Ok(Self {
            app_name,
            publisher: None,
            locations,
            writer,
        })
    }

    /// Group the Start Menu shortcut under a publisher folder.
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Result<Self> {
        let publisher = publisher.into();
        validate_component(&publisher, "publisher")?;
        self.publisher = Some(publisher);
        Ok(self)
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn locations(&self) -> &ShortcutLocations {
        &self.locations
    }

    fn file_name(&self) -> String {
        format!("{}.{}", self.app_name, shortcut_extension())
    }

    fn start_menu_dir(&self) -> PathBuf {
        match &self.publisher {
            Some(publisher) => self.locations.programs.join(publisher),
            None => self.locations.programs.clone(),
        }
    }

    /// The standard shortcut set: desktop, Start Menu, pinned taskbar.
    pub fn shortcut_specs(&self) -> Vec<ShortcutSpec> {
        let file_name = self.file_name();
        vec![
            ShortcutSpec {
                kind: ShortcutKind::Desktop,
                path: self.locations.desktop.join(&file_name),
                only_if_exists: false,
            },
            ShortcutSpec {
                kind: ShortcutKind::StartMenu,
                path: self.start_menu_dir().join(&file_name),
                only_if_exists: false,
            },
            // This file only exists if the user pinned the app; creating it
            // ourselves would not pin anything.
            ShortcutSpec {
                kind: ShortcutKind::Taskbar,
                path: self.locations.taskbar_pinned.join(&file_name),
                only_if_exists: true,
            },
        ]
    }

    /// Get shortcut state.
    pub fn state(&self) -> ShortcutState {
        let exists = |kind: ShortcutKind| {
            self.shortcut_specs()
                .iter()
                .any(|spec| spec.kind == kind && spec.path.exists())
        };

        ShortcutState {
            app_name: self.app_name.clone(),
            desktop: exists(ShortcutKind::Desktop),
            start_menu: exists(ShortcutKind::StartMenu),
            taskbar: exists(ShortcutKind::Taskbar),
        }
    }

    /// Create or refresh every shortcut of the set.
    ///
    /// A failing spec is logged and reported; the remaining specs are still
    /// attempted.
    pub fn install(&self, template: &ShortcutTemplate, params: InstallParams) -> InstallReport {
        let mut entries = Vec::new();
        let mut errors = Vec::new();

        for mut spec in self.shortcut_specs() {
            spec.only_if_exists |= params.for_upgrade;
            info!("Creating shortcut ({})...", spec.path.display());

            let settings = template.to_settings(&spec);
            match create_shortcut(&settings, self.writer.as_ref()) {
                Ok(outcome) => entries.push(InstallEntry {
                    kind: spec.kind,
                    path: spec.path,
                    outcome: Some(outcome),
                    error: None,
                }),
                Err(e) => {
                    warn!("Failed to create {} shortcut: {}", spec.kind, e);
                    errors.push(format!("{}: {}", spec.kind, e));
                    entries.push(InstallEntry {
                        kind: spec.kind,
                        path: spec.path,
                        outcome: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        info!(
            "Installed shortcuts for {} (upgrade={}): {} ok, {} failed",
            self.app_name,
            params.for_upgrade,
            entries.len() - errors.len(),
            errors.len()
        );

        InstallReport {
            success: errors.is_empty(),
            entries,
            error: (!errors.is_empty()).then(|| errors.join("; ")),
        }
    }

    /// Remove every shortcut of the set. Missing files are not an error.
    pub fn uninstall(&self) -> UninstallReport {
        let mut removed = Vec::new();
        let mut errors = Vec::new();

        for spec in self.shortcut_specs() {
            match remove_shortcut(&spec.path) {
                Ok(true) => removed.push(spec.kind),
                Ok(false) => {}
                Err(e) => {
                    warn!("Failed to remove {} shortcut: {}", spec.kind, e);
                    errors.push(format!("{}: {}", spec.kind, e));
                }
            }
        }

        self.remove_empty_publisher_dir();

        info!("Removed shortcuts for {}: {:?}", self.app_name, removed);

        UninstallReport {
            success: errors.is_empty(),
            removed,
            error: (!errors.is_empty()).then(|| errors.join("; ")),
        }
    }

    /// Drop the publisher's Start Menu folder once it holds nothing.
    fn remove_empty_publisher_dir(&self) {
        if self.publisher.is_none() {
            return;
        }

        let dir = self.start_menu_dir();
        if is_empty_dir(&dir) {
            if let Err(e) = std::fs::remove_dir(&dir) {
                warn!("Failed to remove {}: {}", dir.display(), e);
            }
        }
    }
}

fn is_empty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
