//! Platform-specific path utilities.
//!
//! Resolves the per-user directories an installer drops shortcuts into:
//! - Desktop
//! - Start Menu `Programs`
//! - Pinned taskbar entries

use crate::config::{PathsConfig, ShortcutConfig};
use crate::error::{Result, ShortcutError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The directories a shortcut set is written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutLocations {
    /// User desktop.
    pub desktop: PathBuf,
    /// Start Menu `Programs` folder.
    pub programs: PathBuf,
    /// Folder holding the shortcuts of pinned taskbar entries.
    pub taskbar_pinned: PathBuf,
}

impl ShortcutLocations {
    /// Locations for the current user.
    pub fn current_user() -> Result<Self> {
        Ok(Self {
            desktop: desktop_dir()?,
            programs: programs_dir()?,
            taskbar_pinned: taskbar_pinned_dir()?,
        })
    }

    /// Derive the Start Menu and taskbar folders from a roaming app data root.
    pub fn from_roaming(desktop: impl Into<PathBuf>, roaming: &Path) -> Self {
        Self {
            desktop: desktop.into(),
            programs: join_segments(roaming, PathsConfig::PROGRAMS_SEGMENTS),
            taskbar_pinned: join_segments(roaming, PathsConfig::TASKBAR_PINNED_SEGMENTS),
        }
    }
}

fn join_segments(base: &Path, segments: &[&str]) -> PathBuf {
    segments
        .iter()
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}

/// Get the user's desktop directory.
///
/// # Platform Behavior
/// Uses the `dirs` crate which handles platform differences:
/// - **Windows**: `C:\Users\{user}\Desktop`
/// - **Linux/macOS**: `~/Desktop`
pub fn desktop_dir() -> Result<PathBuf> {
    dirs::desktop_dir().ok_or_else(|| ShortcutError::Config {
        message: "Could not determine desktop directory".to_string(),
    })
}

/// Get the roaming app data directory (`%APPDATA%`).
fn roaming_dir() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        dirs::data_dir().ok_or_else(|| ShortcutError::Config {
            message: "Could not determine app data directory".to_string(),
        })
    }

    #[cfg(not(windows))]
    {
        Err(ShortcutError::Unsupported {
            message: "Start Menu and taskbar folders only exist on Windows".to_string(),
        })
    }
}

/// Get the Start Menu `Programs` directory.
///
/// # Platform Behavior
/// - **Windows**: `%APPDATA%\Microsoft\Windows\Start Menu\Programs`
/// - **Other**: `Unsupported` error
pub fn programs_dir() -> Result<PathBuf> {
    Ok(join_segments(&roaming_dir()?, PathsConfig::PROGRAMS_SEGMENTS))
}

/// Get the directory Windows keeps pinned taskbar shortcuts in.
///
/// # Platform Behavior
/// - **Windows**: `%APPDATA%\Microsoft\Internet Explorer\Quick Launch\User Pinned\TaskBar`
/// - **Other**: `Unsupported` error
pub fn taskbar_pinned_dir() -> Result<PathBuf> {
    Ok(join_segments(
        &roaming_dir()?,
        PathsConfig::TASKBAR_PINNED_SEGMENTS,
    ))
}

/// Get the file extension for shortcuts.
///
/// Always `lnk`: the shell link format is Windows' regardless of where the
/// file is written.
pub fn shortcut_extension() -> &'static str {
    ShortcutConfig::EXTENSION
}
