//! Creating and removing a single shortcut.

use crate::error::{Result, ShortcutError};
use crate::settings::ShortcutSettings;
use crate::writer::LinkWriter;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// What [`create_shortcut`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutOutcome {
    /// A new shortcut file was written.
    Created,
    /// An existing shortcut file was overwritten.
    Updated,
    /// `only_if_exists` was set and there was nothing to update.
    Skipped,
}

/// Create (or refresh) a shortcut.
///
/// Relative shortcut paths are rejected before anything touches the disk.
/// With `only_if_exists`, a missing shortcut is left missing. Otherwise the
/// parent directory is created and the writer saves the file.
pub fn create_shortcut(
    settings: &ShortcutSettings,
    writer: &dyn LinkWriter,
) -> Result<ShortcutOutcome> {
    settings.validate()?;

    let path = &settings.shortcut_path;
    let existed = match fs::metadata(path) {
        Ok(_) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) if settings.only_if_exists => {
            info!("Not updating shortcut ({}): {}", path.display(), e);
            return Ok(ShortcutOutcome::Skipped);
        }
        Err(e) => return Err(ShortcutError::io_with_path(e, path)),
    };

    if settings.only_if_exists && !existed {
        info!("Not updating shortcut ({}): not present", path.display());
        return Ok(ShortcutOutcome::Skipped);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ShortcutError::Io {
            message: "create shortcut directory".to_string(),
            path: Some(parent.to_path_buf()),
            source: Some(e),
        })?;
    }

    debug!("Writing {} with {} writer", path.display(), writer.name());
    writer.write(settings)?;

    let outcome = if existed {
        ShortcutOutcome::Updated
    } else {
        ShortcutOutcome::Created
    };

    info!(
        "Shortcut {:?}: {} -> {}",
        outcome,
        path.display(),
        settings.target_path.display()
    );

    Ok(outcome)
}

/// Delete a shortcut file.
///
/// Returns `false` if there was nothing to delete.
pub fn remove_shortcut(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!("Removed shortcut {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Shortcut {} already absent", path.display());
            Ok(false)
        }
        Err(e) => Err(ShortcutError::Io {
            message: "remove shortcut".to_string(),
            path: Some(path.to_path_buf()),
            source: Some(e),
        }),
    }
}
