//! Shortcut encoder that skips the Shell Link object.
//!
//! Writes the MS-SHLLINK binary format directly. The format has no room for
//! a property store here, so an AppUserModelId is dropped with a warning.
//! The encoder resolves Windows path components itself and only builds on
//! Windows.

use super::LinkWriter;
use crate::config::ShortcutConfig;
use crate::error::{Result, ShortcutError};
use crate::settings::ShortcutSettings;
use mslnk::ShellLink;
use std::path::Path;
use tracing::{debug, warn};

/// Writes shortcuts without going through COM.
#[derive(Debug, Default, Clone, Copy)]
pub struct PortableLinkWriter;

impl PortableLinkWriter {
    pub fn new() -> Self {
        Self
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn invalid_target(message: &str) -> ShortcutError {
    ShortcutError::Validation {
        field: "target_path".to_string(),
        message: message.to_string(),
    }
}

/// The encoder splits the target into a drive and at least one more
/// component, and requires it to be valid Unicode.
fn check_target(target: &Path) -> Result<()> {
    if target.to_str().is_none() {
        return Err(invalid_target("must be valid Unicode"));
    }
    if !target.is_absolute() {
        return Err(invalid_target("must be absolute"));
    }
    if target.file_name().is_none() {
        return Err(invalid_target("must name a file or directory"));
    }
    Ok(())
}

fn encode_error(operation: &str, err: impl std::fmt::Display, path: &Path) -> ShortcutError {
    ShortcutError::Io {
        message: format!("{}: {}", operation, err),
        path: Some(path.to_path_buf()),
        source: None,
    }
}

impl LinkWriter for PortableLinkWriter {
    fn name(&self) -> &'static str {
        "portable"
    }

    fn write(&self, settings: &ShortcutSettings) -> Result<()> {
        check_target(&settings.target_path)?;

        if let Some(app_id) = settings.app_user_model_id()? {
            warn!(
                "Portable writer cannot store AppUserModelId {}, saving {} without it",
                app_id,
                settings.shortcut_path.display()
            );
        }

        if settings.icon_index != ShortcutConfig::DEFAULT_ICON_INDEX {
            warn!(
                "Portable writer ignores icon index {} for {}",
                settings.icon_index,
                settings.shortcut_path.display()
            );
        }

        // The encoder reads the target's metadata, so the target must exist.
        let mut link = ShellLink::new(&settings.target_path)
            .map_err(|e| encode_error("read shortcut target", e, &settings.target_path))?;

        link.set_arguments(settings.arguments.clone());
        link.set_name(settings.description.clone());
        link.set_working_dir(settings.working_directory.as_deref().map(path_string));
        link.set_icon_location(settings.icon_location.as_deref().map(path_string));

        link.create_lnk(&settings.shortcut_path)
            .map_err(|e| encode_error("write shell link", e, &settings.shortcut_path))?;

        debug!(
            "Encoded shell link {} -> {}",
            settings.shortcut_path.display(),
            settings.target_path.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::fs;
    use std::os::windows::ffi::OsStringExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Every shell link starts with its 0x4C-byte header size.
    const HEADER_SIZE: [u8; 4] = [0x4C, 0x00, 0x00, 0x00];

    #[test]
    fn test_writes_lnk_header() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("app.exe");
        fs::write(&target, b"MZ").unwrap();
        let shortcut = temp_dir.path().join("App.lnk");

        let settings = ShortcutSettings::builder(&shortcut, &target)
            .arguments("--prefer-launch")
            .description("Test shortcut")
            .working_directory(temp_dir.path())
            .build();

        PortableLinkWriter::new().write(&settings).unwrap();

        let bytes = fs::read(&shortcut).unwrap();
        assert!(bytes.len() > HEADER_SIZE.len());
        assert_eq!(&bytes[..4], &HEADER_SIZE[..]);
    }

    #[test]
    fn test_app_id_is_dropped_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("app.exe");
        fs::write(&target, b"MZ").unwrap();
        let shortcut = temp_dir.path().join("App.lnk");

        let settings = ShortcutSettings::builder(&shortcut, &target)
            .app_user_model_id("Contoso.App")
            .build();

        assert!(PortableLinkWriter::new().write(&settings).is_ok());
        assert!(shortcut.exists());
    }

    #[test]
    fn test_missing_target_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("missing.exe");
        let settings =
            ShortcutSettings::builder(temp_dir.path().join("App.lnk"), &target).build();

        let err = PortableLinkWriter::new().write(&settings).unwrap_err();
        match err {
            ShortcutError::Io { path, .. } => assert_eq!(path, Some(target)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_relative_target_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let shortcut = temp_dir.path().join("App.lnk");
        let settings = ShortcutSettings::builder(&shortcut, "app.exe").build();

        let err = PortableLinkWriter::new().write(&settings).unwrap_err();

        assert!(matches!(
            err,
            ShortcutError::Validation { ref field, .. } if field == "target_path"
        ));
        assert_eq!(err.exit_code(), 2);
        assert!(!shortcut.exists());
    }

    #[test]
    fn test_non_unicode_target_rejected() {
        let temp_dir = TempDir::new().unwrap();
        // Unpaired surrogate.
        let name = OsString::from_wide(&[0x61, 0xD800, 0x62]);
        let target: PathBuf = temp_dir.path().join(name);
        let settings =
            ShortcutSettings::builder(temp_dir.path().join("App.lnk"), &target).build();

        let err = PortableLinkWriter::new().write(&settings).unwrap_err();

        assert!(matches!(
            err,
            ShortcutError::Validation { ref field, .. } if field == "target_path"
        ));
    }
}
