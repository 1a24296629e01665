//! Subcommand handlers.

use crate::{AppArgs, CreateArgs, InstallArgs, LinkArgs};
use anyhow::{Context, Result};
use linkwright::{
    create_shortcut, platform_writer, portable_writer, InstallParams, LinkWriter,
    ShortcutLocations, ShortcutManager, ShortcutSettings, ShortcutTemplate,
};
use serde::Serialize;
use std::process::ExitCode;
use tracing::{debug, info};

fn writer(portable: bool) -> Result<Box<dyn LinkWriter>> {
    let writer = if portable {
        portable_writer()?
    } else {
        platform_writer()?
    };
    debug!("Using {} writer", writer.name());
    Ok(writer)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn manager(app: AppArgs, writer: Box<dyn LinkWriter>) -> Result<ShortcutManager> {
    let locations = ShortcutLocations::current_user()?;
    debug!("Shortcut locations: {:?}", locations);

    let manager = ShortcutManager::with_locations(app.app_name, locations, writer)?;
    Ok(match app.publisher {
        Some(publisher) => manager.with_publisher(publisher)?,
        None => manager,
    })
}

fn settings_from_flags(create: CreateArgs) -> Result<ShortcutSettings> {
    let shortcut = create.shortcut.context("--shortcut is required")?;
    let target = create.target.context("--target is required")?;
    let link = create.link;

    Ok(ShortcutSettings {
        shortcut_path: shortcut,
        target_path: target,
        arguments: link.arguments,
        description: link.description,
        icon_location: link.icon,
        icon_index: link.icon_index,
        working_directory: link.working_dir,
        app_user_model_id: link.app_id,
        only_if_exists: create.only_if_exists,
    })
}

fn template(target: std::path::PathBuf, link: LinkArgs) -> ShortcutTemplate {
    ShortcutTemplate {
        target_path: target,
        arguments: link.arguments,
        description: link.description,
        icon_location: link.icon,
        icon_index: link.icon_index,
        working_directory: link.working_dir,
        app_user_model_id: link.app_id,
    }
}

pub(crate) fn create(create: CreateArgs) -> Result<ExitCode> {
    let portable = create.link.portable;
    let settings = match create.settings.clone() {
        Some(path) => ShortcutSettings::from_json_file(&path)?,
        None => settings_from_flags(create)?,
    };
    // Bad input is reported before the platform is consulted.
    settings.validate()?;

    let writer = writer(portable)?;

    let outcome = create_shortcut(&settings, writer.as_ref())?;
    print_json(&serde_json::json!({
        "shortcut": settings.shortcut_path,
        "outcome": outcome,
    }))?;

    Ok(ExitCode::SUCCESS)
}

pub(crate) fn install(install: InstallArgs) -> Result<ExitCode> {
    let params = InstallParams {
        for_upgrade: install.upgrade,
    };
    let manager = manager(install.app, writer(install.link.portable)?)?;
    let template = template(install.target, install.link);

    info!("Installing shortcuts for {}", manager.app_name());
    let report = manager.install(&template, params);
    print_json(&report)?;

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub(crate) fn uninstall(app: AppArgs) -> Result<ExitCode> {
    let manager = manager(app, platform_writer()?)?;

    let report = manager.uninstall();
    print_json(&report)?;

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub(crate) fn status(app: AppArgs) -> Result<ExitCode> {
    let manager = manager(app, platform_writer()?)?;
    print_json(&manager.state())?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn link_args() -> LinkArgs {
        LinkArgs {
            arguments: Some("--prefer-launch".to_string()),
            description: None,
            icon: None,
            icon_index: 3,
            working_dir: None,
            app_id: Some("io.itch.Itch".to_string()),
            portable: true,
        }
    }

    #[test]
    fn test_settings_from_flags() {
        let args = CreateArgs {
            settings: None,
            shortcut: Some(PathBuf::from("/tmp/itch.lnk")),
            target: Some(PathBuf::from("/tmp/itch.exe")),
            only_if_exists: true,
            link: link_args(),
        };

        let settings = settings_from_flags(args).unwrap();
        assert_eq!(settings.shortcut_path, PathBuf::from("/tmp/itch.lnk"));
        assert_eq!(settings.icon_index, 3);
        assert_eq!(settings.app_user_model_id.as_deref(), Some("io.itch.Itch"));
        assert!(settings.only_if_exists);
    }

    #[cfg(windows)]
    #[test]
    fn test_create_with_portable_writer() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("itch.exe");
        std::fs::write(&target, b"MZ").unwrap();
        let shortcut = temp_dir.path().join("Desktop").join("itch.lnk");

        let args = CreateArgs {
            settings: None,
            shortcut: Some(shortcut.clone()),
            target: Some(target),
            only_if_exists: false,
            link: link_args(),
        };

        assert_eq!(create(args).unwrap(), ExitCode::SUCCESS);
        assert!(shortcut.exists());
    }

    #[cfg(windows)]
    #[test]
    fn test_create_rejects_relative_target() {
        let temp_dir = TempDir::new().unwrap();
        let args = CreateArgs {
            settings: None,
            shortcut: Some(temp_dir.path().join("itch.lnk")),
            target: Some(PathBuf::from("itch.exe")),
            only_if_exists: false,
            link: link_args(),
        };

        let err = create(args).unwrap_err();
        assert_eq!(crate::exit_code_for(&err), 2);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_create_unsupported_off_windows() {
        let temp_dir = TempDir::new().unwrap();
        let args = CreateArgs {
            settings: None,
            shortcut: Some(temp_dir.path().join("itch.lnk")),
            target: Some(temp_dir.path().join("itch.exe")),
            only_if_exists: false,
            link: link_args(),
        };

        let err = create(args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<linkwright::ShortcutError>(),
            Some(linkwright::ShortcutError::Unsupported { .. })
        ));
        assert_eq!(crate::exit_code_for(&err), 1);
    }

    #[test]
    fn test_create_rejects_relative_shortcut() {
        let args = CreateArgs {
            settings: None,
            shortcut: Some(PathBuf::from("itch.lnk")),
            target: Some(PathBuf::from("itch.exe")),
            only_if_exists: false,
            link: link_args(),
        };

        let err = create(args).unwrap_err();
        assert_eq!(crate::exit_code_for(&err), 2);
    }
}
