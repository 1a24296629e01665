//! Shortcut creation through the Windows Shell Link object.
//!
//! The sequence is: join an apartment, create `CLSID_ShellLink`, set each
//! property that is present, tag the AppUserModelId through the link's
//! property store, then save through `IPersistFile`. Interface pointers
//! release on drop and the apartment guard is dropped last, so every early
//! return cleans up.

// This module owns the Shell Link COM boundary.
#![allow(unsafe_code)]

use super::LinkWriter;
use crate::aumid::AppUserModelId;
use crate::error::{Result, ShortcutError};
use crate::platform::com::{ApartmentGuard, WideString};
use crate::settings::ShortcutSettings;
use tracing::{debug, warn};
use windows::core::{Interface, BSTR, GUID, PROPVARIANT};
use windows::Win32::System::Com::{CoCreateInstance, IPersistFile, CLSCTX_INPROC_SERVER};
use windows::Win32::UI::Shell::PropertiesSystem::{
    IPropertyStore, PSCoerceToCanonicalValue, PROPERTYKEY,
};
use windows::Win32::UI::Shell::{IShellLinkW, ShellLink};

/// `PKEY_AppUserModel_ID`: {9F4C2855-9F79-4B39-A8D0-E1D42DE1D5F3}, 5
const PKEY_APP_USER_MODEL_ID: PROPERTYKEY = PROPERTYKEY {
    fmtid: GUID::from_u128(0x9f4c2855_9f79_4b39_a8d0_e1d42de1d5f3),
    pid: 5,
};

/// Writes shortcuts with the native Shell Link object.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellLinkWriter;

impl ShellLinkWriter {
    pub fn new() -> Self {
        Self
    }
}

impl LinkWriter for ShellLinkWriter {
    fn name(&self) -> &'static str {
        "shell-link"
    }

    fn write(&self, settings: &ShortcutSettings) -> Result<()> {
        let app_id = settings.app_user_model_id()?;

        let _apartment = ApartmentGuard::enter()?;

        // SAFETY: the apartment joined above outlives `link`, which is
        // declared after it and therefore dropped first.
        let link: IShellLinkW =
            unsafe { CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER) }
                .map_err(|e| ShortcutError::com("CoCreateInstance(ShellLink)", e))?;

        let target = WideString::new(&settings.target_path);
        // SAFETY: `target` is a NUL-terminated buffer alive for the call.
        unsafe { link.SetPath(target.as_pcwstr()) }
            .map_err(|e| ShortcutError::com("IShellLinkW::SetPath", e))?;
        debug!("Set shortcut target: {}", settings.target_path.display());

        if let Some(arguments) = &settings.arguments {
            let arguments = WideString::new(arguments);
            // SAFETY: as above.
            unsafe { link.SetArguments(arguments.as_pcwstr()) }
                .map_err(|e| ShortcutError::com("IShellLinkW::SetArguments", e))?;
        }

        if let Some(description) = &settings.description {
            let description = WideString::new(description);
            // SAFETY: as above.
            unsafe { link.SetDescription(description.as_pcwstr()) }
                .map_err(|e| ShortcutError::com("IShellLinkW::SetDescription", e))?;
        }

        if let Some(icon) = &settings.icon_location {
            let wide_icon = WideString::new(icon);
            // SAFETY: as above.
            unsafe { link.SetIconLocation(wide_icon.as_pcwstr(), settings.icon_index) }
                .map_err(|e| ShortcutError::com("IShellLinkW::SetIconLocation", e))?;
            debug!("Set shortcut icon: {},{}", icon.display(), settings.icon_index);
        }

        if let Some(dir) = &settings.working_directory {
            let wide_dir = WideString::new(dir);
            // SAFETY: as above.
            unsafe { link.SetWorkingDirectory(wide_dir.as_pcwstr()) }
                .map_err(|e| ShortcutError::com("IShellLinkW::SetWorkingDirectory", e))?;
        }

        if let Some(app_id) = &app_id {
            match link.cast::<IPropertyStore>() {
                Ok(store) => set_app_user_model_id(&store, app_id)?,
                Err(e) => warn!(
                    "Shell link has no property store, saving {} without AppUserModelId: {}",
                    settings.shortcut_path.display(),
                    e
                ),
            }
        }

        let file: IPersistFile = link
            .cast()
            .map_err(|e| ShortcutError::com("QueryInterface(IPersistFile)", e))?;

        let shortcut = WideString::new(&settings.shortcut_path);
        // SAFETY: `shortcut` is a NUL-terminated buffer alive for the call.
        unsafe { file.Save(shortcut.as_pcwstr(), true) }
            .map_err(|e| ShortcutError::com("IPersistFile::Save", e))?;

        debug!("Saved shell link to {}", settings.shortcut_path.display());

        Ok(())
    }
}

fn set_app_user_model_id(store: &IPropertyStore, app_id: &AppUserModelId) -> Result<()> {
    // The property value owns its string and clears itself on drop.
    let mut value = PROPVARIANT::from(BSTR::from(app_id.as_str()));

    // System.AppUserModel.ID is declared VT_LPWSTR.
    // SAFETY: `value` is an initialized PROPVARIANT owned by this frame.
    unsafe { PSCoerceToCanonicalValue(&PKEY_APP_USER_MODEL_ID, &mut value) }
        .map_err(|e| ShortcutError::com("PSCoerceToCanonicalValue(AppUserModel.ID)", e))?;

    // SAFETY: both pointers reference locals that outlive the call.
    unsafe { store.SetValue(&PKEY_APP_USER_MODEL_ID, &value) }
        .map_err(|e| ShortcutError::com("IPropertyStore::SetValue(AppUserModel.ID)", e))?;

    // SAFETY: plain method call on a live interface.
    unsafe { store.Commit() }.map_err(|e| ShortcutError::com("IPropertyStore::Commit", e))?;

    debug!("Tagged shortcut with AppUserModelId {}", app_id);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use windows::Win32::System::Com::STGM_READ;
    use windows::Win32::System::Variant::VT_LPWSTR;

    /// Load a saved shortcut and read its AppUserModelId property.
    fn read_app_id(shortcut: &Path) -> PROPVARIANT {
        let _apartment = ApartmentGuard::enter().unwrap();
        let link: IShellLinkW =
            unsafe { CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER) }.unwrap();
        let file: IPersistFile = link.cast().unwrap();
        let path = WideString::new(shortcut);
        unsafe { file.Load(path.as_pcwstr(), STGM_READ) }.unwrap();

        let store: IPropertyStore = link.cast().unwrap();
        unsafe { store.GetValue(&PKEY_APP_USER_MODEL_ID) }.unwrap()
    }

    #[test]
    fn test_writes_shortcut_with_app_id() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("app.exe");
        fs::write(&target, b"MZ").unwrap();
        let shortcut = temp_dir.path().join("App.lnk");

        let settings = ShortcutSettings::builder(&shortcut, &target)
            .arguments("--prefer-launch")
            .description("Test shortcut")
            .working_directory(temp_dir.path())
            .app_user_model_id("Linkwright.Tests.App")
            .build();

        ShellLinkWriter::new().write(&settings).unwrap();
        assert!(shortcut.exists());

        let value = read_app_id(&shortcut);
        assert_eq!(value.vt(), VT_LPWSTR.0);
        assert_eq!(
            BSTR::try_from(&value).unwrap().to_string(),
            "Linkwright.Tests.App"
        );
    }

    #[test]
    fn test_empty_app_id_leaves_property_unset() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("app.exe");
        fs::write(&target, b"MZ").unwrap();
        let shortcut = temp_dir.path().join("App.lnk");

        let settings = ShortcutSettings::builder(&shortcut, &target)
            .app_user_model_id("")
            .build();
        ShellLinkWriter::new().write(&settings).unwrap();

        assert!(read_app_id(&shortcut).is_empty());
    }

    #[test]
    fn test_save_into_missing_directory_reports_hresult() {
        let temp_dir = TempDir::new().unwrap();
        let shortcut = temp_dir.path().join("missing").join("App.lnk");
        let settings =
            ShortcutSettings::builder(&shortcut, temp_dir.path().join("app.exe")).build();

        let err = ShellLinkWriter::new().write(&settings).unwrap_err();
        assert!(err.hresult().is_some());
        assert!(err.to_string().contains("IPersistFile::Save"));
    }
}
