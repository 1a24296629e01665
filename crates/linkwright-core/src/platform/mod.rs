//! Platform abstraction layer.
//!
//! OS-specific behavior lives here or in [`crate::writer`].
//!
//! - `paths` - Per-user shortcut directories
//! - `com` - COM apartment and wide string helpers (Windows only)

#[cfg(windows)]
pub(crate) mod com;
pub mod paths;

pub use paths::{
    desktop_dir, programs_dir, shortcut_extension, taskbar_pinned_dir, ShortcutLocations,
};

/// Returns the current platform name.
pub fn current_platform() -> &'static str {
    #[cfg(target_os = "linux")]
    {
        "linux"
    }
    #[cfg(target_os = "windows")]
    {
        "windows"
    }
    #[cfg(target_os = "macos")]
    {
        "macos"
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        "unknown"
    }
}

/// Returns true if the native Shell Link object is available.
pub fn has_shell_link() -> bool {
    cfg!(windows)
}
