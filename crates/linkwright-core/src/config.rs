//! Centralized configuration for linkwright.
//!
//! Constants for shortcut naming, AppUserModelId limits and the per-user
//! folder layout Windows uses for shortcuts.

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "linkwright";
    pub const LOG_TARGET: &'static str = "linkwright";
}

/// Shortcut file and AppUserModelId configuration.
pub struct ShortcutConfig;

impl ShortcutConfig {
    /// Extension of shell link files.
    pub const EXTENSION: &'static str = "lnk";

    /// Windows rejects AppUserModelIds longer than this (UTF-16 code units).
    pub const APP_ID_MAX_LEN: usize = 128;

    pub const DEFAULT_ICON_INDEX: i32 = 0;

    /// Characters Windows does not allow in file names.
    pub const FORBIDDEN_FILE_NAME_CHARS: &'static [char] =
        &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
}

/// Folder layout below the roaming app data directory (`%APPDATA%`).
pub struct PathsConfig;

impl PathsConfig {
    /// `%APPDATA%\Microsoft\Windows\Start Menu\Programs`
    pub const PROGRAMS_SEGMENTS: &'static [&'static str] =
        &["Microsoft", "Windows", "Start Menu", "Programs"];

    /// `%APPDATA%\Microsoft\Internet Explorer\Quick Launch\User Pinned\TaskBar`
    ///
    /// Windows keeps the shortcuts of pinned taskbar entries here.
    pub const TASKBAR_PINNED_SEGMENTS: &'static [&'static str] = &[
        "Microsoft",
        "Internet Explorer",
        "Quick Launch",
        "User Pinned",
        "TaskBar",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_chars_cover_separators() {
        assert!(ShortcutConfig::FORBIDDEN_FILE_NAME_CHARS.contains(&'/'));
        assert!(ShortcutConfig::FORBIDDEN_FILE_NAME_CHARS.contains(&'\\'));
    }

    #[test]
    fn test_pinned_dir_ends_in_taskbar() {
        assert_eq!(PathsConfig::TASKBAR_PINNED_SEGMENTS.last(), Some(&"TaskBar"));
        assert_eq!(PathsConfig::PROGRAMS_SEGMENTS.last(), Some(&"Programs"));
    }
}
