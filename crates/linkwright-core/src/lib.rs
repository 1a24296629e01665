//! linkwright - Windows shortcut (.lnk) creation for installers.
//!
//! Creates shell link files and tags them with an AppUserModelId, so the
//! taskbar and Start Menu group the shortcut with the running application.
//! The native Shell Link object does the work. A COM-free encoder writes the
//! same file format without the AppUserModelId. Both need Windows; on other
//! hosts the writers report `Unsupported`.
//!
//! # Example
//!
//! ```rust,ignore
//! use linkwright::{create_shortcut, platform_writer, ShortcutSettings};
//!
//! fn main() -> linkwright::Result<()> {
//!     let settings = ShortcutSettings::builder(
//!         r"C:\Users\me\Desktop\itch.lnk",
//!         r"C:\Users\me\AppData\Local\itch\itch-setup.exe",
//!     )
//!     .arguments("--prefer-launch --appname itch")
//!     .description("The best way to play your games")
//!     .app_user_model_id("io.itch.Itch")
//!     .build();
//!
//!     let outcome = create_shortcut(&settings, platform_writer()?.as_ref())?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod aumid;
pub mod config;
pub mod error;
pub mod manager;
pub mod platform;
pub mod settings;
pub mod shortcut;
pub mod writer;

// Re-export commonly used types
pub use aumid::AppUserModelId;
pub use error::{Result, ShortcutError};
pub use manager::{
    shortcut_file_name, InstallEntry, InstallParams, InstallReport, ShortcutKind,
    ShortcutManager, ShortcutSpec, ShortcutState, ShortcutTemplate, UninstallReport,
};
pub use platform::ShortcutLocations;
pub use settings::{ShortcutSettings, ShortcutSettingsBuilder};
pub use shortcut::{create_shortcut, remove_shortcut, ShortcutOutcome};
pub use writer::{platform_writer, portable_writer, LinkWriter};
#[cfg(windows)]
pub use writer::{PortableLinkWriter, ShellLinkWriter};
