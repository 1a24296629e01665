//! Shell link back ends.
//!
//! A [`LinkWriter`] persists one [`ShortcutSettings`] as a `.lnk` file. The
//! caller has already validated the settings and created the parent
//! directory.
//!
//! Both back ends are Windows only:
//! - `ShellLinkWriter` drives the Windows Shell Link COM object and is the
//!   only writer that can store an AppUserModelId.
//! - `PortableLinkWriter` encodes the file format directly, without COM.

#[cfg(windows)]
mod portable;
#[cfg(windows)]
mod shell_link;

#[cfg(windows)]
pub use portable::PortableLinkWriter;
#[cfg(windows)]
pub use shell_link::ShellLinkWriter;

use crate::error::Result;
#[cfg(not(windows))]
use crate::error::ShortcutError;
use crate::settings::ShortcutSettings;

/// Something that can write a shortcut file.
pub trait LinkWriter: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Write the shortcut described by `settings`.
    fn write(&self, settings: &ShortcutSettings) -> Result<()>;
}

#[cfg(not(windows))]
fn unsupported(writer: &str) -> ShortcutError {
    ShortcutError::Unsupported {
        message: format!("the {} shortcut writer requires Windows", writer),
    }
}

/// The best writer for the current platform.
///
/// # Platform Behavior
/// - **Windows**: `ShellLinkWriter`
/// - **Other**: `Unsupported` error
pub fn platform_writer() -> Result<Box<dyn LinkWriter>> {
    #[cfg(windows)]
    {
        Ok(Box::new(ShellLinkWriter::new()))
    }

    #[cfg(not(windows))]
    {
        Err(unsupported("shell-link"))
    }
}

/// The COM-free encoder.
///
/// # Platform Behavior
/// - **Windows**: `PortableLinkWriter`
/// - **Other**: `Unsupported` error
pub fn portable_writer() -> Result<Box<dyn LinkWriter>> {
    #[cfg(windows)]
    {
        Ok(Box::new(PortableLinkWriter::new()))
    }

    #[cfg(not(windows))]
    {
        Err(unsupported("portable"))
    }
}
