//! COM apartment management and wide string helpers.
//!
//! Shell objects require a single-threaded apartment on the calling thread.
//! [`ApartmentGuard`] joins one and leaves it again on drop, so every exit
//! path of a shell-link operation balances its `CoInitializeEx`.

// This module owns the COM initialization FFI boundary.
#![allow(unsafe_code)]

use crate::error::{Result, ShortcutError};
use std::ffi::OsStr;
use std::marker::PhantomData;
use std::os::windows::ffi::OsStrExt;
use tracing::debug;
use windows::core::PCWSTR;
use windows::Win32::Foundation::RPC_E_CHANGED_MODE;
use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};

/// Membership of the current thread in a COM apartment.
///
/// Must be created before, and dropped after, every interface pointer used on
/// this thread.
pub(crate) struct ApartmentGuard {
    initialized: bool,
    // Apartments are per thread; keep the guard on the thread that joined.
    _not_send: PhantomData<*const ()>,
}

impl ApartmentGuard {
    /// Join a single-threaded apartment.
    ///
    /// A thread already running in a multithreaded apartment reports
    /// `RPC_E_CHANGED_MODE`. COM is usable there, but that initialization is
    /// not ours to undo.
    pub(crate) fn enter() -> Result<Self> {
        // SAFETY: no reserved pointer is passed; the call only affects the
        // COM state of the current thread, which this guard owns until drop.
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };

        if hr == RPC_E_CHANGED_MODE {
            debug!("COM already initialized with a different concurrency model");
            return Ok(Self {
                initialized: false,
                _not_send: PhantomData,
            });
        }

        hr.ok().map_err(|e| ShortcutError::com("CoInitializeEx", e))?;

        Ok(Self {
            initialized: true,
            _not_send: PhantomData,
        })
    }
}

impl Drop for ApartmentGuard {
    fn drop(&mut self) {
        if self.initialized {
            // SAFETY: paired with the successful CoInitializeEx in `enter`.
            // The guard is !Send, so this runs on the thread that joined.
            unsafe { CoUninitialize() };
        }
    }
}

/// NUL-terminated UTF-16 buffer for `PCWSTR` parameters.
pub(crate) struct WideString(Vec<u16>);

impl WideString {
    pub(crate) fn new(value: impl AsRef<OsStr>) -> Self {
        Self(
            value
                .as_ref()
                .encode_wide()
                .chain(std::iter::once(0))
                .collect(),
        )
    }

    /// Borrow as a `PCWSTR`. The pointer is valid while `self` lives.
    pub(crate) fn as_pcwstr(&self) -> PCWSTR {
        PCWSTR(self.0.as_ptr())
    }
}
