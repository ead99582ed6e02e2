//! Scoped suppression of OS critical-error popups.
//!
//! On Windows a find call against a removable drive with no media can raise a
//! blocking "drive not ready" dialog unless `SEM_FAILCRITICALERRORS` is set.
//! The mode is process-wide, so it is held only for the duration of a single
//! native call and restored afterwards.

#[cfg(windows)]
use windows_sys::Win32::System::Diagnostics::Debug::{SetErrorMode, SEM_FAILCRITICALERRORS};

/// Holds the critical-error mode for as long as it lives.
#[must_use = "the previous error mode is restored when the guard is dropped"]
pub(crate) struct CriticalErrorGuard {
    #[cfg(windows)]
    previous: u32,
}

impl CriticalErrorGuard {
    #[cfg(windows)]
    #[allow(unsafe_code)]
    pub(crate) fn suppress() -> Self {
        // SAFETY: SetErrorMode only swaps a process-wide flag word.
        let previous = unsafe { SetErrorMode(SEM_FAILCRITICALERRORS) };
        Self { previous }
    }

    #[cfg(not(windows))]
    pub(crate) fn suppress() -> Self {
        Self {}
    }
}

#[cfg(windows)]
impl Drop for CriticalErrorGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: restores the value returned by the matching SetErrorMode call.
        unsafe {
            SetErrorMode(self.previous);
        }
    }
}
