//! Graceful-interrupt delivery to the supervised runtime.

use std::io;

use super::error::LifecycleError;

#[cfg(unix)]
use libc::{SIGINT, kill};

/// Sends SIGINT to the runtime process recorded in the liveness marker.
///
/// Success means the signal was delivered, nothing more; whether the
/// runtime actually exits is observed separately through its marker.
///
/// On non-Unix platforms there is no signalling concept to map onto and
/// the call fails with `UnsupportedPlatform`.
pub(super) fn signal_runtime(pid: u32) -> Result<(), LifecycleError> {
    #[cfg(unix)]
    {
        // kill(2) gives 0 and negative targets special meanings (the
        // caller's process group, every signalable process). A marker
        // recording 0, or a value that would wrap negative through the
        // pid_t conversion, is corrupt and must never reach the kernel.
        let target = i32::try_from(pid)
            .ok()
            .filter(|target| *target > 0)
            .ok_or_else(|| LifecycleError::SignalFailed {
                pid,
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "process id outside the signalable range",
                ),
            })?;
        // SAFETY: `kill(2)` is memory-safe even when the PID is stale or
        // foreign; the kernel simply returns an error.
        let result = unsafe { kill(target, SIGINT) };
        if result == 0 {
            Ok(())
        } else {
            Err(LifecycleError::SignalFailed {
                pid,
                source: io::Error::last_os_error(),
            })
        }
    }
    #[cfg(not(unix))]
    {
        let _ = pid;
        Err(LifecycleError::UnsupportedPlatform)
    }
}
