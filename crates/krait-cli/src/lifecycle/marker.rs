//! Liveness marker file access.
//!
//! Presence of `kraitd.pid` is the sole authority the controller uses to
//! decide whether an instance is running; the recorded PID is never
//! verified against a live process. The trait keeps that policy
//! swappable (a stricter marker could probe the PID) without touching
//! the controller's sequencing.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use super::error::LifecycleError;

pub(crate) trait LivenessMarker {
    /// Whether the marker file exists.
    fn exists(&self) -> bool;
    /// Reads the process id recorded in the marker. A missing file or
    /// non-numeric content is an error.
    fn read(&self) -> Result<u32, LifecycleError>;
    /// Removes the marker. Best-effort and idempotent; a marker already
    /// cleared by the runtime is not an error.
    fn remove(&self);
    /// Location of the marker file.
    fn path(&self) -> &Utf8Path;
}

/// Marker backed by a plain file containing a decimal process id,
/// written by the supervised runtime on startup.
#[derive(Debug, Clone)]
pub(crate) struct FileMarker {
    path: Utf8PathBuf,
}

impl FileMarker {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LivenessMarker for FileMarker {
    fn exists(&self) -> bool {
        self.path.as_std_path().exists()
    }

    fn read(&self) -> Result<u32, LifecycleError> {
        let content = fs::read_to_string(self.path.as_std_path()).map_err(|source| {
            LifecycleError::ReadMarker {
                path: self.path.clone(),
                source,
            }
        })?;
        content
            .trim()
            .parse::<u32>()
            .map_err(|source| LifecycleError::ParseMarker {
                path: self.path.clone(),
                source,
            })
    }

    fn remove(&self) {
        let _ = fs::remove_file(self.path.as_std_path());
    }

    fn path(&self) -> &Utf8Path {
        self.path.as_path()
    }
}
