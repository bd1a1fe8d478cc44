//! Error types for runtime lifecycle operations.

use std::ffi::OsString;
use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while executing lifecycle commands.
#[derive(Debug, Error)]
pub(crate) enum LifecycleError {
    #[error(
        "{path} found; the application seems to be running already. If it is not, delete {path} and try again"
    )]
    AlreadyRunning { path: Utf8PathBuf },
    #[error("{path} not found; the application does not appear to be running from this directory")]
    NotRunning { path: Utf8PathBuf },
    #[error(
        "the application configuration does not define a valid port; is config/application.json valid JSON?"
    )]
    MissingPort,
    #[error(
        "port {port} is a reserved port and only root can bind it; retry with sudo or change config/application.json"
    )]
    PrivilegedPortDenied { port: u16 },
    #[error(
        "expected exactly one plugin descriptor under {dir}, found {found}; run this command from the application directory"
    )]
    PluginNotFound { dir: Utf8PathBuf, found: usize },
    #[error("failed to scan plugin directory {dir}: {source}")]
    PluginScan {
        dir: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read liveness marker {path}: {source}")]
    ReadMarker {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("liveness marker {path} does not contain a process id: {source}")]
    ParseMarker {
        path: Utf8PathBuf,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to launch runtime binary {binary:?}: {source}")]
    LaunchRuntime {
        binary: OsString,
        #[source]
        source: io::Error,
    },
    #[error("application start failed: {detail}")]
    LaunchFailed { detail: String },
    #[error("failed to deliver SIGINT to process {pid}: {source}")]
    SignalFailed {
        pid: u32,
        #[source]
        source: io::Error,
    },
    #[cfg(not(unix))]
    #[error("platform does not support process signalling")]
    UnsupportedPlatform,
    #[error("failed to write lifecycle output: {0}")]
    Io(#[source] io::Error),
}
