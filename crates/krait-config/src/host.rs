//! Host-environment detection.
//!
//! The platform family and the managed-hosting flag are ambient facts.
//! Both are resolved exactly once per command invocation and passed into
//! the lifecycle controller as plain values so tests can construct any
//! combination deterministically instead of mutating the process
//! environment.

use std::env;

/// Broad operating-system family the admin tool runs on.
///
/// Detected once per process; the variants map one-to-one onto the
/// reactor defaults the supervised runtime understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// GNU/Linux.
    Linux,
    /// FreeBSD, OpenBSD, NetBSD, or DragonFly.
    Bsd,
    /// macOS.
    Darwin,
    /// Windows.
    Windows,
    /// Anything else; gets conservative defaults.
    Other,
}

impl Platform {
    /// Detects the platform family of the running binary.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(any(
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
            target_os = "dragonfly"
        )) {
            Self::Bsd
        } else if cfg!(target_os = "macos") {
            Self::Darwin
        } else if cfg!(windows) {
            Self::Windows
        } else {
            Self::Other
        }
    }

    /// Whether the platform has POSIX semantics for reserved ports and
    /// process signals. Privilege validation only runs on these
    /// platforms; elsewhere the concept does not exist and the check is
    /// skipped deliberately.
    #[must_use]
    pub const fn is_posix(self) -> bool {
        matches!(self, Self::Linux | Self::Bsd | Self::Darwin)
    }
}

/// Deployment context derived from the process environment.
///
/// Managed platforms keep the application in the foreground and own the
/// process supervision themselves, so the admin tool must not daemonise
/// or capture output there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostingContext {
    /// True when running under a managed hosting platform.
    pub managed: bool,
}

impl HostingContext {
    /// Detects managed hosting from the environment.
    ///
    /// Heroku-style platforms expose the `DYNO` variable in every
    /// process they supervise; its presence is the signal used here.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            managed: env::var_os("DYNO").is_some(),
        }
    }

    /// Builds an explicit context, bypassing environment inspection.
    #[must_use]
    pub const fn new(managed: bool) -> Self {
        Self { managed }
    }
}
