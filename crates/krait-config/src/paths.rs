//! Derives artefact paths inside an application root.
//!
//! The admin tool and the supervised runtime need to agree on where the
//! liveness marker, configuration file, and plugin descriptors live
//! relative to the application root, so the layout is centralised here.

use camino::{Utf8Path, Utf8PathBuf};

/// Name of the liveness marker written by the supervised runtime.
pub const PID_FILE_NAME: &str = "kraitd.pid";
/// Relative location of the application configuration file.
pub const CONFIG_FILE: &str = "config/application.json";
/// Directory holding plugin descriptor files.
pub const PLUGINS_DIR: &str = "plugins";

/// Canonical paths for the files the lifecycle controller touches.
#[derive(Debug, Clone)]
pub struct ApplicationPaths {
    root: Utf8PathBuf,
    config_path: Utf8PathBuf,
    pid_path: Utf8PathBuf,
    plugins_dir: Utf8PathBuf,
}

impl ApplicationPaths {
    /// Derives the artefact layout from an application root directory.
    #[must_use]
    pub fn from_root(root: impl Into<Utf8PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_path: root.join(CONFIG_FILE),
            pid_path: root.join(PID_FILE_NAME),
            plugins_dir: root.join(PLUGINS_DIR),
            root,
        }
    }

    /// Application root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        self.root.as_path()
    }

    /// Path to `config/application.json`.
    #[must_use]
    pub fn config_path(&self) -> &Utf8Path {
        self.config_path.as_path()
    }

    /// Path to the liveness marker.
    #[must_use]
    pub fn pid_path(&self) -> &Utf8Path {
        self.pid_path.as_path()
    }

    /// Directory scanned for plugin descriptors.
    #[must_use]
    pub fn plugins_dir(&self) -> &Utf8Path {
        self.plugins_dir.as_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_layout_from_root() {
        let paths = ApplicationPaths::from_root("/srv/blog");
        assert_eq!(paths.root(), "/srv/blog");
        assert_eq!(paths.config_path(), "/srv/blog/config/application.json");
        assert_eq!(paths.pid_path(), "/srv/blog/kraitd.pid");
        assert_eq!(paths.plugins_dir(), "/srv/blog/plugins");
    }
}
