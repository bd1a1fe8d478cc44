//! Application configuration loading.
//!
//! Krait applications keep their runtime settings in
//! `config/application.json` under the application root. The admin tool
//! loads the file once per command invocation and treats the result as
//! immutable for the rest of the command.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

/// Runtime settings for a Krait application.
///
/// Every field is optional in the JSON document; omitted fields fall
/// back to the defaults below so a freshly scaffolded application with a
/// minimal configuration file still starts.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Network port the application binds. Required for starting the
    /// runtime on POSIX platforms; its absence signals a malformed
    /// configuration upstream.
    pub port: Option<u16>,
    /// Whether the application runs in development mode (foreground,
    /// no syslog detachment).
    pub development: bool,
    /// When set, the runtime picks its own reactor and the admin tool
    /// passes none.
    pub auto_select_reactor: bool,
    /// Explicit reactor override. Always wins over platform defaults.
    pub reactor: Option<String>,
}

impl ApplicationConfig {
    /// Loads the configuration from `config/application.json` under the
    /// given application root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotAnApplicationRoot`] when the file is
    /// absent, which the CLI reports as "not inside an application root
    /// directory".
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path.as_std_path()) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotAnApplicationRoot {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Errors raised while loading the application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist at the expected relative
    /// location, so the command was most likely run outside an
    /// application root.
    #[error(
        "make sure you are inside a krait application root directory and then run this command again"
    )]
    NotAnApplicationRoot {
        /// Expected configuration file location.
        path: Utf8PathBuf,
    },
    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        /// Configuration file location.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid JSON for the expected schema.
    #[error("configuration file {path} is not valid JSON: {source}")]
    Parse {
        /// Configuration file location.
        path: Utf8PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn config_file(dir: &TempDir, content: &str) -> Utf8PathBuf {
        let path = dir.path().join("application.json");
        fs::write(&path, content).expect("write config");
        Utf8PathBuf::from_path_buf(path).expect("utf-8 temp path")
    }

    #[test]
    fn loads_complete_configuration() {
        let dir = TempDir::new().expect("temp dir");
        let path = config_file(
            &dir,
            r#"{"port": 8080, "development": true, "auto_select_reactor": false, "reactor": "epoll"}"#,
        );
        let config = ApplicationConfig::load(&path).expect("config should load");
        assert_eq!(config.port, Some(8080));
        assert!(config.development);
        assert!(!config.auto_select_reactor);
        assert_eq!(config.reactor.as_deref(), Some("epoll"));
    }

    #[test]
    fn omitted_fields_fall_back_to_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = config_file(&dir, "{}");
        let config = ApplicationConfig::load(&path).expect("config should load");
        assert_eq!(config, ApplicationConfig::default());
        assert_eq!(config.port, None);
        assert!(!config.development);
    }

    #[test]
    fn missing_file_reports_application_root() {
        let dir = TempDir::new().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("application.json"))
            .expect("utf-8 temp path");
        let error = ApplicationConfig::load(&path).expect_err("missing file should fail");
        assert!(matches!(error, ConfigError::NotAnApplicationRoot { .. }));
        assert!(error.to_string().contains("application root directory"));
    }

    #[test]
    fn invalid_json_reports_parse_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = config_file(&dir, "{not json");
        let error = ApplicationConfig::load(&path).expect_err("invalid json should fail");
        assert!(matches!(error, ConfigError::Parse { .. }));
    }
}
