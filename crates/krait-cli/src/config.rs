//! Configuration loading seam for the admin CLI.
//!
//! The trait lets tests substitute the JSON loader with canned
//! configurations without touching the filesystem.

use krait_config::{ApplicationConfig, ApplicationPaths, ConfigError};

pub(crate) trait ConfigLoader {
    /// Loads the application configuration for the given root layout.
    fn load(&self, paths: &ApplicationPaths) -> Result<ApplicationConfig, ConfigError>;
}

/// Production loader reading `config/application.json`.
pub(crate) struct JsonConfigLoader;

impl ConfigLoader for JsonConfigLoader {
    fn load(&self, paths: &ApplicationPaths) -> Result<ApplicationConfig, ConfigError> {
        ApplicationConfig::load(paths.config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_configuration_relative_to_root() {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 root");
        fs::create_dir_all(root.join("config")).expect("config dir");
        fs::write(root.join("config/application.json"), r#"{"port": 9000}"#).expect("config file");
        let paths = ApplicationPaths::from_root(root);
        let config = JsonConfigLoader.load(&paths).expect("config should load");
        assert_eq!(config.port, Some(9000));
    }

    #[test]
    fn missing_configuration_maps_to_application_root_error() {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 root");
        let paths = ApplicationPaths::from_root(root);
        let error = JsonConfigLoader
            .load(&paths)
            .expect_err("loading outside a root should fail");
        assert!(matches!(error, ConfigError::NotAnApplicationRoot { .. }));
    }
}
