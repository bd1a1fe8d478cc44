//! Application identifier resolution.
//!
//! The runtime loads the application through a plugin descriptor placed
//! under `plugins/`. Exactly one descriptor must exist; zero or several
//! leave the target ambiguous and abort the start.

use std::ffi::OsStr;
use std::fs;
use std::io;

use camino::Utf8Path;

use super::error::LifecycleError;

/// Resolves the application identifier from the plugin directory.
///
/// The identifier is the descriptor file stem with its trailing
/// `_`-separated segment removed, so `blog_service.toml` names the
/// application `blog`.
pub(super) fn resolve_application_name(dir: &Utf8Path) -> Result<String, LifecycleError> {
    let entries = match fs::read_dir(dir.as_std_path()) {
        Ok(entries) => entries,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(LifecycleError::PluginNotFound {
                dir: dir.to_path_buf(),
                found: 0,
            });
        }
        Err(source) => {
            return Err(LifecycleError::PluginScan {
                dir: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut descriptors = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LifecycleError::PluginScan {
            dir: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(OsStr::to_str) == Some("toml")
            && let Some(stem) = path.file_stem().and_then(OsStr::to_str)
        {
            descriptors.push(stem.to_owned());
        }
    }

    match descriptors.as_slice() {
        [stem] => Ok(application_name(stem)),
        _ => Err(LifecycleError::PluginNotFound {
            dir: dir.to_path_buf(),
            found: descriptors.len(),
        }),
    }
}

fn application_name(stem: &str) -> String {
    stem.rsplit_once('_')
        .map_or_else(|| stem.to_owned(), |(name, _)| name.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn plugins_dir(dir: &TempDir) -> Utf8PathBuf {
        let path = dir.path().join("plugins");
        fs::create_dir_all(&path).expect("plugins dir");
        Utf8PathBuf::from_path_buf(path).expect("utf-8 plugins dir")
    }

    #[test]
    fn single_descriptor_yields_application_name() {
        let dir = TempDir::new().expect("temp dir");
        let plugins = plugins_dir(&dir);
        fs::write(plugins.join("blog_service.toml"), "name = \"blog\"\n")
            .expect("descriptor");
        let name = resolve_application_name(&plugins).expect("descriptor should resolve");
        assert_eq!(name, "blog");
    }

    #[test]
    fn stem_without_separator_is_used_verbatim() {
        let dir = TempDir::new().expect("temp dir");
        let plugins = plugins_dir(&dir);
        fs::write(plugins.join("blog.toml"), "").expect("descriptor");
        let name = resolve_application_name(&plugins).expect("descriptor should resolve");
        assert_eq!(name, "blog");
    }

    #[test]
    fn non_descriptor_files_are_ignored() {
        let dir = TempDir::new().expect("temp dir");
        let plugins = plugins_dir(&dir);
        fs::write(plugins.join("blog_service.toml"), "").expect("descriptor");
        fs::write(plugins.join("README.md"), "").expect("readme");
        let name = resolve_application_name(&plugins).expect("descriptor should resolve");
        assert_eq!(name, "blog");
    }

    #[test]
    fn empty_directory_is_reported() {
        let dir = TempDir::new().expect("temp dir");
        let plugins = plugins_dir(&dir);
        let error = resolve_application_name(&plugins).expect_err("no descriptors should fail");
        assert!(matches!(
            error,
            LifecycleError::PluginNotFound { found: 0, .. }
        ));
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = TempDir::new().expect("temp dir");
        let missing = Utf8PathBuf::from_path_buf(dir.path().join("plugins"))
            .expect("utf-8 plugins dir");
        let error = resolve_application_name(&missing).expect_err("missing dir should fail");
        assert!(matches!(
            error,
            LifecycleError::PluginNotFound { found: 0, .. }
        ));
    }

    #[test]
    fn multiple_descriptors_are_ambiguous() {
        let dir = TempDir::new().expect("temp dir");
        let plugins = plugins_dir(&dir);
        fs::write(plugins.join("blog_service.toml"), "").expect("descriptor");
        fs::write(plugins.join("wiki_service.toml"), "").expect("descriptor");
        let error = resolve_application_name(&plugins).expect_err("ambiguity should fail");
        assert!(matches!(
            error,
            LifecycleError::PluginNotFound { found: 2, .. }
        ));
    }
}
