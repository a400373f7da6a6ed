use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::ThumbConfig;

/// A loaded configuration file with its associated directory.
///
/// `disk_root` is relative to the config file location, so we need to track
/// where the config was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: ThumbConfig,
    /// The directory containing the config file
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Load a config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: ThumbConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Default settings, with relative paths taken from the working directory.
    pub fn defaults() -> Self {
        Self {
            config: ThumbConfig::default(),
            config_dir: PathBuf::from("."),
        }
    }

    /// Resolve the disk root relative to the config file directory.
    pub fn resolve_disk_root(&self) -> PathBuf {
        self.config_dir.join(&self.config.disk_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ResizeFilter;
    use crate::resolver::ThumbnailResolver;
    use tempfile::TempDir;

    #[test]
    fn test_load_resolves_disk_root_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("thumbs.json");
        std::fs::write(
            &path,
            r#"{"disk_root": "public", "base_url": "https://img.example.com", "thumbs_path": "t"}"#,
        )
        .unwrap();

        let loaded = LoadedConfig::load(&path).unwrap();
        assert_eq!(loaded.resolve_disk_root(), dir.path().join("public"));
        assert_eq!(loaded.config.thumb_path, "t");

        let resolver = ThumbnailResolver::local(
            &loaded.config,
            loaded.resolve_disk_root(),
            ResizeFilter::default(),
            None,
        );
        assert_eq!(resolver.storage().root(), dir.path().join("public"));
        assert_eq!(
            resolver.default_url(),
            "https://img.example.com/images/default.png"
        );
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("thumbs.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(LoadedConfig::load(&path).is_err());
    }

    #[test]
    fn test_defaults_use_working_directory() {
        let loaded = LoadedConfig::defaults();
        assert_eq!(loaded.resolve_disk_root(), PathBuf::from("./storage/app/public"));
    }

    #[test]
    fn test_absolute_disk_root_is_kept() {
        let mut loaded = LoadedConfig::defaults();
        loaded.config.disk_root = "/srv/public".to_string();
        assert_eq!(loaded.resolve_disk_root(), PathBuf::from("/srv/public"));
    }
}
