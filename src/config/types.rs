use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::cli::{CompressionLevel, ResizeFilter};
use crate::resolver::{DEFAULT_IMAGE, DEFAULT_THUMB_PATH};
use crate::storage::DEFAULT_DIR_MODE;

/// PNG compression level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Thumbnail configuration file structure.
///
/// `disk_root` is relative to the config file location; every other path is
/// relative to the disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Directory prefix holding source images
    pub root_path: String,
    /// Directory, inside `root_path`, holding generated thumbnails
    #[serde(alias = "thumbs_path")]
    pub thumb_path: String,
    /// Image served whenever a thumbnail cannot be produced
    pub default_img: String,
    /// Filesystem directory backing the public disk
    pub disk_root: String,
    /// URL prefix under which the disk is served
    pub base_url: String,
    /// Resize filter algorithm (nearest, triangle, catmull-rom, gaussian, lanczos3)
    pub resize_filter: String,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
    /// Permission bits for created thumbnail directories
    pub dir_mode: u32,
}

impl Default for ThumbConfig {
    fn default() -> Self {
        Self {
            version: 1,
            root_path: String::new(),
            thumb_path: DEFAULT_THUMB_PATH.to_string(),
            default_img: DEFAULT_IMAGE.to_string(),
            disk_root: "storage/app/public".to_string(),
            base_url: "/storage".to_string(),
            resize_filter: "lanczos3".to_string(),
            compress: None,
            dir_mode: DEFAULT_DIR_MODE,
        }
    }
}

impl ThumbConfig {
    pub fn filter(&self) -> Result<ResizeFilter> {
        ResizeFilter::parse(&self.resize_filter).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown resize_filter '{}' in config file. Valid values: nearest, triangle, \
                 catmull-rom, gaussian, lanczos3",
                self.resize_filter
            )
        })
    }

    pub fn compress_level(&self) -> Result<Option<CompressionLevel>> {
        match &self.compress {
            None => Ok(None),
            Some(CompressConfig::Level(n)) if *n <= 6 => Ok(Some(CompressionLevel::Level(*n))),
            Some(CompressConfig::Level(n)) => {
                bail!("compress level must be 0-6 or \"max\" in config file, got {}", n)
            }
            Some(CompressConfig::Max(s)) if s.eq_ignore_ascii_case("max") => {
                Ok(Some(CompressionLevel::Max))
            }
            Some(CompressConfig::Max(s)) => {
                bail!("compress level must be 0-6 or \"max\" in config file, got '{}'", s)
            }
        }
    }
}
