use std::path::PathBuf;

use log::{debug, info, warn};

use super::{KeyedLocks, ResolvedKind, Resolution, ResolverStats, StatsSnapshot};
use crate::cli::{CompressionLevel, ResizeFilter};
use crate::config::ThumbConfig;
use crate::error::ThumbError;
use crate::output::encode_png;
use crate::request::{Dimensions, ImageRequest, ResizeMode, ThumbnailKey};
use crate::source::{SNIFF_LEN, decode_source, is_allowed_mime, sniff_mime};
use crate::storage::{LocalDisk, Storage, join_path};
use crate::transform::apply_mode;

pub const DEFAULT_THUMB_PATH: &str = "thumbs";
pub const DEFAULT_IMAGE: &str = "images/default.png";

/// Maps image requests to URLs, generating thumbnails on first use.
///
/// Thumbnails are cached forever under a key derived from the request
/// (see [`ThumbnailKey`]); once a key exists on storage the source is never
/// looked at again for it. Concurrent requests for the same key generate the
/// file once.
pub struct ThumbnailResolver<S> {
    storage: S,
    root_path: String,
    thumb_path: String,
    default_img: String,
    filter: ResizeFilter,
    compress: Option<CompressionLevel>,
    locks: KeyedLocks,
    stats: ResolverStats,
}

impl ThumbnailResolver<LocalDisk> {
    /// Resolver over a local directory, configured from `config`.
    pub fn local(
        config: &ThumbConfig,
        disk_root: impl Into<PathBuf>,
        filter: ResizeFilter,
        compress: Option<CompressionLevel>,
    ) -> Self {
        let disk = LocalDisk::new(disk_root, config.base_url.clone()).dir_mode(config.dir_mode);
        Self::new(disk)
            .root_path(config.root_path.clone())
            .thumb_path(config.thumb_path.clone())
            .default_img(config.default_img.clone())
            .filter(filter)
            .compress(compress)
    }
}

impl<S: Storage> ThumbnailResolver<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            root_path: String::new(),
            thumb_path: DEFAULT_THUMB_PATH.to_string(),
            default_img: DEFAULT_IMAGE.to_string(),
            filter: ResizeFilter::default(),
            compress: None,
            locks: KeyedLocks::new(),
            stats: ResolverStats::default(),
        }
    }

    /// Directory prefix holding source images.
    pub fn root_path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = root_path.into();
        self
    }

    /// Directory, inside the root path, holding generated thumbnails.
    pub fn thumb_path(mut self, thumb_path: impl Into<String>) -> Self {
        self.thumb_path = thumb_path.into();
        self
    }

    /// Storage path of the image served when a lookup fails.
    pub fn default_img(mut self, default_img: impl Into<String>) -> Self {
        self.default_img = default_img.into();
        self
    }

    pub fn filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn compress(mut self, compress: Option<CompressionLevel>) -> Self {
        self.compress = compress;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn default_url(&self) -> String {
        self.storage.url(&self.default_img)
    }

    /// Cache key a request maps to, if it asks for a thumbnail at all.
    pub fn thumbnail_key(&self, request: &ImageRequest) -> Option<ThumbnailKey> {
        let size = request.size?;
        ThumbnailKey::new(
            &self.root_path,
            &self.thumb_path,
            &request.source,
            size,
            request.mode,
        )
    }

    /// Resolve a public image path to a URL.
    ///
    /// `mode` is one of `fit`, `resize`, `background` or `resizeCanvas`.
    /// Width and height must be given together; without them the original
    /// image's URL is returned.
    pub fn resolve(
        &self,
        source: &str,
        width: Option<u32>,
        height: Option<u32>,
        mode: &str,
    ) -> Result<Resolution, ThumbError> {
        if source.is_empty() {
            return Err(ThumbError::EmptyInput);
        }
        let mode: ResizeMode = mode.parse()?;
        let request = ImageRequest::new(source, width, height, mode)?;
        self.resolve_request(&request)
    }

    /// Like [`resolve`](Self::resolve), but never fails: any error yields the
    /// default image URL.
    pub fn resolve_or_default(
        &self,
        source: &str,
        width: Option<u32>,
        height: Option<u32>,
        mode: &str,
    ) -> String {
        match self.resolve(source, width, height, mode) {
            Ok(resolution) => resolution.url,
            Err(e) => self.fall_back(source, &e),
        }
    }

    /// Resolve an already validated request.
    pub fn resolve_request(&self, request: &ImageRequest) -> Result<Resolution, ThumbError> {
        if request.source.is_empty() {
            return Err(ThumbError::SourceNotFound(request.source.clone()));
        }

        let key = match request.size {
            Some(_) => Some(
                self.thumbnail_key(request)
                    .ok_or_else(|| ThumbError::SourceNotFound(request.source.clone()))?,
            ),
            None => None,
        };

        if let Some(key) = &key {
            if self.storage.exists(key.as_str()) {
                debug!("Cache hit for {}", key);
                return Ok(self.found(key.as_str(), ResolvedKind::Cached));
            }
        }

        let source_path = join_path(&[&self.root_path, &request.source]);
        if !self.storage.exists(&source_path) {
            return Err(ThumbError::SourceNotFound(source_path));
        }
        if self.storage.is_directory(&source_path) {
            return Err(ThumbError::SourceIsDirectory(source_path));
        }

        let head = self
            .storage
            .read_head(&source_path, SNIFF_LEN)
            .map_err(|e| ThumbError::SourceRead {
                path: source_path.clone(),
                source: e,
            })?;
        let mime = sniff_mime(&head);
        if !is_allowed_mime(mime) {
            return Err(ThumbError::UnsupportedMimeType {
                path: source_path,
                mime: mime.to_string(),
            });
        }

        let (Some(key), Some(size)) = (key, request.size) else {
            return Ok(self.found(&source_path, ResolvedKind::Original));
        };

        self.locks.with_lock(key.as_str(), || {
            self.generate(&key, &source_path, size, request.mode)
        })
    }

    /// Must run under the key's lock.
    fn generate(
        &self,
        key: &ThumbnailKey,
        source_path: &str,
        size: Dimensions,
        mode: ResizeMode,
    ) -> Result<Resolution, ThumbError> {
        // Another caller may have published it while we waited for the lock
        if self.storage.exists(key.as_str()) {
            debug!("Cache hit for {} after waiting", key);
            return Ok(self.found(key.as_str(), ResolvedKind::Cached));
        }

        debug!("Cache miss for {}, generating from {}", key, source_path);
        let bytes = self
            .storage
            .read(source_path)
            .map_err(|e| ThumbError::SourceRead {
                path: source_path.to_string(),
                source: e,
            })?;
        let img = decode_source(source_path, &bytes)?;
        let thumbnail = apply_mode(img, mode, size, self.filter.to_image_filter());
        let png = encode_png(&thumbnail, key.as_str(), self.compress)?;

        if let Some(dir) = key.parent() {
            self.storage
                .make_directory(dir)
                .map_err(|e| ThumbError::OutputWrite {
                    path: dir.to_string(),
                    source: e,
                })?;
        }
        self.storage
            .write(key.as_str(), &png)
            .map_err(|e| ThumbError::OutputWrite {
                path: key.to_string(),
                source: e,
            })?;

        info!(
            "Generated {} ({}x{} {}) from {}",
            key, size.width, size.height, mode, source_path
        );
        Ok(self.found(key.as_str(), ResolvedKind::Generated))
    }

    fn found(&self, path: &str, kind: ResolvedKind) -> Resolution {
        self.stats.record(kind);
        Resolution {
            url: self.storage.url(path),
            path: path.to_string(),
            kind,
        }
    }

    fn fall_back(&self, source: &str, error: &ThumbError) -> String {
        self.stats.record_fallback();
        match error {
            ThumbError::EmptyInput => debug!("No image requested, serving default"),
            e if e.is_invalid_input() => warn!("Serving default image for '{}': {}", source, e),
            e => warn!("Thumbnail for '{}' failed, serving default: {}", source, e),
        }
        self.default_url()
    }
}
