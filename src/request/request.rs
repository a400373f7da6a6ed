use super::ResizeMode;
use crate::error::ThumbError;

/// Largest accepted thumbnail side, in pixels.
pub const MAX_DIMENSION: u32 = 8192;

/// Target box of a thumbnail, both sides in `1..=MAX_DIMENSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Result<Self, ThumbError> {
        if width == 0 || height == 0 {
            return Err(ThumbError::InvalidDimensions(format!(
                "{}x{} has a zero side",
                width, height
            )));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ThumbError::InvalidDimensions(format!(
                "{}x{} exceeds the {}px limit",
                width, height, MAX_DIMENSION
            )));
        }
        Ok(Self { width, height })
    }

    /// Validate an optional width/height pair.
    ///
    /// Both absent means "serve the original"; a lone width or height is rejected.
    pub fn from_optional(
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Option<Self>, ThumbError> {
        match (width, height) {
            (None, None) => Ok(None),
            (Some(w), Some(h)) => Self::new(w, h).map(Some),
            (Some(w), None) => Err(ThumbError::InvalidDimensions(format!(
                "width {} given without a height",
                w
            ))),
            (None, Some(h)) => Err(ThumbError::InvalidDimensions(format!(
                "height {} given without a width",
                h
            ))),
        }
    }
}

/// A validated lookup: which image, at what size, fitted how.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRequest {
    /// Source path relative to the configured root, already normalised
    pub source: String,
    /// `None` serves the original image untouched
    pub size: Option<Dimensions>,
    pub mode: ResizeMode,
}

impl ImageRequest {
    /// Build a request from a path as it appears in public URLs.
    ///
    /// The leading link segment (e.g. `storage/`) is stripped, see
    /// [`normalize_source_path`].
    pub fn new(
        source: &str,
        width: Option<u32>,
        height: Option<u32>,
        mode: ResizeMode,
    ) -> Result<Self, ThumbError> {
        if source.is_empty() {
            return Err(ThumbError::EmptyInput);
        }
        let size = Dimensions::from_optional(width, height)?;
        Ok(Self {
            source: normalize_source_path(source).to_string(),
            size,
            mode,
        })
    }

    /// Build a request from a path that is already relative to the root.
    pub fn relative(source: impl Into<String>, size: Option<Dimensions>, mode: ResizeMode) -> Self {
        Self {
            source: source.into(),
            size,
            mode,
        }
    }
}

/// Drop the leading link segment of a public path.
///
/// Everything before the first `/` found after the first character is
/// removed, then any leading slashes. Paths without such a separator are kept
/// whole.
pub fn normalize_source_path(path: &str) -> &str {
    let rest = path
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '/')
        .map_or(path, |(i, _)| &path[i..]);
    rest.trim_start_matches('/')
}
