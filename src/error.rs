use thiserror::Error;

/// Every way a thumbnail lookup can fail.
///
/// Paths are storage-relative, `/`-separated strings.
#[derive(Error, Debug)]
pub enum ThumbError {
    #[error("No source image given")]
    EmptyInput,

    #[error("Source image does not exist: {0}")]
    SourceNotFound(String),

    #[error("Source path is a directory: {0}")]
    SourceIsDirectory(String),

    #[error("Unsupported content type '{mime}' for '{path}'")]
    UnsupportedMimeType { path: String, mime: String },

    #[error(
        "Unknown resize mode '{0}'. Valid values: fit, resize, background, resizeCanvas"
    )]
    UnrecognizedMode(String),

    #[error("Invalid thumbnail dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Failed to read source image '{path}': {source}")]
    SourceRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to decode image '{path}': {source}")]
    ImageLoad {
        path: String,
        source: image::ImageError,
    },

    #[error("Failed to encode thumbnail '{path}': {source}")]
    ImageSave {
        path: String,
        source: image::ImageError,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: String, message: String },

    #[error("Failed to write thumbnail '{path}': {source}")]
    OutputWrite {
        path: String,
        source: std::io::Error,
    },
}

impl ThumbError {
    /// True for failures caused by the request itself rather than by I/O
    /// or codec problems on this host.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ThumbError::EmptyInput
                | ThumbError::SourceNotFound(_)
                | ThumbError::SourceIsDirectory(_)
                | ThumbError::UnsupportedMimeType { .. }
                | ThumbError::UnrecognizedMode(_)
                | ThumbError::InvalidDimensions(_)
        )
    }
}
