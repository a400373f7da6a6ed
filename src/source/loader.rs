use std::io::Cursor;

use image::{DynamicImage, ImageReader};

use crate::error::ThumbError;

/// Decode source bytes, detecting the format from their content.
pub fn decode_source(path: &str, bytes: &[u8]) -> Result<DynamicImage, ThumbError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ThumbError::ImageLoad {
            path: path.to_string(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| ThumbError::ImageLoad {
            path: path.to_string(),
            source: e,
        })
}
