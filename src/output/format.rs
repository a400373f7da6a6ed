use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use crate::cli::CompressionLevel;
use crate::error::ThumbError;

/// Encode a thumbnail as PNG, optionally optimising it with oxipng.
///
/// `path` only labels errors.
pub fn encode_png(
    img: &DynamicImage,
    path: &str,
    compress: Option<CompressionLevel>,
) -> Result<Vec<u8>, ThumbError> {
    let mut png_data = Cursor::new(Vec::new());
    img.write_to(&mut png_data, ImageFormat::Png)
        .map_err(|e| ThumbError::ImageSave {
            path: path.to_string(),
            source: e,
        })?;

    let Some(level) = compress else {
        return Ok(png_data.into_inner());
    };

    let opts = match level {
        CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
        CompressionLevel::Max => oxipng::Options::max_compression(),
    };
    oxipng::optimize_from_memory(&png_data.into_inner(), &opts).map_err(|e| {
        ThumbError::PngCompress {
            path: path.to_string(),
            message: e.to_string(),
        }
    })
}
