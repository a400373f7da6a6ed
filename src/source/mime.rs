/// Content types the resolver will thumbnail.
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/gif", "image/png"];

/// Bytes read from the start of a file to detect its type.
pub const SNIFF_LEN: usize = 4096;

const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// Detect the content type of a file from its leading bytes.
///
/// The file extension is never consulted.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MIME_TYPE)
}

pub fn is_allowed_mime(mime: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    fn encoded(format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::new_rgb8(4, 4);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_sniff_allowed_formats() {
        assert_eq!(sniff_mime(&encoded(ImageFormat::Png)), "image/png");
        assert_eq!(sniff_mime(&encoded(ImageFormat::Jpeg)), "image/jpeg");
        assert_eq!(sniff_mime(&encoded(ImageFormat::Gif)), "image/gif");
    }

    #[test]
    fn test_sniff_ignores_content_that_is_not_an_image() {
        assert_eq!(sniff_mime(b"hello, world"), UNKNOWN_MIME_TYPE);
        assert_eq!(sniff_mime(&[]), UNKNOWN_MIME_TYPE);
    }

    #[test]
    fn test_allow_list() {
        assert!(is_allowed_mime("image/png"));
        assert!(is_allowed_mime("image/jpeg"));
        assert!(is_allowed_mime("image/gif"));
        assert!(!is_allowed_mime("image/bmp"));
        assert!(!is_allowed_mime("image/webp"));
        assert!(!is_allowed_mime(UNKNOWN_MIME_TYPE));
    }
}
