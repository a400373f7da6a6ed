use std::fmt;
use std::path::Path;

use super::{Dimensions, ResizeMode};
use crate::storage::join_path;

/// Storage path of a cached thumbnail.
///
/// Layout: `{root}/{thumbs}/{w}x{h}_{mode}/{stem}.png`. The key is a pure
/// function of its inputs, so two identical requests always share one file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThumbnailKey(String);

impl ThumbnailKey {
    /// Returns `None` when the source has no file name to derive a stem from.
    pub fn new(
        root_path: &str,
        thumb_path: &str,
        source: &str,
        size: Dimensions,
        mode: ResizeMode,
    ) -> Option<Self> {
        let stem = Path::new(source)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())?;

        let variant = format!("{}x{}_{}", size.width, size.height, mode);
        let file_name = format!("{}.png", stem);

        Some(Self(join_path(&[
            root_path,
            thumb_path,
            &variant,
            &file_name,
        ])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory holding this thumbnail.
    pub fn parent(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(dir, _)| dir)
    }
}

impl fmt::Display for ThumbnailKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(w: u32, h: u32) -> Dimensions {
        Dimensions {
            width: w,
            height: h,
        }
    }

    #[test]
    fn test_key_layout() {
        let key = ThumbnailKey::new("uploads/", "thumbs/", "photos/cat.jpg", size(100, 80), ResizeMode::Fit)
            .unwrap();
        assert_eq!(key.as_str(), "uploads/thumbs/100x80_fit/cat.png");
        assert_eq!(key.parent(), Some("uploads/thumbs/100x80_fit"));
    }

    #[test]
    fn test_key_skips_empty_segments() {
        let key = ThumbnailKey::new("", "/thumbs", "cat.gif", size(5, 5), ResizeMode::ResizeCanvas)
            .unwrap();
        assert_eq!(key.as_str(), "thumbs/5x5_resizeCanvas/cat.png");
    }

    #[test]
    fn test_key_is_deterministic() {
        let a = ThumbnailKey::new("r", "t", "a/b.jpeg", size(10, 20), ResizeMode::Background);
        let b = ThumbnailKey::new("r", "t", "a/b.jpeg", size(10, 20), ResizeMode::Background);
        assert_eq!(a, b);

        let other_mode = ThumbnailKey::new("r", "t", "a/b.jpeg", size(10, 20), ResizeMode::Resize);
        let other_size = ThumbnailKey::new("r", "t", "a/b.jpeg", size(20, 10), ResizeMode::Background);
        assert_ne!(a, other_mode);
        assert_ne!(a, other_size);
    }

    #[test]
    fn test_key_keeps_inner_dots_in_stem() {
        let key = ThumbnailKey::new("", "t", "my.holiday.photo.jpg", size(1, 1), ResizeMode::Fit)
            .unwrap();
        assert_eq!(key.as_str(), "t/1x1_fit/my.holiday.photo.png");
    }

    #[test]
    fn test_key_without_file_name() {
        assert!(ThumbnailKey::new("", "t", "", size(1, 1), ResizeMode::Fit).is_none());
    }
}
