mod local;

use std::io;

pub use local::{DEFAULT_DIR_MODE, LocalDisk};

/// A public file store: where sources live and thumbnails are written.
///
/// All paths are `/`-separated and relative to the store's root.
pub trait Storage: Send + Sync {
    fn exists(&self, path: &str) -> bool;

    fn is_directory(&self, path: &str) -> bool;

    /// Create a directory and all of its missing parents.
    fn make_directory(&self, path: &str) -> io::Result<()>;

    fn read(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Read at most `limit` bytes from the start of a file.
    fn read_head(&self, path: &str, limit: usize) -> io::Result<Vec<u8>>;

    /// Publish `contents` at `path`. Readers never observe a partial file.
    fn write(&self, path: &str, contents: &[u8]) -> io::Result<()>;

    /// Public URL under which `path` is served.
    fn url(&self, path: &str) -> String;
}

/// Join path segments with single `/` separators, skipping empty ones.
pub fn join_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
