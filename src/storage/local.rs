use std::fs;
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;

use super::Storage;

/// Permissions for directories created under the disk (`rwxrwxr-x`).
pub const DEFAULT_DIR_MODE: u32 = 0o775;

#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// A [`Storage`] backed by a local directory served at `base_url`.
#[derive(Debug, Clone)]
pub struct LocalDisk {
    root: PathBuf,
    base_url: String,
    dir_mode: u32,
}

impl LocalDisk {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
            dir_mode: DEFAULT_DIR_MODE,
        }
    }

    /// Unix permission bits for directories created by [`Storage::make_directory`].
    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of a storage path.
    ///
    /// Returns `None` for paths that would leave the root (`..`, drive prefixes).
    pub fn full_path(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        contained.then(|| self.root.join(relative))
    }

    fn checked_path(&self, path: &str) -> io::Result<PathBuf> {
        self.full_path(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path escapes storage root: {}", path),
            )
        })
    }
}

impl Storage for LocalDisk {
    fn exists(&self, path: &str) -> bool {
        self.full_path(path).is_some_and(|p| p.exists())
    }

    fn is_directory(&self, path: &str) -> bool {
        self.full_path(path).is_some_and(|p| p.is_dir())
    }

    fn make_directory(&self, path: &str) -> io::Result<()> {
        let dir = self.checked_path(path)?;
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(self.dir_mode);
        }
        builder.create(dir)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(self.checked_path(path)?)
    }

    fn read_head(&self, path: &str, limit: usize) -> io::Result<Vec<u8>> {
        let file = fs::File::open(self.checked_path(path)?)?;
        let mut head = Vec::with_capacity(limit);
        file.take(u64::try_from(limit).unwrap_or(u64::MAX))
            .read_to_end(&mut head)?;
        Ok(head)
    }

    fn write(&self, path: &str, contents: &[u8]) -> io::Result<()> {
        let target = self.checked_path(path)?;
        let dir = target.parent().unwrap_or(self.root.as_path());

        // Stage next to the target so the rename never crosses filesystems
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(contents)?;
        staged.flush()?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(staged.path(), fs::Permissions::from_mode(FILE_MODE))?;
        }
        staged.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
