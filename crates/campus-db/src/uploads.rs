//! File storage for uploaded submission artifacts.

use std::path::PathBuf;

use crate::error::DatabaseError;

/// Writes uploaded files into one flat directory.
///
/// A disabled store computes paths but never touches the filesystem.
pub struct UploadStore {
    upload_dir: PathBuf,
    enabled: bool,
}

impl UploadStore {
    /// Create a store rooted at `upload_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Io` if the directory cannot be created.
    pub fn new(upload_dir: PathBuf) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&upload_dir)?;
        Ok(Self {
            upload_dir,
            enabled: true,
        })
    }

    /// Create a disabled store (for tests that do not inspect files).
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            upload_dir: PathBuf::new(),
            enabled: false,
        }
    }

    #[cfg(test)]
    pub(crate) const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Where a file with this artifact name is stored.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.upload_dir.join(name)
    }

    /// Write an artifact, replacing any file with the same name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Io` if the write fails.
    pub fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, DatabaseError> {
        let path = self.path_for(name);
        if self.enabled {
            std::fs::write(&path, bytes)?;
        }
        Ok(path)
    }
}
