//! File storage configuration: submission uploads and the write-event journal.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_upload_dir() -> String {
    ".campus/uploads".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory receiving submission files.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// Directory for the JSONL write-event journal. Empty disables the journal.
    #[serde(default)]
    pub journal_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            journal_dir: String::new(),
        }
    }
}

impl StorageConfig {
    /// Journal directory, if the journal is enabled.
    pub fn journal_path(&self) -> Option<PathBuf> {
        if self.journal_dir.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.journal_dir))
        }
    }

    pub fn upload_path(&self) -> PathBuf {
        PathBuf::from(&self.upload_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journal_disabled_by_default() {
        let config = StorageConfig::default();
        assert!(config.journal_path().is_none());
        assert_eq!(config.upload_path(), PathBuf::from(".campus/uploads"));
    }

    #[test]
    fn journal_enabled_when_set() {
        let config = StorageConfig {
            journal_dir: "/tmp/journal".into(),
            ..Default::default()
        };
        assert_eq!(config.journal_path(), Some(PathBuf::from("/tmp/journal")));
    }
}
