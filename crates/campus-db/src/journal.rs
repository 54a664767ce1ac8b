//! JSONL journal of write events.
//!
//! Appends each [`WriteEvent`] to a per-day `{journal_dir}/{YYYY-MM-DD}.jsonl`
//! file using `serde_jsonlines::append_json_lines`.

use std::path::{Path, PathBuf};

use crate::error::DatabaseError;
use crate::events::{WriteEvent, WriteObserver};

/// Appends write events to per-day JSONL files.
pub struct EventJournal {
    journal_dir: PathBuf,
}

impl EventJournal {
    /// Create a journal in the given directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Io` if the directory cannot be created.
    pub fn new(journal_dir: PathBuf) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&journal_dir)?;
        Ok(Self { journal_dir })
    }

    /// The directory where journal files are stored.
    #[must_use]
    pub fn journal_dir(&self) -> &Path {
        &self.journal_dir
    }

    /// Path of the file that receives an event.
    #[must_use]
    pub fn file_for(&self, event: &WriteEvent) -> PathBuf {
        self.journal_dir
            .join(format!("{}.jsonl", event.at.format("%Y-%m-%d")))
    }

    /// Read every event in the journal, oldest file first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a file cannot be read or a line is not a valid event.
    pub fn read_all(&self) -> Result<Vec<WriteEvent>, DatabaseError> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.journal_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "jsonl"))
            .collect();
        files.sort();

        let mut events = Vec::new();
        for file in files {
            let batch: Vec<WriteEvent> = serde_jsonlines::json_lines::<WriteEvent, _>(&file)?
                .collect::<std::io::Result<_>>()?;
            events.extend(batch);
        }
        Ok(events)
    }
}

impl WriteObserver for EventJournal {
    fn name(&self) -> &'static str {
        "journal"
    }

    fn on_write(&self, event: &WriteEvent) -> Result<(), DatabaseError> {
        serde_jsonlines::append_json_lines(self.file_for(event), [event])?;
        Ok(())
    }
}
