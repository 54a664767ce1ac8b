//! Note update builder.
//!
//! Content and file can be replaced but not cleared; a note always keeps at
//! least one of them.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<i64>,
}

pub struct NoteUpdateBuilder(NoteUpdate);

impl NoteUpdateBuilder {
    pub fn new() -> Self {
        Self(NoteUpdate::default())
    }

    pub fn content(mut self, val: impl Into<String>) -> Self {
        self.0.content = Some(val.into());
        self
    }

    pub fn file_path(mut self, val: impl Into<String>) -> Self {
        self.0.file_path = Some(val.into());
        self
    }

    pub fn unit_id(mut self, val: i64) -> Self {
        self.0.unit_id = Some(val);
        self
    }

    pub fn uploaded_by(mut self, val: i64) -> Self {
        self.0.uploaded_by = Some(val);
        self
    }

    pub fn build(self) -> NoteUpdate {
        self.0
    }
}
