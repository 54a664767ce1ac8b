//! Assignment update builder.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<Option<String>>,
}

pub struct AssignmentUpdateBuilder(AssignmentUpdate);

impl AssignmentUpdateBuilder {
    pub fn new() -> Self {
        Self(AssignmentUpdate::default())
    }

    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    pub fn due_date(mut self, val: Option<DateTime<Utc>>) -> Self {
        self.0.due_date = Some(val);
        self
    }

    pub fn file_path(mut self, val: Option<String>) -> Self {
        self.0.file_path = Some(val);
        self
    }

    pub fn build(self) -> AssignmentUpdate {
        self.0
    }
}
