//! Unit update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct UnitUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

pub struct UnitUpdateBuilder(UnitUpdate);

impl UnitUpdateBuilder {
    pub fn new() -> Self {
        Self(UnitUpdate::default())
    }

    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    pub fn overview(mut self, val: Option<String>) -> Self {
        self.0.overview = Some(val);
        self
    }

    pub fn instructor_id(mut self, val: i64) -> Self {
        self.0.instructor_id = Some(val);
        self
    }

    pub fn is_active(mut self, val: bool) -> Self {
        self.0.is_active = Some(val);
        self
    }

    pub fn build(self) -> UnitUpdate {
        self.0
    }
}
