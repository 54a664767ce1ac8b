//! Question update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

pub struct QuestionUpdateBuilder(QuestionUpdate);

impl QuestionUpdateBuilder {
    pub fn new() -> Self {
        Self(QuestionUpdate::default())
    }

    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    pub fn body(mut self, val: impl Into<String>) -> Self {
        self.0.body = Some(val.into());
        self
    }

    pub fn build(self) -> QuestionUpdate {
        self.0
    }
}
