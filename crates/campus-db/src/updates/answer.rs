//! Answer update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnswerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_best: Option<bool>,
}

pub struct AnswerUpdateBuilder(AnswerUpdate);

impl AnswerUpdateBuilder {
    pub fn new() -> Self {
        Self(AnswerUpdate::default())
    }

    pub fn body(mut self, val: impl Into<String>) -> Self {
        self.0.body = Some(val.into());
        self
    }

    pub fn is_best(mut self, val: bool) -> Self {
        self.0.is_best = Some(val);
        self
    }

    pub fn build(self) -> AnswerUpdate {
        self.0
    }
}
