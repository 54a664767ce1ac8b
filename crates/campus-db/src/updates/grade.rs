//! Grade update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct GradeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Option<String>>,
}

pub struct GradeUpdateBuilder(GradeUpdate);

impl GradeUpdateBuilder {
    pub fn new() -> Self {
        Self(GradeUpdate::default())
    }

    pub fn score(mut self, val: f64) -> Self {
        self.0.score = Some(val);
        self
    }

    pub fn feedback(mut self, val: Option<String>) -> Self {
        self.0.feedback = Some(val);
        self
    }

    pub fn build(self) -> GradeUpdate {
        self.0
    }
}
