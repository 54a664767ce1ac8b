//! Grade suggestions for a submission.
//!
//! The model is asked for `{"suggested_score": <0-100>, "feedback": "..."}`.
//! When the reply is not that object, the whole reply becomes the feedback
//! and no score is suggested.

use serde::{Deserialize, Serialize};

use crate::{AiError, CompletionClient, CompletionRequest};

const GRADING_TEMPERATURE: f32 = 0.3;

/// A model-proposed score and feedback. The instructor decides what to record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeSuggestion {
    pub suggested_score: Option<f64>,
    pub feedback: String,
}

#[derive(Deserialize)]
struct RawSuggestion {
    suggested_score: Option<f64>,
    #[serde(default)]
    feedback: String,
}

/// Build the grading prompt.
#[must_use]
pub fn grading_prompt(title: &str, description: Option<&str>, content: Option<&str>) -> String {
    let instructions = format!("{title} - {}", description.unwrap_or_default());
    let content = content
        .filter(|c| !c.trim().is_empty())
        .unwrap_or("No text content provided.");
    format!(
        "You are an academic instructor grading a student's work.
Here are the assignment details:
{instructions}

Student's submission:
{content}

Grade the submission fairly between 0 and 100 based on clarity, accuracy, completeness, and relevance.
Respond in JSON with two fields:
{{
    \"suggested_score\": <number between 0 and 100>,
    \"feedback\": \"<brief constructive feedback>\"
}}"
    )
}

/// Interpret the model's reply.
///
/// A score outside `[0, 100]` is dropped; the feedback is kept.
#[must_use]
pub fn parse_suggestion(reply: &str) -> GradeSuggestion {
    let reply = reply.trim();
    let parsed = serde_json::from_str::<RawSuggestion>(reply).ok().or_else(|| {
        let start = reply.find('{')?;
        let end = reply.rfind('}')?;
        serde_json::from_str::<RawSuggestion>(reply.get(start..=end)?).ok()
    });

    match parsed {
        Some(raw) => GradeSuggestion {
            suggested_score: raw
                .suggested_score
                .filter(|s| s.is_finite() && (0.0..=100.0).contains(s)),
            feedback: raw.feedback,
        },
        None => GradeSuggestion {
            suggested_score: None,
            feedback: reply.to_string(),
        },
    }
}

/// Ask the model for a score and feedback on one submission.
///
/// # Errors
///
/// Returns [`AiError`] if the completion request fails. An unparseable reply
/// is not an error.
pub async fn suggest_grade(
    client: &impl CompletionClient,
    model: &str,
    title: &str,
    description: Option<&str>,
    content: Option<&str>,
) -> Result<GradeSuggestion, AiError> {
    let request = CompletionRequest {
        model: model.to_string(),
        prompt: grading_prompt(title, description, content),
        temperature: GRADING_TEMPERATURE,
    };
    let reply = client.complete(&request).await?;
    let suggestion = parse_suggestion(&reply);
    if suggestion.suggested_score.is_none() {
        tracing::debug!("grading reply carried no usable score");
    }
    Ok(suggestion)
}
