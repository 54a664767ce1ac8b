//! Multiple-choice flashcards generated from note text.

use campus_core::entities::FlashcardDraft;
use serde_json::Value;

use crate::{AiError, CompletionClient, CompletionRequest};

const FLASHCARD_TEMPERATURE: f32 = 0.7;

/// Number of cards requested per note.
pub const CARDS_PER_NOTE: usize = 5;

#[must_use]
pub fn flashcard_prompt(note_text: &str) -> String {
    format!(
        "Generate {CARDS_PER_NOTE} multiple-choice flashcards from this note.
Each flashcard must be in this exact JSON format:
[
  {{
    \"question\": \"What is ...?\",
    \"options\": [\"Option A\", \"Option B\", \"Option C\", \"Option D\"],
    \"answer\": \"Option B\"
  }}
]

Text:
{note_text}"
    )
}

fn non_empty_str(card: &Value, key: &str) -> Option<String> {
    card.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn draft_from(card: &Value) -> Option<FlashcardDraft> {
    let question = non_empty_str(card, "question")?;
    let answer = non_empty_str(card, "answer")?;
    let options: Vec<String> = card
        .get("options")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(String::from)
        .collect();
    if options.is_empty() {
        return None;
    }
    Some(FlashcardDraft {
        question,
        answer,
        options,
    })
}

/// Pull flashcards out of the model's reply.
///
/// Reads the span from the first `[` to the last `]` (or the whole reply when
/// there are no brackets) as a JSON array. Entries missing a question, an
/// answer, or options are dropped.
///
/// # Errors
///
/// Returns [`AiError::Parse`] when no non-empty JSON array can be read.
pub fn parse_flashcards(reply: &str) -> Result<Vec<FlashcardDraft>, AiError> {
    let span = match (reply.find('['), reply.rfind(']')) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => reply.trim(),
    };
    let cards: Vec<Value> = serde_json::from_str(span)
        .map_err(|e| AiError::Parse(format!("no flashcard array in reply: {e}")))?;
    if cards.is_empty() {
        return Err(AiError::Parse("reply contained an empty flashcard array".into()));
    }

    let total = cards.len();
    let drafts: Vec<FlashcardDraft> = cards.iter().filter_map(draft_from).collect();
    if drafts.len() < total {
        tracing::debug!(dropped = total - drafts.len(), "dropped incomplete flashcards");
    }
    Ok(drafts)
}

/// Ask the model for flashcards covering `note_text`.
///
/// # Errors
///
/// Returns [`AiError`] if the request fails or the reply holds no flashcard array.
pub async fn generate_flashcards(
    client: &impl CompletionClient,
    model: &str,
    note_text: &str,
) -> Result<Vec<FlashcardDraft>, AiError> {
    let request = CompletionRequest {
        model: model.to_string(),
        prompt: flashcard_prompt(note_text),
        temperature: FLASHCARD_TEMPERATURE,
    };
    let reply = client.complete(&request).await?;
    parse_flashcards(&reply)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;
    use pretty_assertions::assert_eq;

    /// Returns a fixed reply and remembers the last request.
    pub(crate) struct Canned {
        reply: String,
        seen: Mutex<Option<CompletionRequest>>,
    }

    impl Canned {
        pub(crate) fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                seen: Mutex::new(None),
            }
        }

        pub(crate) fn last_request(&self) -> CompletionRequest {
            self.seen.lock().unwrap().clone().unwrap()
        }
    }

    impl CompletionClient for Canned {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
            *self.seen.lock().unwrap() = Some(request.clone());
            Ok(self.reply.clone())
        }
    }

    const REPLY: &str = r#"Sure! Here are your flashcards:
[
  {"question": "What does litmus turn in acid?", "options": ["Red", "Blue", "Green", "Clear"], "answer": "Red"},
  {"question": "pH of pure water?", "options": ["7", "1", "14", "0"], "answer": "7"},
  {"question": "Missing answer", "options": ["a", "b"]},
  {"question": "", "options": ["a"], "answer": "a"},
  {"question": "No options", "options": [], "answer": "x"}
]
Let me know if you need more."#;

    #[test]
    fn extracts_array_from_prose() {
        let drafts = parse_flashcards(REPLY).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].question, "What does litmus turn in acid?");
        assert_eq!(drafts[0].answer, "Red");
        assert_eq!(drafts[0].options.len(), 4);
        assert_eq!(drafts[1].answer, "7");
    }

    #[test]
    fn unparseable_reply_is_error() {
        assert!(matches!(
            parse_flashcards("I cannot help with that."),
            Err(AiError::Parse(_))
        ));
        assert!(matches!(parse_flashcards("[not json]"), Err(AiError::Parse(_))));
        assert!(matches!(parse_flashcards("[]"), Err(AiError::Parse(_))));
    }

    #[test]
    fn all_incomplete_yields_empty() {
        let drafts = parse_flashcards(r#"[{"question": "q"}]"#).unwrap();
        assert!(drafts.is_empty());
    }

    #[tokio::test]
    async fn generate_sends_note_text() {
        let client = Canned::new(REPLY);
        let drafts = generate_flashcards(&client, "gpt-4o-mini", "Acids turn litmus red.")
            .await
            .unwrap();
        assert_eq!(drafts.len(), 2);

        let sent = client.last_request();
        assert_eq!(sent.model, "gpt-4o-mini");
        assert!(sent.prompt.ends_with("Text:\nAcids turn litmus red."));
        assert!(sent.prompt.starts_with("Generate 5 multiple-choice flashcards"));
    }
}
