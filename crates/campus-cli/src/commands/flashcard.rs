use campus_core::entities::FlashcardDraft;
use campus_core::responses::FlashcardBatch;
use campus_db::error::DatabaseError;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FlashcardCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus flashcard`.
pub async fn handle(
    action: &FlashcardCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        FlashcardCommands::Create {
            note,
            question,
            answer,
            options,
        } => {
            let draft = FlashcardDraft {
                question: question.clone(),
                answer: answer.clone(),
                options: options.clone(),
            };
            let batch = ctx.service.create_flashcards(*note, &[draft]).await?;
            output(&batch, flags.format)
        }
        FlashcardCommands::List { note } => {
            output(&ctx.service.list_flashcards(*note).await?, flags.format)
        }
        FlashcardCommands::Generate { note } => {
            let batch = generate(*note, ctx).await?;
            output(&batch, flags.format)
        }
    }
}

async fn generate(note_id: i64, ctx: &AppContext) -> anyhow::Result<FlashcardBatch> {
    let note = ctx.service.get_note(note_id).await?;
    let Some(text) = note.content.as_deref().filter(|c| !c.trim().is_empty()) else {
        return Err(DatabaseError::validation(format!("note {note_id} has no text content")).into());
    };

    let client = ctx.completion_client()?;
    let drafts =
        campus_ai::generate_flashcards(&client, &ctx.config.openai.flashcard_model, text).await?;
    tracing::debug!(note_id, drafts = drafts.len(), "flashcards generated");

    Ok(ctx.service.create_flashcards(note_id, &drafts).await?)
}
