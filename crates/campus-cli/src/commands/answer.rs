use campus_db::updates::answer::AnswerUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AnswerCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus answer`.
pub async fn handle(
    action: &AnswerCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        AnswerCommands::Create {
            question,
            author,
            body,
        } => output(&svc.create_answer(*question, *author, body).await?, flags.format),
        AnswerCommands::Get { id } => output(&svc.get_answer(*id).await?, flags.format),
        AnswerCommands::List { question } => {
            output(&svc.list_answers(*question).await?, flags.format)
        }
        AnswerCommands::Update {
            id,
            author,
            body,
            best,
        } => {
            let mut builder = AnswerUpdateBuilder::new();
            if let Some(body) = body {
                builder = builder.body(body);
            }
            if let Some(best) = best {
                builder = builder.is_best(*best);
            }
            let answer = svc.update_answer(*author, *id, builder.build()).await?;
            output(&answer, flags.format)
        }
        AnswerCommands::Delete { id, author } => {
            svc.delete_answer(*author, *id).await?;
            output(&json!({ "deleted": true, "id": id }), flags.format)
        }
    }
}
