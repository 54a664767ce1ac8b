use campus_db::updates::question::QuestionUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::QuestionCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus question`.
pub async fn handle(
    action: &QuestionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        QuestionCommands::Create {
            author,
            title,
            body,
        } => output(&svc.create_question(*author, title, body).await?, flags.format),
        QuestionCommands::Get { id } => output(&svc.get_question(*id).await?, flags.format),
        QuestionCommands::List { author } => {
            output(&svc.list_questions(*author, ctx.limit(flags)).await?, flags.format)
        }
        QuestionCommands::Update {
            id,
            author,
            title,
            body,
        } => {
            let mut builder = QuestionUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title);
            }
            if let Some(body) = body {
                builder = builder.body(body);
            }
            let question = svc.update_question(*author, *id, builder.build()).await?;
            output(&question, flags.format)
        }
        QuestionCommands::Delete { id, author } => {
            svc.delete_question(*author, *id).await?;
            output(&json!({ "deleted": true, "id": id }), flags.format)
        }
    }
}
