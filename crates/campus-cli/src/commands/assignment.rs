use campus_db::updates::assignment::AssignmentUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AssignmentCommands;
use crate::commands::shared::parse::parse_due_date;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus assignment`.
pub async fn handle(
    action: &AssignmentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        AssignmentCommands::Create {
            unit,
            title,
            description,
            due,
            file_path,
        } => {
            let due = due.as_deref().map(parse_due_date).transpose()?;
            let assignment = svc
                .create_assignment(
                    *unit,
                    title,
                    description.as_deref(),
                    due,
                    file_path.as_deref(),
                )
                .await?;
            output(&assignment, flags.format)
        }
        AssignmentCommands::Get { id } => output(&svc.get_assignment(*id).await?, flags.format),
        AssignmentCommands::List { unit } => {
            output(&svc.list_assignments(*unit).await?, flags.format)
        }
        AssignmentCommands::Update {
            id,
            title,
            description,
            due,
            clear_due,
            file_path,
        } => {
            let mut builder = AssignmentUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title);
            }
            if let Some(description) = description {
                builder = builder.description(Some(description.clone()));
            }
            if let Some(due) = due {
                builder = builder.due_date(Some(parse_due_date(due)?));
            } else if *clear_due {
                builder = builder.due_date(None);
            }
            if let Some(file_path) = file_path {
                builder = builder.file_path(Some(file_path.clone()));
            }
            let assignment = svc.update_assignment(*id, builder.build()).await?;
            output(&assignment, flags.format)
        }
        AssignmentCommands::Toggle { id } => {
            output(&svc.toggle_assignment(*id).await?, flags.format)
        }
        AssignmentCommands::Delete { id } => {
            svc.delete_assignment(*id).await?;
            output(&json!({ "deleted": true, "id": id }), flags.format)
        }
    }
}
