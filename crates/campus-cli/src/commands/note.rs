use campus_db::updates::note::NoteUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::NoteCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus note`.
pub async fn handle(action: &NoteCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        NoteCommands::Create {
            unit,
            uploaded_by,
            content,
            file_path,
        } => {
            let note = svc
                .create_note(*unit, *uploaded_by, content.as_deref(), file_path.as_deref())
                .await?;
            output(&note, flags.format)
        }
        NoteCommands::Get { id } => output(&svc.get_note(*id).await?, flags.format),
        NoteCommands::List { unit } => {
            output(&svc.list_notes(*unit, ctx.limit(flags)).await?, flags.format)
        }
        NoteCommands::Update {
            id,
            content,
            file_path,
            unit,
            uploaded_by,
        } => {
            let mut builder = NoteUpdateBuilder::new();
            if let Some(content) = content {
                builder = builder.content(content);
            }
            if let Some(file_path) = file_path {
                builder = builder.file_path(file_path);
            }
            if let Some(unit) = unit {
                builder = builder.unit_id(*unit);
            }
            if let Some(uploaded_by) = uploaded_by {
                builder = builder.uploaded_by(*uploaded_by);
            }
            output(&svc.update_note(*id, builder.build()).await?, flags.format)
        }
        NoteCommands::Activate { id } => output(&svc.set_note_active(*id, true).await?, flags.format),
        NoteCommands::Deactivate { id } => {
            output(&svc.set_note_active(*id, false).await?, flags.format)
        }
        NoteCommands::Delete { id } => {
            svc.delete_note(*id).await?;
            output(&json!({ "deleted": true, "id": id }), flags.format)
        }
    }
}
