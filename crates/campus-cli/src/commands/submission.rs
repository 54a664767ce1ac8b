use std::path::Path;

use anyhow::Context;
use campus_core::gate::{SubmissionFile, SubmissionPayload};
use chrono::Utc;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SubmissionCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus submission`.
pub async fn handle(
    action: &SubmissionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        SubmissionCommands::Submit {
            student,
            assignment,
            content,
            file,
        } => {
            let payload = SubmissionPayload {
                content: content.clone(),
                file: file.as_deref().map(read_upload).transpose()?,
            };
            let decision = svc
                .evaluate_and_submit(*student, *assignment, &payload, Utc::now())
                .await?;
            output(&decision, flags.format)
        }
        SubmissionCommands::List {
            assignment,
            student,
        } => output(&svc.list_submissions(*assignment, *student).await?, flags.format),
        SubmissionCommands::All { assignment } => {
            output(&svc.list_assignment_submissions(*assignment).await?, flags.format)
        }
        SubmissionCommands::Get { id } => output(&svc.get_submission(*id).await?, flags.format),
    }
}

/// Read a local file into an upload named after its final path component.
fn read_upload(path: &Path) -> anyhow::Result<SubmissionFile> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid upload path '{}'", path.display()))?;
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    Ok(SubmissionFile::new(filename, bytes))
}
