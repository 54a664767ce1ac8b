use campus_db::updates::grade::GradeUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GradeCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus grade`.
pub async fn handle(
    action: &GradeCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        GradeCommands::Create {
            submission,
            instructor,
            score,
            feedback,
        } => {
            let grade = svc
                .create_grade(*submission, *instructor, *score, feedback.as_deref())
                .await?;
            output(&grade, flags.format)
        }
        GradeCommands::Get { submission } => {
            let grade = svc.get_grade_for_submission(*submission).await?;
            output(&json!({ "submission_id": submission, "grade": grade }), flags.format)
        }
        GradeCommands::List { instructor } => {
            let grades = svc
                .list_grades_by_instructor(*instructor, ctx.limit(flags))
                .await?;
            output(&grades, flags.format)
        }
        GradeCommands::Update {
            id,
            score,
            feedback,
            clear_feedback,
        } => {
            let mut builder = GradeUpdateBuilder::new();
            if let Some(score) = score {
                builder = builder.score(*score);
            }
            if let Some(feedback) = feedback {
                builder = builder.feedback(Some(feedback.clone()));
            } else if *clear_feedback {
                builder = builder.feedback(None);
            }
            output(&svc.update_grade(*id, builder.build()).await?, flags.format)
        }
        GradeCommands::Delete { id } => {
            svc.delete_grade(*id).await?;
            output(&json!({ "deleted": true, "id": id }), flags.format)
        }
        GradeCommands::Suggest { submission } => suggest(*submission, ctx, flags).await,
    }
}

async fn suggest(submission_id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let submission = ctx.service.get_submission(submission_id).await?;
    let assignment = ctx.service.get_assignment(submission.assignment_id).await?;
    let client = ctx.completion_client()?;

    let suggestion = campus_ai::suggest_grade(
        &client,
        &ctx.config.openai.grading_model,
        &assignment.title,
        assignment.description.as_deref(),
        submission.content.as_deref(),
    )
    .await?;

    output(
        &json!({
            "submission_id": submission_id,
            "suggestion": suggestion,
        }),
        flags.format,
    )
}
