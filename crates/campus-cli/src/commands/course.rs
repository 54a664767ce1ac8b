use campus_db::updates::course::CourseUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CourseCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus course`.
pub async fn handle(
    action: &CourseCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        CourseCommands::Create { title, description } => {
            let course = svc.create_course(title, description.as_deref()).await?;
            output(&course, flags.format)
        }
        CourseCommands::Get { id } => output(&svc.get_course(*id).await?, flags.format),
        CourseCommands::List { all } => {
            let courses = svc.list_courses(!*all, ctx.limit(flags)).await?;
            output(&courses, flags.format)
        }
        CourseCommands::Update {
            id,
            title,
            description,
            clear_description,
        } => {
            let mut builder = CourseUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title);
            }
            if let Some(description) = description {
                builder = builder.description(Some(description.clone()));
            } else if *clear_description {
                builder = builder.description(None);
            }
            output(&svc.update_course(*id, builder.build()).await?, flags.format)
        }
        CourseCommands::Activate { id } => {
            output(&svc.set_course_active(*id, true).await?, flags.format)
        }
        CourseCommands::Deactivate { id } => {
            output(&svc.set_course_active(*id, false).await?, flags.format)
        }
        CourseCommands::Delete { id } => {
            svc.delete_course(*id).await?;
            output(&json!({ "deleted": true, "id": id }), flags.format)
        }
    }
}
