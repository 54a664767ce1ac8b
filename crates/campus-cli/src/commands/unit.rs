use campus_db::updates::unit::UnitUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UnitCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus unit`.
pub async fn handle(action: &UnitCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        UnitCommands::Create {
            course,
            instructor,
            title,
            overview,
        } => {
            let unit = svc
                .create_unit(*course, *instructor, title, overview.as_deref())
                .await?;
            output(&unit, flags.format)
        }
        UnitCommands::Get { id } => output(&svc.get_unit(*id).await?, flags.format),
        UnitCommands::List { course, instructor } => {
            let units = svc
                .list_units(*course, *instructor, ctx.limit(flags))
                .await?;
            output(&units, flags.format)
        }
        UnitCommands::Update {
            id,
            title,
            overview,
            clear_overview,
            instructor,
            active,
        } => {
            let mut builder = UnitUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title);
            }
            if let Some(overview) = overview {
                builder = builder.overview(Some(overview.clone()));
            } else if *clear_overview {
                builder = builder.overview(None);
            }
            if let Some(instructor) = instructor {
                builder = builder.instructor_id(*instructor);
            }
            if let Some(active) = active {
                builder = builder.is_active(*active);
            }
            output(&svc.update_unit(*id, builder.build()).await?, flags.format)
        }
        UnitCommands::Activate { id } => output(&svc.set_unit_active(*id, true).await?, flags.format),
        UnitCommands::Deactivate { id } => {
            output(&svc.set_unit_active(*id, false).await?, flags.format)
        }
        UnitCommands::Delete { id } => {
            svc.delete_unit(*id).await?;
            output(&json!({ "deleted": true, "id": id }), flags.format)
        }
    }
}
