use campus_db::repos::activity::ActivityFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ActivityArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus activity`.
pub async fn handle(args: &ActivityArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = ActivityFilter {
        entity_type: args
            .entity
            .as_deref()
            .map(|value| parse_enum(value, "entity"))
            .transpose()?,
        entity_id: args.id,
        action: args
            .action
            .as_deref()
            .map(|value| parse_enum(value, "action"))
            .transpose()?,
        limit: Some(ctx.limit(flags)),
    };
    let entries = ctx.service.query_activity(&filter).await?;
    output(&entries, flags.format)
}
