use campus_core::enums::UserRole;
use campus_db::updates::user::UserUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus user`.
pub async fn handle(action: &UserCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        UserCommands::Create {
            username,
            email,
            role,
            bio,
        } => {
            let role: UserRole = parse_enum(role, "role")?;
            let user = svc
                .create_user(username, email, role, bio.as_deref())
                .await?;
            output(&user, flags.format)
        }
        UserCommands::Get { id } => output(&svc.get_user(*id).await?, flags.format),
        UserCommands::List { role } => {
            let role = role
                .as_deref()
                .map(|value| parse_enum::<UserRole>(value, "role"))
                .transpose()?;
            let users = svc.list_users(role, ctx.limit(flags)).await?;
            output(&users, flags.format)
        }
        UserCommands::Update {
            id,
            email,
            role,
            bio,
            clear_bio,
            active,
        } => {
            let mut builder = UserUpdateBuilder::new();
            if let Some(email) = email {
                builder = builder.email(email);
            }
            if let Some(role) = role {
                builder = builder.role(parse_enum(role, "role")?);
            }
            if let Some(bio) = bio {
                builder = builder.bio(Some(bio.clone()));
            } else if *clear_bio {
                builder = builder.bio(None);
            }
            if let Some(active) = active {
                builder = builder.is_active(*active);
            }
            let user = svc.update_user(*id, builder.build()).await?;
            output(&user, flags.format)
        }
        UserCommands::Delete { id } => {
            svc.delete_user(*id).await?;
            output(&json!({ "deleted": true, "id": id }), flags.format)
        }
    }
}
