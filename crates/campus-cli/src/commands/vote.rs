use crate::cli::GlobalFlags;
use crate::cli::subcommands::VoteCommands;
use crate::commands::shared::parse::parse_vote_type;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus vote`.
pub async fn handle(action: &VoteCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        VoteCommands::Cast {
            user,
            answer,
            vote_type,
        } => {
            let vote_type = parse_vote_type(vote_type)?;
            let result = svc.cast_vote(*user, *answer, vote_type).await?;
            output(&result, flags.format)
        }
        VoteCommands::Remove { user, answer } => {
            output(&svc.remove_vote(*user, *answer).await?, flags.format)
        }
        VoteCommands::Tally { answer } => output(&svc.tally(*answer).await?, flags.format),
        VoteCommands::Top { question } => {
            let mut ranked = svc.rank(*question).await?;
            let limit = usize::try_from(ctx.limit(flags)).unwrap_or(usize::MAX);
            ranked.answers.truncate(limit);
            output(&ranked, flags.format)
        }
    }
}
