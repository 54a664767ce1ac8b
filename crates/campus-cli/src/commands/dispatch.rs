use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Course { action } => commands::course::handle(&action, ctx, flags).await,
        Commands::Unit { action } => commands::unit::handle(&action, ctx, flags).await,
        Commands::Note { action } => commands::note::handle(&action, ctx, flags).await,
        Commands::Flashcard { action } => commands::flashcard::handle(&action, ctx, flags).await,
        Commands::Question { action } => commands::question::handle(&action, ctx, flags).await,
        Commands::Answer { action } => commands::answer::handle(&action, ctx, flags).await,
        Commands::Vote { action } => commands::vote::handle(&action, ctx, flags).await,
        Commands::Assignment { action } => commands::assignment::handle(&action, ctx, flags).await,
        Commands::Submission { action } => commands::submission::handle(&action, ctx, flags).await,
        Commands::Grade { action } => commands::grade::handle(&action, ctx, flags).await,
        Commands::Activity(args) => commands::activity::handle(&args, ctx, flags).await,
    }
}
