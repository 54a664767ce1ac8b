use clap::Subcommand;

/// Forum question commands.
#[derive(Clone, Debug, Subcommand)]
pub enum QuestionCommands {
    /// Ask a question.
    Create {
        #[arg(long)]
        author: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Get a question with its answer count.
    Get { id: i64 },
    /// List questions.
    List {
        #[arg(long)]
        author: Option<i64>,
    },
    /// Edit a question (author only).
    Update {
        id: i64,
        #[arg(long)]
        author: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
    /// Delete a question (author only).
    Delete {
        id: i64,
        #[arg(long)]
        author: i64,
    },
}
