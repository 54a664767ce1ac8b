use clap::Subcommand;

/// Answer commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AnswerCommands {
    /// Answer a question.
    Create {
        #[arg(long)]
        question: i64,
        #[arg(long)]
        author: i64,
        #[arg(long)]
        body: String,
    },
    /// Get an answer by ID.
    Get { id: i64 },
    /// List a question's answers, newest first.
    List {
        #[arg(long)]
        question: i64,
    },
    /// Edit an answer (author only).
    Update {
        id: i64,
        #[arg(long)]
        author: i64,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        best: Option<bool>,
    },
    /// Delete an answer and its votes (author only).
    Delete {
        id: i64,
        #[arg(long)]
        author: i64,
    },
}
