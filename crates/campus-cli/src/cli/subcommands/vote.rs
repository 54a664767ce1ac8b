use clap::Subcommand;

/// Vote ledger commands.
#[derive(Clone, Debug, Subcommand)]
pub enum VoteCommands {
    /// Cast a vote. Repeating the same vote removes it; the opposite vote switches it.
    Cast {
        #[arg(long)]
        user: i64,
        #[arg(long)]
        answer: i64,
        /// up or down
        #[arg(long = "type")]
        vote_type: String,
    },
    /// Remove a user's vote on an answer.
    Remove {
        #[arg(long)]
        user: i64,
        #[arg(long)]
        answer: i64,
    },
    /// Up/down counts and score for an answer.
    Tally { answer: i64 },
    /// Answers ranked by score.
    Top {
        /// Restrict to one question
        #[arg(long)]
        question: Option<i64>,
    },
}
