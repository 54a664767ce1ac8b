use clap::Subcommand;

/// Flashcard commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FlashcardCommands {
    /// Add a flashcard to a note. Duplicate questions are skipped.
    Create {
        #[arg(long)]
        note: i64,
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
        /// Multiple-choice option (repeatable)
        #[arg(long = "option")]
        options: Vec<String>,
    },
    /// List a note's flashcards.
    List {
        #[arg(long)]
        note: i64,
    },
    /// Generate flashcards from a note's text with the completion service.
    Generate { note: i64 },
}
