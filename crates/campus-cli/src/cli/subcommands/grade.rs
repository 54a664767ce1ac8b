use clap::Subcommand;

/// Grade commands.
#[derive(Clone, Debug, Subcommand)]
pub enum GradeCommands {
    /// Grade a submission.
    Create {
        #[arg(long)]
        submission: i64,
        #[arg(long)]
        instructor: i64,
        #[arg(long)]
        score: f64,
        #[arg(long)]
        feedback: Option<String>,
    },
    /// The grade recorded for a submission.
    Get {
        #[arg(long)]
        submission: i64,
    },
    /// Grades given by an instructor.
    List {
        #[arg(long)]
        instructor: i64,
    },
    /// Update a grade.
    Update {
        id: i64,
        #[arg(long)]
        score: Option<f64>,
        #[arg(long)]
        feedback: Option<String>,
        /// Remove the feedback
        #[arg(long, conflicts_with = "feedback")]
        clear_feedback: bool,
    },
    /// Delete a grade.
    Delete { id: i64 },
    /// Ask the completion service for a suggested score and feedback.
    Suggest { submission: i64 },
}
