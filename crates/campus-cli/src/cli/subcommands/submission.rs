use std::path::PathBuf;

use clap::Subcommand;

/// Submission commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SubmissionCommands {
    /// Submit an attempt (text, a file, or both).
    Submit {
        #[arg(long)]
        student: i64,
        #[arg(long)]
        assignment: i64,
        #[arg(long)]
        content: Option<String>,
        /// File to upload (pdf, docx, jpg, jpeg, png)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// A student's attempts at an assignment.
    List {
        #[arg(long)]
        assignment: i64,
        #[arg(long)]
        student: i64,
    },
    /// Every attempt at an assignment.
    All {
        #[arg(long)]
        assignment: i64,
    },
    /// Get a submission by ID.
    Get { id: i64 },
}
