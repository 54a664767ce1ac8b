use clap::Subcommand;

/// Assignment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AssignmentCommands {
    /// Create an assignment in a unit.
    Create {
        #[arg(long)]
        unit: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// RFC 3339 timestamp or YYYY-MM-DD (end of day, UTC)
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        file_path: Option<String>,
    },
    /// Get an assignment by ID.
    Get { id: i64 },
    /// List a unit's active assignments.
    List {
        #[arg(long)]
        unit: i64,
    },
    /// Update an assignment.
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        due: Option<String>,
        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
        #[arg(long)]
        file_path: Option<String>,
    },
    /// Flip an assignment between active and inactive.
    Toggle { id: i64 },
    /// Delete an assignment and its submissions.
    Delete { id: i64 },
}
