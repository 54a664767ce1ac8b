use clap::Subcommand;

/// Unit commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UnitCommands {
    /// Create a unit in a course.
    Create {
        #[arg(long)]
        course: i64,
        #[arg(long)]
        instructor: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        overview: Option<String>,
    },
    /// Get a unit by ID.
    Get { id: i64 },
    /// List units.
    List {
        #[arg(long)]
        course: Option<i64>,
        #[arg(long)]
        instructor: Option<i64>,
    },
    /// Update a unit.
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        overview: Option<String>,
        /// Remove the overview
        #[arg(long, conflicts_with = "overview")]
        clear_overview: bool,
        #[arg(long)]
        instructor: Option<i64>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Mark a unit active.
    Activate { id: i64 },
    /// Mark a unit inactive.
    Deactivate { id: i64 },
    /// Delete a unit.
    Delete { id: i64 },
}
