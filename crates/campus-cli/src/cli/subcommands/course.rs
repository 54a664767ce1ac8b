use clap::Subcommand;

/// Course commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CourseCommands {
    /// Create a course.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Get a course by ID.
    Get { id: i64 },
    /// List courses.
    List {
        /// Include inactive courses
        #[arg(long)]
        all: bool,
    },
    /// Update a course.
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Remove the description
        #[arg(long, conflicts_with = "description")]
        clear_description: bool,
    },
    /// Mark a course active.
    Activate { id: i64 },
    /// Mark a course inactive.
    Deactivate { id: i64 },
    /// Delete a course with its units.
    Delete { id: i64 },
}
