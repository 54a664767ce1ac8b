use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Create a user.
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// student, instructor, or admin
        #[arg(long, default_value = "student")]
        role: String,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Get a user by ID.
    Get { id: i64 },
    /// List users.
    List {
        #[arg(long)]
        role: Option<String>,
    },
    /// Update a user.
    Update {
        id: i64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        /// Remove the bio
        #[arg(long, conflicts_with = "bio")]
        clear_bio: bool,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a user and everything they own.
    Delete { id: i64 },
}
