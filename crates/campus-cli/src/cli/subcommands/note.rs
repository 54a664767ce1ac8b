use clap::Subcommand;

/// Note commands.
#[derive(Clone, Debug, Subcommand)]
pub enum NoteCommands {
    /// Attach a note to a unit.
    Create {
        #[arg(long)]
        unit: i64,
        #[arg(long)]
        uploaded_by: Option<i64>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        file_path: Option<String>,
    },
    /// Get a note by ID.
    Get { id: i64 },
    /// List notes in a unit, newest first.
    List {
        #[arg(long)]
        unit: i64,
    },
    /// Replace a note's content or file, or move it.
    Update {
        id: i64,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        file_path: Option<String>,
        #[arg(long)]
        unit: Option<i64>,
        #[arg(long)]
        uploaded_by: Option<i64>,
    },
    /// Mark a note active.
    Activate { id: i64 },
    /// Mark a note inactive.
    Deactivate { id: i64 },
    /// Delete a note and its flashcards.
    Delete { id: i64 },
}
