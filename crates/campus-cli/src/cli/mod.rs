use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `campus` binary.
#[derive(Debug, Parser)]
#[command(name = "campus", version, about = "Campus - learning management backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path (overrides `database.path` from config)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{SubmissionCommands, UnitCommands, VoteCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "campus", "--format", "table", "--limit", "10", "--verbose", "vote", "top",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Vote {
                action: VoteCommands::Top { question: None }
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["campus", "vote", "tally", "7", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Vote {
                action: VoteCommands::Tally { answer: 7 }
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["campus", "--format", "xml", "vote", "top"]).is_err());
    }

    #[test]
    fn vote_type_is_left_to_the_handler() {
        let cli = Cli::try_parse_from([
            "campus", "vote", "cast", "--user", "1", "--answer", "2", "--type", "sideways",
        ])
        .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Vote {
                action: VoteCommands::Cast { ref vote_type, .. }
            } if vote_type == "sideways"
        ));
    }

    #[test]
    fn unit_update_flags() {
        let cli = Cli::try_parse_from([
            "campus", "unit", "update", "4", "--title", "Redox", "--clear-overview", "--active",
            "false",
        ])
        .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Unit {
                action: UnitCommands::Update {
                    id: 4,
                    clear_overview: true,
                    active: Some(false),
                    ..
                }
            }
        ));

        assert!(
            Cli::try_parse_from([
                "campus", "unit", "update", "4", "--overview", "x", "--clear-overview",
            ])
            .is_err()
        );
    }

    #[test]
    fn submit_accepts_content_and_file() {
        let cli = Cli::try_parse_from([
            "campus",
            "submission",
            "submit",
            "--student",
            "5",
            "--assignment",
            "9",
            "--content",
            "see attached",
            "--file",
            "essay.pdf",
        ])
        .expect("cli should parse");

        let Commands::Submission {
            action:
                SubmissionCommands::Submit {
                    student,
                    assignment,
                    content,
                    file,
                },
        } = cli.command
        else {
            panic!("expected submission submit");
        };
        assert_eq!((student, assignment), (5, 9));
        assert_eq!(content.as_deref(), Some("see attached"));
        assert_eq!(file.as_deref(), Some(std::path::Path::new("essay.pdf")));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["campus", "--db", "/tmp/campus.db", "activity"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/campus.db"));
    }
}
