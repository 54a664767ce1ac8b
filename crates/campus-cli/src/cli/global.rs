use clap::ValueEnum;

/// How command results are printed to stdout.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Aligned columns; nested values are shown as compact JSON.
    Table,
    /// Single-line JSON, for piping.
    Raw,
}

/// Flags accepted on every subcommand, detached from the parser.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
    pub quiet: bool,
    pub verbose: bool,
    pub db: Option<String>,
}

impl GlobalFlags {
    /// Default tracing filter when `CAMPUS_LOG` is unset. `--quiet` wins over `--verbose`.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, true) => "debug",
            (false, false) => "warn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(quiet: bool, verbose: bool) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            quiet,
            verbose,
            db: None,
        }
    }

    #[test]
    fn log_filter_follows_flags() {
        assert_eq!(flags(false, false).log_filter(), "warn");
        assert_eq!(flags(false, true).log_filter(), "debug");
        assert_eq!(flags(true, true).log_filter(), "error");
    }
}
