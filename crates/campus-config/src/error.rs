use thiserror::Error;

/// Failure to produce a usable [`crate::CampusConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape.
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    /// A feature was used whose section lacks its required values.
    #[error("[{section}] is not configured: {hint}")]
    MissingSection {
        section: &'static str,
        hint: &'static str,
    },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}
