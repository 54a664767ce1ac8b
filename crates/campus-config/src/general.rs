use serde::{Deserialize, Serialize};

/// `[general]`: settings that apply to every command.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Rows returned by list commands when `--limit` is not given.
    #[serde(default = "GeneralConfig::fallback_limit")]
    pub default_limit: u32,
}

impl GeneralConfig {
    const fn fallback_limit() -> u32 {
        20
    }

    /// The requested limit, or `default_limit` when none (or zero) was asked for.
    #[must_use]
    pub fn limit(&self, requested: Option<u32>) -> u32 {
        requested
            .filter(|&n| n > 0)
            .unwrap_or(self.default_limit)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: Self::fallback_limit(),
        }
    }
}
