use std::time::Duration;

use anyhow::Context;
use campus_ai::OpenAiClient;
use campus_config::CampusConfig;
use campus_db::service::CampusService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: CampusService,
    pub config: CampusConfig,
}

impl AppContext {
    /// Open the database named by `--db` or the config, with upload and
    /// journal directories from `[storage]`.
    pub async fn init(config: CampusConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let db_path = flags
            .db
            .clone()
            .unwrap_or_else(|| config.database.path.clone());
        let upload_dir = config.storage.upload_path();
        let journal_dir = config.storage.journal_path();

        tracing::debug!(db = %db_path, uploads = %upload_dir.display(), "opening campus database");
        let service = CampusService::new_local(&db_path, Some(upload_dir), journal_dir)
            .await
            .with_context(|| format!("failed to open database at {db_path}"))?;

        Ok(Self { service, config })
    }

    /// Build the completion client. Fails when no API key is configured.
    pub fn completion_client(&self) -> anyhow::Result<OpenAiClient> {
        let openai = self
            .config
            .require_openai()
            .context("AI features are unavailable")?;
        Ok(OpenAiClient::new(
            openai.api_key.clone(),
            openai.base_url.clone(),
            Duration::from_secs(openai.timeout_secs),
        )?)
    }

    /// `--limit`, or `[general].default_limit`.
    pub fn limit(&self, flags: &GlobalFlags) -> u32 {
        self.config.general.limit(flags.limit)
    }
}
