use anyhow::Context;
use jobhuntr_config::HuntConfig;
use jobhuntr_db::service::HuntService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: HuntService,
}

impl AppContext {
    /// Open the configured database.
    pub async fn init(config: &HuntConfig) -> anyhow::Result<Self> {
        let service = HuntService::from_config(config)
            .await
            .context("failed to open jobhuntr database")?;
        tracing::debug!(
            timeout_ms = config.service.operation_timeout_ms,
            "jobhuntr context ready"
        );
        Ok(Self { service })
    }
}

/// Load layered configuration (with `.env`) and apply the `--db` override.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<HuntConfig> {
    let mut config = HuntConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(path) = &flags.db {
        config.database.path.clone_from(path);
    }
    Ok(config)
}
