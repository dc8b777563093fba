// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;

/// Validate configuration and report the effective settings.
pub fn run_validate(config: &Config) -> Result<()> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    log::info!("Config OK");
    log::info!("    Badge service: {}", config.fetch.base_url);
    log::info!(
        "    Retries: {} x {}ms (timeout {}s)",
        config.fetch.retries,
        config.fetch.retry_delay_ms,
        config.fetch.timeout_secs
    );
    log::info!(
        "    History: {} entries max, {:?} on malformed state",
        config.history.max_entries,
        config.history.on_malformed
    );

    Ok(())
}
