// src/config/validate.rs

use anyhow::{anyhow, Result};

use crate::config::model::ConfigFile;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - the mirror-list URL is non-empty
/// - `result_count >= 1`
/// - `max_workers >= 1`
/// - both timeouts are at least one second
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    let mirror = &cfg.mirror;

    if mirror.url.trim().is_empty() {
        return Err(anyhow!("[mirror].url must not be empty"));
    }

    if mirror.result_count == 0 {
        return Err(anyhow!("[mirror].result_count must be >= 1 (got 0)"));
    }

    if mirror.max_workers == 0 {
        return Err(anyhow!("[mirror].max_workers must be >= 1 (got 0)"));
    }

    if mirror.fetch_timeout_secs == 0 {
        return Err(anyhow!("[mirror].fetch_timeout_secs must be >= 1 (got 0)"));
    }

    if mirror.probe_timeout_secs == 0 {
        return Err(anyhow!("[mirror].probe_timeout_secs must be >= 1 (got 0)"));
    }

    Ok(())
}
