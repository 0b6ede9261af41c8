//! Configuration loader for Milan.
//!
//! Reads `config.toml` from the data directory (`~/.milan/` in production)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use milan_types::config::AppConfig;

use crate::filesystem::config_path;

/// Shortest request timeout accepted from the config file.
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(mut config) => {
            config.request_timeout_secs = config.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS);
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}
