//! Data directory layout.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MILAN_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `MILAN_DATA_DIR` environment variable
/// 2. `~/.milan`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".milan");
    }

    // Last resort: current directory
    PathBuf::from(".milan")
}

/// `{data_dir}/config.toml`
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// `{data_dir}/preferences.json`
pub fn preferences_path(data_dir: &Path) -> PathBuf {
    data_dir.join("preferences.json")
}
