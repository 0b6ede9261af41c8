//! Application configuration types for Milan.
//!
//! `AppConfig` represents the optional `config.toml` in the data directory.
//! All fields have sensible defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::llm::GenerationConfig;

/// Model used when neither the config file nor the CLI names one.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite-preview-02-05";

/// Storage key under which the theme preference is persisted.
pub const DEFAULT_THEME_STORAGE_KEY: &str = "app-theme";

/// Top-level configuration.
///
/// Loaded from `~/.milan/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model identifier passed to the provider.
    #[serde(default = "default_model")]
    pub model: String,

    /// Override for the provider base URL (proxies, tests).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Upper bound on a single request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Sampling parameters sent with every request.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Key used in the preference store for the theme.
    #[serde(default = "default_theme_storage_key")]
    pub theme_storage_key: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_theme_storage_key() -> String {
    DEFAULT_THEME_STORAGE_KEY.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            generation: GenerationConfig::default(),
            theme_storage_key: default_theme_storage_key(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.base_url.is_none());
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
        assert_eq!(config.generation, GenerationConfig::default());
        assert_eq!(config.theme_storage_key, "app-theme");
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_app_config_deserialize_with_values() {
        let toml_str = r#"
model = "gemini-2.5-flash"
base_url = "http://localhost:8080"
request_timeout_secs = 15

[generation]
temperature = 0.3
top_k = 20
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.request_timeout_secs, 15);
        assert!((config.generation.temperature - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.generation.top_k, 20);
        assert_eq!(config.generation.max_output_tokens, 2048);
    }
}
