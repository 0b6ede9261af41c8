//! Application state wiring configuration and services together.
//!
//! The theme service is generic over its store and probe; AppState pins it to
//! the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use milan_core::chat::conversation::RemoteConversation;
use milan_core::chat::session::SessionManager;
use milan_core::llm::box_provider::BoxLlmProvider;
use milan_core::persona::PersonaPromptBuilder;
use milan_core::service::theme::ThemeService;
use milan_infra::color_scheme::EnvColorSchemeProbe;
use milan_infra::config::load_app_config;
use milan_infra::filesystem::resolve_data_dir;
use milan_infra::llm::create_provider;
use milan_infra::preference::FilePreferenceStore;
use milan_infra::secret::resolve_api_key;
use milan_types::config::AppConfig;

pub type ConcreteThemeService = ThemeService<FilePreferenceStore, EnvColorSchemeProbe>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub theme_service: Arc<ConcreteThemeService>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load config from the resolved data directory. Does not touch the API key.
    pub async fn init(model_override: Option<String>) -> anyhow::Result<Self> {
        Self::init_in(resolve_data_dir(), model_override).await
    }

    pub async fn init_in(data_dir: PathBuf, model_override: Option<String>) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let mut config = load_app_config(&data_dir).await;
        if let Some(model) = model_override {
            config.model = model;
        }
        tracing::debug!(data_dir = %data_dir.display(), model = %config.model, "Configuration loaded");

        let theme_service = ThemeService::new(
            FilePreferenceStore::in_data_dir(&data_dir),
            EnvColorSchemeProbe,
            config.theme_storage_key.clone(),
        );

        Ok(Self {
            config,
            theme_service: Arc::new(theme_service),
            data_dir,
        })
    }

    /// Resolve the API key and build the provider. A missing key is fatal.
    pub fn provider(&self) -> anyhow::Result<BoxLlmProvider> {
        let api_key = resolve_api_key()?;
        Ok(create_provider(&self.config, api_key)?)
    }

    /// A fresh session for the default persona.
    pub fn new_session(&self, provider: BoxLlmProvider) -> SessionManager {
        let conversation = RemoteConversation::new(
            provider,
            self.config.model.clone(),
            self.config.generation.clone(),
        );
        SessionManager::new(
            conversation,
            PersonaPromptBuilder::build(),
            self.config.request_timeout(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milan_types::theme::{ResolvedTheme, ThemePreference};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_init_in_applies_model_override() {
        let dir = tempdir().unwrap();
        let state = AppState::init_in(dir.path().to_path_buf(), Some("gemini-2.5-flash".to_string()))
            .await
            .unwrap();
        assert_eq!(state.config.model, "gemini-2.5-flash");
        assert_eq!(state.config.request_timeout_secs, 60);
    }

    #[tokio::test]
    async fn test_theme_persists_in_data_dir() {
        let dir = tempdir().unwrap();
        let state = AppState::init_in(dir.path().to_path_buf(), None).await.unwrap();
        let resolved = state
            .theme_service
            .set_preference(ThemePreference::Light)
            .await
            .unwrap();
        assert_eq!(resolved, ResolvedTheme::Light);

        let reloaded = AppState::init_in(dir.path().to_path_buf(), None).await.unwrap();
        assert_eq!(
            reloaded.theme_service.load_preference().await,
            ThemePreference::Light
        );
        assert!(dir.path().join("preferences.json").exists());
    }
}
