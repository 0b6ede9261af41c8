//! Theme preference commands.

use anyhow::Result;
use console::style;
use dialoguer::Select;

use milan_types::theme::ThemePreference;

use crate::state::AppState;

const CHOICES: [ThemePreference; 3] = [
    ThemePreference::Light,
    ThemePreference::Dark,
    ThemePreference::System,
];

/// Show the stored preference and what it resolves to.
pub async fn show_theme(state: &AppState, json: bool) -> Result<()> {
    let preference = state.theme_service.load_preference().await;
    let resolved = preference.resolve(state.theme_service.host_prefers_dark());

    if json {
        let out = serde_json::json!({
            "preference": preference,
            "resolved": resolved,
            "host_prefers_dark": state.theme_service.host_prefers_dark(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {}  {}", style("Preference:").bold(), preference);
    println!("  {}    {}", style("Resolved:").bold(), style(resolved).cyan());
    println!();
    Ok(())
}

/// Persist a new preference. Prompts with a picker when no value is given.
pub async fn set_theme(state: &AppState, value: Option<&str>, json: bool) -> Result<()> {
    let preference = match value {
        Some(v) => v.parse::<ThemePreference>().map_err(|e| anyhow::anyhow!(e))?,
        None => {
            let current = state.theme_service.load_preference().await;
            let items: Vec<String> = CHOICES.iter().map(ToString::to_string).collect();
            let default = CHOICES.iter().position(|c| *c == current).unwrap_or(2);
            let selection = Select::new()
                .with_prompt("Theme")
                .items(&items)
                .default(default)
                .interact()?;
            CHOICES[selection]
        }
    };

    let resolved = state.theme_service.set_preference(preference).await?;

    if json {
        let out = serde_json::json!({
            "preference": preference,
            "resolved": resolved,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "\n  {} Theme set to {} ({})\n",
        style("*").cyan().bold(),
        style(preference).bold(),
        resolved
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_set_theme_with_value_persists() {
        let dir = tempdir().unwrap();
        let state = AppState::init_in(dir.path().to_path_buf(), None).await.unwrap();

        set_theme(&state, Some("dark"), true).await.unwrap();
        assert_eq!(
            state.theme_service.load_preference().await,
            ThemePreference::Dark
        );
    }

    #[tokio::test]
    async fn test_set_theme_rejects_unknown_value() {
        let dir = tempdir().unwrap();
        let state = AppState::init_in(dir.path().to_path_buf(), None).await.unwrap();

        assert!(set_theme(&state, Some("sepia"), true).await.is_err());
        assert_eq!(
            state.theme_service.load_preference().await,
            ThemePreference::System
        );
    }
}
