//! Configuration and connectivity check.

use anyhow::Result;
use console::style;

use milan_infra::llm::test_provider_connection;
use milan_infra::secret::API_KEY_VARS;

use crate::state::AppState;

use super::chat::renderer::thinking_spinner;

/// Verify the API key resolves and the endpoint answers.
pub async fn check(state: &AppState, json: bool) -> Result<()> {
    let provider = state.provider();
    let key_found = provider.is_ok();

    let connection = match &provider {
        Ok(provider) => {
            let spinner = (!json).then(|| thinking_spinner("Contacting Gemini..."));
            let result = test_provider_connection(provider).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            Some(result)
        }
        Err(_) => None,
    };
    let connected = matches!(connection, Some(Ok(())));
    let error = match (&provider, &connection) {
        (Err(e), _) => Some(e.to_string()),
        (_, Some(Err(e))) => Some(e.to_string()),
        _ => None,
    };

    if json {
        let out = serde_json::json!({
            "data_dir": state.data_dir.display().to_string(),
            "model": state.config.model,
            "api_key_found": key_found,
            "connected": connected,
            "error": error,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let check_mark = |ok: bool| {
            if ok {
                format!("{}", style("✓").green())
            } else {
                format!("{}", style("✗").red())
            }
        };
        println!();
        println!("  {} Milan v{}", style("*").cyan().bold(), env!("CARGO_PKG_VERSION"));
        println!();
        println!("  {} API key ({})", check_mark(key_found), API_KEY_VARS.join(" or "));
        println!("  {} Gemini reachable with model {}", check_mark(connected), style(&state.config.model).dim());
        if let Some(error) = &error {
            println!();
            println!("  {}", style(error).red());
        }
        println!();
        println!("  {}  {}", style("Data dir:").bold(), state.data_dir.display());
        println!();
    }

    if connected {
        Ok(())
    } else {
        anyhow::bail!("check failed")
    }
}
