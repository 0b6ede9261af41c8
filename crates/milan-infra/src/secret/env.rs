//! Environment variable API key lookup.
//!
//! Key resolution order:
//! - `GEMINI_API_KEY`
//! - `VITE_GEMINI_API_KEY` (the name the web build used)
//!
//! A `.env` file in the working directory is loaded first; variables already
//! set in the process environment win over it.

use secrecy::SecretString;
use tracing::debug;

use milan_types::error::ConfigError;

/// Variables checked for the Gemini API key, highest priority first.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"];

/// Resolve the Gemini API key from the environment and `.env`.
///
/// A missing or blank key is a fatal [`ConfigError::MissingApiKey`].
pub fn resolve_api_key() -> Result<SecretString, ConfigError> {
    if let Ok(path) = dotenv::dotenv() {
        debug!(path = %path.display(), "Loaded .env");
    }
    resolve_api_key_with(|name| std::env::var(name).ok())
}

/// Resolve using an arbitrary lookup function.
pub fn resolve_api_key_with<F>(lookup: F) -> Result<SecretString, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_VARS
        .iter()
        .find_map(|name| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .inspect(|_| debug!(var = *name, "Using API key from environment"))
        })
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingApiKey(API_KEY_VARS[0].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_primary_var_wins() {
        let key = resolve_api_key_with(lookup(&[
            ("GEMINI_API_KEY", "primary"),
            ("VITE_GEMINI_API_KEY", "legacy"),
        ]))
        .unwrap();
        assert_eq!(key.expose_secret(), "primary");
    }

    #[test]
    fn test_legacy_var_is_fallback() {
        let key = resolve_api_key_with(lookup(&[("VITE_GEMINI_API_KEY", "legacy")])).unwrap();
        assert_eq!(key.expose_secret(), "legacy");
    }

    #[test]
    fn test_blank_value_is_missing() {
        let err = resolve_api_key_with(lookup(&[("GEMINI_API_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(var) if var == "GEMINI_API_KEY"));
    }

    #[test]
    fn test_no_vars_is_missing() {
        assert!(resolve_api_key_with(lookup(&[])).is_err());
    }
}
