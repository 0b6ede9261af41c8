//! Theme preference types.
//!
//! The stored preference may defer to the host (`system`); the resolved
//! theme is always concrete.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-selected theme preference, persisted as a lowercase string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemePreference::Light => write!(f, "light"),
            ThemePreference::Dark => write!(f, "dark"),
            ThemePreference::System => write!(f, "system"),
        }
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            other => Err(format!("invalid theme: '{other}' (expected light, dark or system)")),
        }
    }
}

/// Concrete theme applied to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedTheme::Light => write!(f, "light"),
            ResolvedTheme::Dark => write!(f, "dark"),
        }
    }
}

impl ThemePreference {
    /// Resolve against the host's color-scheme preference.
    pub fn resolve(self, host_prefers_dark: bool) -> ResolvedTheme {
        match self {
            ThemePreference::Light => ResolvedTheme::Light,
            ThemePreference::Dark => ResolvedTheme::Dark,
            ThemePreference::System if host_prefers_dark => ResolvedTheme::Dark,
            ThemePreference::System => ResolvedTheme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_roundtrip() {
        for pref in [
            ThemePreference::Light,
            ThemePreference::Dark,
            ThemePreference::System,
        ] {
            let parsed: ThemePreference = pref.to_string().parse().unwrap();
            assert_eq!(pref, parsed);
        }
    }

    #[test]
    fn test_preference_parse_is_lenient_on_case() {
        assert_eq!(" Dark ".parse::<ThemePreference>().unwrap(), ThemePreference::Dark);
        assert!("sepia".parse::<ThemePreference>().is_err());
    }

    #[test]
    fn test_default_is_system() {
        assert_eq!(ThemePreference::default(), ThemePreference::System);
    }

    #[test]
    fn test_resolve() {
        assert_eq!(ThemePreference::Dark.resolve(false), ResolvedTheme::Dark);
        assert_eq!(ThemePreference::Light.resolve(true), ResolvedTheme::Light);
        assert_eq!(ThemePreference::System.resolve(true), ResolvedTheme::Dark);
        assert_eq!(ThemePreference::System.resolve(false), ResolvedTheme::Light);
    }
}
