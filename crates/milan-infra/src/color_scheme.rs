//! Host color-scheme detection for terminals.

use milan_core::service::theme::ColorSchemeProbe;

/// Explicit override: `dark` or `light`.
pub const COLOR_SCHEME_ENV: &str = "MILAN_COLOR_SCHEME";

/// Reads the color-scheme hint from the process environment.
///
/// Checks `MILAN_COLOR_SCHEME` first, then the `COLORFGBG` convention
/// (`fg;bg`, where a background index of 0-6 or 8 is dark). Defaults to light.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvColorSchemeProbe;

impl ColorSchemeProbe for EnvColorSchemeProbe {
    fn prefers_dark(&self) -> bool {
        prefers_dark_from(
            std::env::var(COLOR_SCHEME_ENV).ok().as_deref(),
            std::env::var("COLORFGBG").ok().as_deref(),
        )
    }
}

/// Pure decision behind [`EnvColorSchemeProbe`].
pub fn prefers_dark_from(override_value: Option<&str>, colorfgbg: Option<&str>) -> bool {
    match override_value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("dark") => return true,
        Some("light") => return false,
        _ => {}
    }

    colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}
