//! Theme styling for the picker UI.
//!
//! Ships the Nord palette in default and high-contrast variants plus helper
//! builders for Ratatui widgets and styles.

use std::env;

use tracing::debug;

pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use nord::{NordTheme, NordThemeHighContrast};
pub use roles::Theme;

/// Environment variable selecting the palette variant.
pub const THEME_ENV: &str = "DATEPICK_THEME";

/// Selects a theme from `DATEPICK_THEME`, defaulting to Nord.
pub fn load() -> Box<dyn Theme> {
    let requested = env::var(THEME_ENV).ok();
    resolve(requested.as_deref())
}

fn resolve(name: Option<&str>) -> Box<dyn Theme> {
    match name.map(|value| value.trim().to_ascii_lowercase()) {
        Some(value) if matches!(value.as_str(), "nord_high_contrast" | "nord-hc" | "high-contrast") => {
            Box::new(NordThemeHighContrast::new())
        }
        Some(value) if value != "nord" => {
            debug!(theme = %value, "unknown theme requested; using nord");
            Box::new(NordTheme::new())
        }
        _ => Box::new(NordTheme::new()),
    }
}
