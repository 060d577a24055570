//! # Datepick Utilities
//!
//! Pattern compilation, value parsing and user preferences shared by the
//! engine, the terminal UI and the command-line host.

use std::path::PathBuf;

use dirs_next::home_dir;

pub mod date_handling;
pub mod preferences;

pub use date_handling::{DatePattern, ParseError, parse_date_input};
pub use preferences::{PreferencesError, UserPreferences};

/// Expands a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    if trimmed == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\")) {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(trimmed)
}
