use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use datepick_types::{DateInput, PickerConfig, PresentationStrategy, Selection, SelectionMode};
use datepick_util::UserPreferences;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Pick a date, a time or both in the terminal and print the result.
#[derive(Debug, Parser)]
#[command(name = "datepick", version, about)]
struct Cli {
    /// What to select: date, time or datetime
    #[arg(short, long, default_value_t = SelectionMode::Date)]
    mode: SelectionMode,

    /// Initial value; bypasses --min/--max when set
    #[arg(long)]
    value: Option<String>,

    /// Earliest value used for the default
    #[arg(long)]
    min: Option<String>,

    /// Latest value used for the default
    #[arg(long)]
    max: Option<String>,

    /// Output pattern, e.g. "DD/MM/YYYY HH:mm"
    #[arg(short, long)]
    format: Option<String>,

    /// Locale identifier handed to the formatter
    #[arg(long)]
    locale: Option<String>,

    /// Text shown while no value is set
    #[arg(long)]
    placeholder: Option<String>,

    /// inline or modal
    #[arg(long)]
    presentation: Option<PresentationStrategy>,

    /// Length of the modal show/hide transition
    #[arg(long = "duration-ms")]
    transition_duration_ms: Option<u64>,

    /// Show a 12-hour clock in the time widget
    #[arg(long = "12-hour")]
    twelve_hour: bool,

    /// Render the control but refuse to open it
    #[arg(long)]
    disabled: bool,

    /// Leave the trigger line blank
    #[arg(long = "hide-text")]
    hide_text: bool,

    /// Print the selection as JSON
    #[arg(long)]
    json: bool,

    /// Preferences file to read instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let preferences = load_preferences(&cli);
    let config = build_config(&cli, &preferences);

    match datepick_tui::run(config).await.context("picker session failed")? {
        Some(selection) => {
            println!("{}", render_selection(&selection, cli.json)?);
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_preferences(cli: &Cli) -> UserPreferences {
    let loaded = match &cli.config {
        Some(path) => UserPreferences::from_path(path),
        None => UserPreferences::new(),
    };
    loaded.unwrap_or_else(|error| {
        warn!(%error, "preferences unavailable; using defaults");
        UserPreferences::ephemeral()
    })
}

/// Preferences first, then every flag given on the command line.
fn build_config(cli: &Cli, preferences: &UserPreferences) -> PickerConfig {
    let mut config = PickerConfig::new(cli.mode);
    config.format = cli.format.clone();
    preferences.apply_to(&mut config);

    config.value = cli.value.as_deref().map(DateInput::from);
    config.min = cli.min.as_deref().map(DateInput::from);
    config.max = cli.max.as_deref().map(DateInput::from);
    if let Some(locale) = &cli.locale {
        config.locale = locale.clone();
    }
    if let Some(placeholder) = &cli.placeholder {
        config.placeholder = placeholder.clone();
    }
    if let Some(presentation) = cli.presentation {
        config.presentation = presentation;
    }
    if let Some(duration) = cli.transition_duration_ms {
        config.transition_duration_ms = duration;
    }
    if cli.twelve_hour {
        config.is_24_hour = false;
    }
    config.disabled = cli.disabled;
    config.hide_text = cli.hide_text;
    config
}

fn render_selection(selection: &Selection, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string(selection).context("serialize selection");
    }
    Ok(selection.formatted.clone())
}
