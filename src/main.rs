use chrono::Datelike;
use clap::Parser;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use timeprogress::clock::{Clock, FixedClock, SystemClock, parse_instant};
use timeprogress::preferences::{
    self, Preferences, PreferencesError, load_preferences, save_preferences, validate_birth_year,
};
use timeprogress::progress::{DEFAULT_LIFE_EXPECTANCY, Instant, LifeSettings};
use timeprogress::ui::{modern, pipe};
use tracing_subscriber::EnvFilter;

const BIRTH_YEAR_ENV: &str = "TIMEPROGRESS_BIRTH_YEAR";

/// Application configuration from CLI
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Config {
    /// Print progress lines to stdout instead of the full-screen UI
    #[arg(long)]
    pipe: bool,
    /// With --pipe, print one JSON object per update
    #[arg(long, requires = "pipe")]
    json: bool,
    /// With --pipe, print a single snapshot and exit
    #[arg(long, requires = "pipe")]
    once: bool,
    /// Birth year for life progress; saved for later runs.
    /// Falls back to the saved value, then the TIMEPROGRESS_BIRTH_YEAR env var.
    #[arg(long, value_name = "YEAR")]
    birth_year: Option<i32>,
    /// Assumed lifespan in years
    #[arg(
        long,
        value_name = "YEARS",
        default_value_t = DEFAULT_LIFE_EXPECTANCY,
        value_parser = clap::value_parser!(u32).range(1..=150)
    )]
    life_expectancy: u32,
    /// Path to the preferences file (defaults to the user config dir)
    #[arg(long, value_name = "PATH")]
    prefs: Option<PathBuf>,
    /// Refresh interval in milliseconds
    #[arg(
        long,
        value_name = "MS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(50..)
    )]
    interval_ms: u64,
    /// Freeze the clock at a local instant (YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD)
    #[arg(long, value_name = "INSTANT", value_parser = parse_instant)]
    at: Option<Instant>,
    /// Enable debug logging to stderr
    #[arg(long)]
    pub debug_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipe: false,
            json: false,
            once: false,
            birth_year: None,
            life_expectancy: DEFAULT_LIFE_EXPECTANCY,
            prefs: None,
            interval_ms: 1000,
            at: None,
            debug_log: false,
        }
    }
}

fn init_tracing(debug_log: bool) {
    let default_level = if debug_log { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Pick the birth year to use: CLI first, then the saved value, then the env var.
///
/// A CLI value outside `1900..=current_year` is an error; a bad saved or env
/// value is logged and skipped.
fn resolve_birth_year(
    cli: Option<i32>,
    stored: Option<i32>,
    env: Option<String>,
    current_year: i32,
) -> Result<Option<i32>, PreferencesError> {
    if let Some(year) = cli {
        return validate_birth_year(year, current_year).map(Some);
    }
    if let Some(year) = stored {
        match validate_birth_year(year, current_year) {
            Ok(year) => return Ok(Some(year)),
            Err(e) => tracing::warn!(error = %e, "Ignoring saved birth year"),
        }
    }
    if let Some(raw) = env.filter(|s| !s.trim().is_empty()) {
        match preferences::parse_birth_year(&raw, current_year) {
            Ok(year) => return Ok(Some(year)),
            Err(e) => tracing::warn!(error = %e, var = BIRTH_YEAR_ENV, "Ignoring birth year from env"),
        }
    }
    Ok(None)
}

async fn life_settings(
    cfg: &Config,
    prefs_path: Option<&Path>,
    current_year: i32,
) -> Result<LifeSettings, PreferencesError> {
    let stored = match prefs_path {
        Some(path) => load_preferences(path).await,
        None => Preferences::default(),
    };
    let birth_year = resolve_birth_year(
        cfg.birth_year,
        stored.birth_year,
        std::env::var(BIRTH_YEAR_ENV).ok(),
        current_year,
    )?;

    if let (Some(year), Some(path)) = (cfg.birth_year, prefs_path)
        && stored.birth_year != Some(year)
    {
        let prefs = Preferences {
            birth_year: Some(year),
        };
        if let Err(e) = save_preferences(&prefs, path).await {
            tracing::warn!(path = %path.display(), error = %e, "Failed to save preferences");
        }
    }

    Ok(LifeSettings {
        birth_year,
        life_expectancy_years: cfg.life_expectancy,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cfg = Config::parse();
    init_tracing(cfg.debug_log);

    let clock: Arc<dyn Clock> = match cfg.at {
        Some(at) => Arc::new(FixedClock::new(at)),
        None => Arc::new(SystemClock),
    };
    let current_year = clock.now().year();
    let prefs_path = cfg
        .prefs
        .clone()
        .or_else(preferences::default_preferences_path);
    if prefs_path.is_none() {
        tracing::warn!("No config directory found; birth year will not be saved");
    }
    let poll_interval = Duration::from_millis(cfg.interval_ms);

    let result = match life_settings(&cfg, prefs_path.as_deref(), current_year).await {
        Ok(settings) if cfg.pipe => {
            let options = pipe::PipeOptions {
                json: cfg.json,
                once: cfg.once,
            };
            pipe::display_progress_pipe(settings, clock, poll_interval, options).await
        }
        Ok(settings) => {
            modern::display_progress_modern(settings, clock, poll_interval, prefs_path).await
        }
        Err(e) => Err(e.into()),
    };

    // Print error if any, for better diagnostics
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_all_flags() {
        let cfg = Config::try_parse_from([
            "timeprogress",
            "--pipe",
            "--json",
            "--once",
            "--birth-year",
            "1990",
            "--life-expectancy",
            "90",
            "--interval-ms",
            "250",
            "--at",
            "2024-06-15T12:00:00",
        ])
        .unwrap();
        assert!(cfg.pipe && cfg.json && cfg.once);
        assert_eq!(cfg.birth_year, Some(1990));
        assert_eq!(cfg.life_expectancy, 90);
        assert_eq!(cfg.interval_ms, 250);
        assert_eq!(cfg.at, parse_instant("2024-06-15T12:00:00").ok());
    }

    #[test]
    fn cli_defaults_match_default_impl() {
        let cfg = Config::try_parse_from(["timeprogress"]).unwrap();
        let default = Config::default();
        assert_eq!(cfg.life_expectancy, default.life_expectancy);
        assert_eq!(cfg.interval_ms, default.interval_ms);
        assert!(!cfg.pipe);
    }

    #[test]
    fn cli_rejects_bad_values() {
        assert!(Config::try_parse_from(["timeprogress", "--json"]).is_err());
        assert!(Config::try_parse_from(["timeprogress", "--life-expectancy", "0"]).is_err());
        assert!(Config::try_parse_from(["timeprogress", "--interval-ms", "10"]).is_err());
        assert!(Config::try_parse_from(["timeprogress", "--at", "noon"]).is_err());
    }

    #[test]
    fn birth_year_precedence() {
        assert_eq!(
            resolve_birth_year(Some(1990), Some(1980), Some("1970".into()), 2024).unwrap(),
            Some(1990)
        );
        assert_eq!(
            resolve_birth_year(None, Some(1980), Some("1970".into()), 2024).unwrap(),
            Some(1980)
        );
        assert_eq!(
            resolve_birth_year(None, None, Some(" 1970 ".into()), 2024).unwrap(),
            Some(1970)
        );
        assert_eq!(resolve_birth_year(None, None, None, 2024).unwrap(), None);
    }

    #[test]
    fn invalid_cli_birth_year_is_an_error() {
        assert!(resolve_birth_year(Some(1850), None, None, 2024).is_err());
        assert!(resolve_birth_year(Some(2030), None, None, 2024).is_err());
    }

    #[test]
    fn bad_saved_or_env_year_falls_through() {
        assert_eq!(
            resolve_birth_year(None, Some(1700), Some("1985".into()), 2024).unwrap(),
            Some(1985)
        );
        assert_eq!(
            resolve_birth_year(None, None, Some("soon".into()), 2024).unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn cli_birth_year_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let cfg = Config {
            birth_year: Some(1990),
            ..Config::default()
        };
        let settings = life_settings(&cfg, Some(&path), 2024).await.unwrap();
        assert_eq!(settings.birth_year, Some(1990));
        assert_eq!(settings.life_expectancy_years, DEFAULT_LIFE_EXPECTANCY);
        assert_eq!(load_preferences(&path).await.birth_year, Some(1990));
    }

    #[tokio::test]
    async fn saved_birth_year_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        save_preferences(
            &Preferences {
                birth_year: Some(1975),
            },
            &path,
        )
        .await
        .unwrap();
        let settings = life_settings(&Config::default(), Some(&path), 2024)
            .await
            .unwrap();
        assert_eq!(settings.birth_year, Some(1975));
    }
}
