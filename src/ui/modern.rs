//! Full-screen terminal view.
//!
//! The event loop uses `tokio::select!` to handle:
//! - Snapshots from the ticker (once per poll interval)
//! - User keyboard input (q/ESC to quit, b to enter a birth year)
//!
//! A submitted birth year is pushed to the ticker through the settings
//! channel and saved to the preferences file.

use crate::clock::Clock;
use crate::preferences::{Preferences, save_preferences};
use crate::progress::LifeSettings;
use crate::state::Update;
use crate::ticker;
use crate::ui::input::{BirthYearEntry, EntryOutcome};
use crate::ui::modern_helpers::{ViewModel, render};
use crate::ui::styles::ProgressStyles;
use chrono::Datelike;
use crossterm::{
    event::{Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// UI state for the full-screen view
#[derive(Debug, Default)]
pub struct ModernUIState {
    pub last_update: Option<Update>,
    pub settings: LifeSettings,
    /// Birth-year entry line, present while the user is typing
    pub entry: Option<BirthYearEntry>,
    /// Last non-fatal problem worth showing (e.g. preferences not saved)
    pub status: Option<String>,
    pub should_exit: bool,
}

impl ModernUIState {
    pub fn new(settings: LifeSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    fn view(&self) -> ViewModel<'_> {
        ViewModel {
            snapshot: self.last_update.as_ref().map(|u| &u.snapshot),
            entry: self.entry.as_ref(),
            status: self.status.as_deref(),
        }
    }
}

/// Display progress in full-screen TUI mode
pub async fn display_progress_modern(
    settings: LifeSettings,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    prefs_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (tx, mut rx) = mpsc::channel(32);
    let (_shutdown_tx, shutdown_rx) = mpsc::channel(1);
    let (settings_tx, settings_rx) = watch::channel(settings);
    tokio::spawn(ticker::listen(
        tx,
        poll_interval,
        shutdown_rx,
        settings_rx,
        clock.clone(),
    ));

    enable_raw_mode().map_err(to_boxed_err)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(to_boxed_err)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(to_boxed_err)?;
    let styles = ProgressStyles::default();
    let mut state = ModernUIState::new(settings);

    // Single background thread polls crossterm and forwards events to the
    // async loop; it exits once the receiver is gone.
    let (event_tx, mut event_rx) = mpsc::channel(32);
    thread::spawn(move || {
        loop {
            match crossterm::event::poll(Duration::from_millis(100)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(ev) => {
                        if event_tx.blocking_send(ev).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        // ignore and continue polling
                    }
                },
                Ok(false) => {
                    if event_tx.is_closed() {
                        break;
                    }
                }
                Err(_) => {
                    // on error, sleep a bit to avoid busy loop
                    thread::sleep(Duration::from_millis(100));
                }
            }
        }
    });

    let result = run_loop(
        &mut terminal,
        &mut state,
        &styles,
        &mut rx,
        &mut event_rx,
        &settings_tx,
        clock.as_ref(),
        prefs_path.as_deref(),
    )
    .await;

    // Always restore the terminal, even when the loop failed
    disable_raw_mode().map_err(to_boxed_err)?;
    execute!(io::stdout(), LeaveAlternateScreen).map_err(to_boxed_err)?;
    result
}

#[allow(clippy::too_many_arguments)]
async fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut ModernUIState,
    styles: &ProgressStyles,
    rx: &mut mpsc::Receiver<Update>,
    event_rx: &mut mpsc::Receiver<Event>,
    settings_tx: &watch::Sender<LifeSettings>,
    clock: &dyn Clock,
    prefs_path: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    while !state.should_exit {
        tokio::select! {
            biased;

            // User keyboard input
            maybe_event = event_rx.recv() => {
                let Some(event) = maybe_event else {
                    // Event channel closed -> exit gracefully
                    state.should_exit = true;
                    continue;
                };
                let current_year = clock.now().year();
                if let Some(birth_year) = process_event(event, state, current_year) {
                    apply_birth_year(birth_year, state, settings_tx, prefs_path).await;
                }
            }

            // Snapshots from the ticker
            update = rx.recv() => process_update(update, state),
        }
        draw(terminal, state, styles)?;
    }
    Ok(())
}

fn draw<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &ModernUIState,
    styles: &ProgressStyles,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    terminal
        .draw(|f| render(f, &state.view(), styles))
        .map_err(to_boxed_err)?;
    Ok(())
}

/// Keep only the newest snapshot; a closed channel ends the view.
fn process_update(update: Option<Update>, state: &mut ModernUIState) {
    match update {
        Some(update) => {
            let is_newer = state
                .last_update
                .as_ref()
                .is_none_or(|last| update.version > last.version);
            if is_newer {
                state.last_update = Some(update);
            }
        }
        None => state.should_exit = true,
    }
}

/// Handle user input events (keyboard).
///
/// Returns a birth year once the user submits a valid one.
fn process_event(event: Event, state: &mut ModernUIState, current_year: i32) -> Option<i32> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.should_exit = true;
        return None;
    }

    if let Some(entry) = state.entry.as_mut() {
        return match entry.handle_key(key.code, current_year) {
            EntryOutcome::Editing => None,
            EntryOutcome::Cancelled => {
                state.entry = None;
                None
            }
            EntryOutcome::Submitted(year) => {
                state.entry = None;
                Some(year)
            }
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_exit = true,
        KeyCode::Char('b') => {
            state.status = None;
            state.entry = Some(BirthYearEntry::new(state.settings.birth_year));
        }
        _ => {}
    }
    None
}

/// Push a new birth year to the ticker and persist it.
async fn apply_birth_year(
    birth_year: i32,
    state: &mut ModernUIState,
    settings_tx: &watch::Sender<LifeSettings>,
    prefs_path: Option<&std::path::Path>,
) {
    state.settings.birth_year = Some(birth_year);
    settings_tx.send_replace(state.settings);

    let Some(path) = prefs_path else {
        return;
    };
    let prefs = Preferences {
        birth_year: Some(birth_year),
    };
    if let Err(e) = save_preferences(&prefs, path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to save preferences");
        state.status = Some(format!("Birth year not saved: {}", e));
    }
}

fn to_boxed_err<E: std::error::Error + Send + Sync + 'static>(
    e: E,
) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(e)
}
