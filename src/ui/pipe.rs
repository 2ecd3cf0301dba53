use crate::clock::Clock;
use crate::progress::LifeSettings;
use crate::state::Update;
use crate::text_utils::summary_line;
use crate::ticker;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// How pipe mode writes each update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipeOptions {
    /// One JSON object per line instead of the compact summary
    pub json: bool,
    /// Print the first snapshot and return
    pub once: bool,
}

/// Display progress in pipe mode (stdout only, for scripting and status bars)
pub async fn display_progress_pipe(
    settings: LifeSettings,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    options: PipeOptions,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (tx, mut rx) = mpsc::channel(32);
    let (_shutdown_tx, shutdown_rx) = mpsc::channel(1);
    // Settings never change in pipe mode; the ticker keeps going once this sender drops.
    let (_settings_tx, settings_rx) = watch::channel(settings);
    tokio::spawn(ticker::listen(tx, poll_interval, shutdown_rx, settings_rx, clock));

    let mut stdout = io::stdout();
    while let Some(upd) = rx.recv().await {
        let line = format_update(&upd, options.json)?;
        match writeln!(stdout, "{}", line).and_then(|_| stdout.flush()) {
            Ok(()) => {}
            // Reader went away (e.g. `| head -1`); that's a normal end.
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => break,
            Err(e) => return Err(Box::new(e)),
        }
        if options.once {
            break;
        }
    }
    Ok(())
}

/// Render one update as a pipe-mode line.
pub fn format_update(upd: &Update, json: bool) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string(&upd.snapshot)
    } else {
        Ok(summary_line(&upd.snapshot))
    }
}
