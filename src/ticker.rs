// ticker.rs: Fixed-cadence loop that reads the clock and sends snapshots to a view

use crate::clock::Clock;
use crate::progress::LifeSettings;
use crate::state::{StateBundle, Update};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::{Duration, MissedTickBehavior};

/// Reads `clock` every `poll_interval` and sends an [`Update`] per tick.
///
/// A change on `settings_rx` triggers an immediate recompute. The loop ends
/// when `shutdown_rx` fires or closes, or when the view drops its receiver.
pub async fn listen(
    update_tx: mpsc::Sender<Update>,
    poll_interval: Duration,
    mut shutdown_rx: mpsc::Receiver<()>,
    mut settings_rx: watch::Receiver<LifeSettings>,
    clock: Arc<dyn Clock>,
) {
    let mut bundle = StateBundle::new(*settings_rx.borrow_and_update());
    let mut interval = tokio::time::interval(poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut settings_open = true;

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            changed = settings_rx.changed(), if settings_open => {
                if changed.is_err() {
                    // Nobody can change the settings any more; keep ticking.
                    settings_open = false;
                    continue;
                }
                let settings = *settings_rx.borrow_and_update();
                if !bundle.update_settings(settings) {
                    continue;
                }
                tracing::debug!(birth_year = ?settings.birth_year, "Life settings changed");
            }
            _ = interval.tick() => {}
        }

        let update = bundle.next_update(clock.as_ref());
        if update_tx.send(update).await.is_err() {
            tracing::debug!("Update receiver closed, stopping ticker");
            break;
        }
    }
}
