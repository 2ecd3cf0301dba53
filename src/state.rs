// state.rs: State carried by the ticker and the snapshots it hands to views

use crate::clock::Clock;
use crate::progress::{self, LifeSettings, Snapshot};
use serde::Serialize;

/// Represents a UI update: one snapshot plus a version that grows on every send.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Update {
    pub snapshot: Snapshot,
    pub version: u64,
}

/// Holds the life settings the ticker computes with, plus versioning.
#[derive(Debug, Default)]
pub struct StateBundle {
    pub settings: LifeSettings,
    pub version: u64, // Incremented on every update produced
}

impl StateBundle {
    pub fn new(settings: LifeSettings) -> Self {
        Self {
            settings,
            version: 0,
        }
    }

    /// Returns true if the settings actually changed.
    pub fn update_settings(&mut self, settings: LifeSettings) -> bool {
        if self.settings == settings {
            return false;
        }
        self.settings = settings;
        true
    }

    /// Build the next update from one reading of `clock`.
    ///
    /// A life calculation failure is logged and the snapshot goes out
    /// without life progress; the period reports cannot fail.
    pub fn next_update(&mut self, clock: &dyn Clock) -> Update {
        let now = clock.now();
        let snapshot = match progress::snapshot_at(&now, &self.settings) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    birth_year = ?self.settings.birth_year,
                    life_expectancy = self.settings.life_expectancy_years,
                    "Life progress unavailable"
                );
                progress::periods_at(&now)
            }
        };
        self.version += 1;
        Update {
            snapshot,
            version: self.version,
        }
    }
}
