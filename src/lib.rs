//! Elapsed-time progress for the current day, week, month, year and an
//! assumed lifespan, plus the terminal views that display it.
//!
//! [`progress`] is the pure calculator; everything else is boundary code:
//! the [`clock`] it reads, the [`ticker`] that drives it once per interval,
//! saved [`preferences`], and the [`ui`] views.

pub mod clock;
pub mod preferences;
pub mod progress;
pub mod state;
pub mod text_utils;
pub mod ticker;
pub mod ui;
