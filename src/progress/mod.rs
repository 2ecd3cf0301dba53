// progress/mod.rs - calendar arithmetic and elapsed-time reports
pub mod calculator;
pub mod calendar;
pub mod types;

pub use calculator::{
    compute_day_progress, compute_life_progress, compute_month_progress, compute_week_progress,
    compute_year_progress, periods_at, snapshot, snapshot_at,
};
pub use types::{
    DEFAULT_LIFE_EXPECTANCY, Detail, Instant, LifeReport, LifeSettings, ProgressError,
    ProgressReport, Snapshot,
};
