use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

/// A point in local wall-clock time.
///
/// No zone is attached: every calculation in this module is calendar
/// arithmetic on the host's local fields, so DST transitions never shift a
/// day boundary.
pub type Instant = NaiveDateTime;

/// Assumed lifespan in years when the caller does not supply one.
pub const DEFAULT_LIFE_EXPECTANCY: u32 = 80;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
    #[error("month index {0} is outside 0..=11")]
    InvalidMonth(u32),
    #[error("year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),
    #[error("life expectancy must be at least one year, got {0}")]
    InvalidLifeExpectancy(u32),
}

/// Unit-specific labels attached to a [`ProgressReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "period", rename_all = "snake_case")]
pub enum Detail {
    /// Whole hours and minutes left until local midnight.
    Day { hours_left: u32, minutes_left: u32 },
    Week {
        weekday: &'static str,
        week_of_year: u32,
        year: i32,
    },
    Month {
        /// 1-based month number.
        month: u32,
        name: &'static str,
        day: u32,
    },
    Year { day_of_year: u32, year: i32 },
}

/// Progress through one calendar period.
///
/// Units are minutes for the day and days for week, month and year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressReport {
    /// Elapsed share of the period, 0..=100.
    pub fraction_percent: f64,
    pub units_elapsed: u32,
    pub units_total: u32,
    pub units_remaining: u32,
    pub detail: Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LifeReport {
    /// Elapsed share of the assumed lifespan, clamped to 0..=100.
    pub fraction_percent: f64,
    /// Calendar-year difference, not anniversary aware.
    pub age_years: i32,
    pub years_remaining: u32,
    /// `years_remaining * 52`, a fixed approximation.
    pub weeks_remaining: u32,
    pub birth_year: i32,
    pub life_expectancy_years: u32,
}

/// Everything one refresh needs, computed from a single clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub at: Instant,
    pub year: ProgressReport,
    pub month: ProgressReport,
    pub week: ProgressReport,
    pub day: ProgressReport,
    pub life: Option<LifeReport>,
}

/// Life parameters owned by the caller and passed in on every calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeSettings {
    pub birth_year: Option<i32>,
    pub life_expectancy_years: u32,
}

impl Default for LifeSettings {
    fn default() -> Self {
        Self {
            birth_year: None,
            life_expectancy_years: DEFAULT_LIFE_EXPECTANCY,
        }
    }
}
