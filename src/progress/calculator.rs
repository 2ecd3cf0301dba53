//! Elapsed-time reports for the day, week, month, year and an assumed lifespan.
//!
//! Every function here is a pure function of its inputs. The current time
//! comes in either as an [`Instant`] or through an injected [`Clock`]; the
//! birth year is owned by the caller and passed in on every call.

use super::calendar::{
    DAYS_PER_WEEK, MINUTES_PER_DAY, SECONDS_PER_DAY, day_of_year, days_in_year, fraction_of_day,
    month_length_of, month_name, monday_based_weekday, week_of_year, weekday_name, year_start,
};
use super::types::{Detail, Instant, LifeReport, LifeSettings, ProgressError, ProgressReport, Snapshot};
use crate::clock::Clock;
use chrono::{Datelike, Timelike};

const WEEKS_PER_YEAR: u32 = 52;

/// Progress through the current day, counted in minutes.
pub fn compute_day_progress(instant: &Instant) -> ProgressReport {
    let (hour, minute, second) = (instant.hour(), instant.minute(), instant.second());
    let seconds = hour * 3600 + minute * 60 + second;
    let fraction_percent = f64::from(seconds) / f64::from(SECONDS_PER_DAY) * 100.0;

    let total_minutes = f64::from(hour * 60 + minute) + f64::from(second) / 60.0;
    let minutes_to_midnight = f64::from(MINUTES_PER_DAY) - total_minutes;

    ProgressReport {
        fraction_percent,
        units_elapsed: hour * 60 + minute,
        units_total: MINUTES_PER_DAY,
        units_remaining: minutes_to_midnight.floor() as u32,
        detail: Detail::Day {
            hours_left: (minutes_to_midnight / 60.0).floor() as u32,
            minutes_left: (minutes_to_midnight % 60.0).floor() as u32,
        },
    }
}

/// Progress through a Monday-start week, counted in days.
///
/// The remaining count excludes the current partial day.
pub fn compute_week_progress(instant: &Instant) -> ProgressReport {
    let days_elapsed = monday_based_weekday(instant);
    let fraction_percent =
        (f64::from(days_elapsed) + fraction_of_day(instant)) / f64::from(DAYS_PER_WEEK) * 100.0;

    ProgressReport {
        fraction_percent,
        units_elapsed: days_elapsed,
        units_total: DAYS_PER_WEEK,
        units_remaining: DAYS_PER_WEEK.saturating_sub(days_elapsed + 1),
        detail: Detail::Week {
            weekday: weekday_name(instant.weekday()),
            week_of_year: week_of_year(instant),
            year: instant.year(),
        },
    }
}

pub fn compute_month_progress(instant: &Instant) -> ProgressReport {
    let day = instant.day();
    let days_in_month = month_length_of(instant);
    let fraction_percent =
        (f64::from(day - 1) + fraction_of_day(instant)) / f64::from(days_in_month) * 100.0;

    ProgressReport {
        fraction_percent,
        units_elapsed: day,
        units_total: days_in_month,
        units_remaining: days_in_month - day,
        detail: Detail::Month {
            month: instant.month(),
            name: month_name(instant),
            day,
        },
    }
}

/// Progress through the year by whole days; the current day counts as elapsed.
pub fn compute_year_progress(instant: &Instant) -> ProgressReport {
    let day_of_year = day_of_year(instant);
    let days_in_year = days_in_year(instant.year());

    ProgressReport {
        fraction_percent: f64::from(day_of_year) / f64::from(days_in_year) * 100.0,
        units_elapsed: day_of_year,
        units_total: days_in_year,
        units_remaining: days_in_year - day_of_year,
        detail: Detail::Year {
            day_of_year,
            year: instant.year(),
        },
    }
}

/// Progress through a lifespan modelled as Jan 1 of `birth_year` to Jan 1 of
/// `birth_year + life_expectancy_years`, both at local midnight.
///
/// Birth-year plausibility is the caller's concern; only values that cannot
/// be placed on the calendar are rejected.
pub fn compute_life_progress(
    instant: &Instant,
    birth_year: i32,
    life_expectancy_years: u32,
) -> Result<LifeReport, ProgressError> {
    if life_expectancy_years == 0 {
        return Err(ProgressError::InvalidLifeExpectancy(life_expectancy_years));
    }
    let end_year = i32::try_from(life_expectancy_years)
        .ok()
        .and_then(|years| birth_year.checked_add(years))
        .ok_or(ProgressError::YearOutOfRange(birth_year))?;
    let start = year_start(birth_year)?;
    let end = year_start(end_year)?;

    let total = (end - start).num_milliseconds() as f64;
    let lived = (*instant - start).num_milliseconds() as f64;
    let fraction_percent = (lived / total * 100.0).clamp(0.0, 100.0);

    let age_years = instant.year() - birth_year;
    let years_remaining = (i64::from(life_expectancy_years) - i64::from(age_years)).max(0) as u32;

    Ok(LifeReport {
        fraction_percent,
        age_years,
        years_remaining,
        weeks_remaining: years_remaining.saturating_mul(WEEKS_PER_YEAR),
        birth_year,
        life_expectancy_years,
    })
}

/// Day, week, month and year reports for `instant`, without life progress.
pub fn periods_at(instant: &Instant) -> Snapshot {
    Snapshot {
        at: *instant,
        year: compute_year_progress(instant),
        month: compute_month_progress(instant),
        week: compute_week_progress(instant),
        day: compute_day_progress(instant),
        life: None,
    }
}

/// Full snapshot for `instant`, including life progress when a birth year is set.
pub fn snapshot_at(instant: &Instant, settings: &LifeSettings) -> Result<Snapshot, ProgressError> {
    let mut snapshot = periods_at(instant);
    if let Some(birth_year) = settings.birth_year {
        snapshot.life = Some(compute_life_progress(
            instant,
            birth_year,
            settings.life_expectancy_years,
        )?);
    }
    Ok(snapshot)
}

/// Read `clock` once and build a snapshot for that moment.
pub fn snapshot(clock: &dyn Clock, settings: &LifeSettings) -> Result<Snapshot, ProgressError> {
    snapshot_at(&clock.now(), settings)
}
