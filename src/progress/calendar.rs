//! Calendar helpers shared by the period calculations.
//!
//! Months are 0-based (January = 0) and weekdays are counted from Sunday
//! (Sunday = 0) unless a function says otherwise.

use super::types::{Instant, ProgressError};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};

pub const SECONDS_PER_DAY: u32 = 86_400;
pub const MINUTES_PER_DAY: u32 = 1_440;
pub const DAYS_PER_WEEK: u32 = 7;
const SECONDS_PER_WEEK: u32 = DAYS_PER_WEEK * SECONDS_PER_DAY;

/// Month lengths in a common year, indexed by 0-based month.
const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Calendar days in `month0` (0..=11) of `year`.
pub fn days_in_month(year: i32, month0: u32) -> Result<u32, ProgressError> {
    let common = MONTH_LENGTHS
        .get(month0 as usize)
        .copied()
        .ok_or(ProgressError::InvalidMonth(month0))?;
    Ok(leap_adjusted(year, month0 as usize, common))
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Length of the month `instant` falls in.
pub(crate) fn month_length_of(instant: &Instant) -> u32 {
    // chrono keeps month0 within 0..=11
    let month0 = instant.month0() as usize;
    leap_adjusted(instant.year(), month0, MONTH_LENGTHS[month0])
}

fn leap_adjusted(year: i32, month0: usize, common: u32) -> u32 {
    if month0 == 1 && is_leap_year(year) {
        common + 1
    } else {
        common
    }
}

/// 1-based ordinal of the instant's day: whole days elapsed since the
/// preceding December 31 at local midnight.
pub fn day_of_year(instant: &Instant) -> u32 {
    instant.ordinal()
}

/// Week number counted in fixed 7-day buckets from January 1.
///
/// This is `ceil(time since Jan 1 00:00 / 7 days)` and is not ISO-8601.
/// The first instant of the year still reports week 1.
pub fn week_of_year(instant: &Instant) -> u32 {
    let elapsed = instant.ordinal0() * SECONDS_PER_DAY + instant.num_seconds_from_midnight();
    let mut weeks = elapsed / SECONDS_PER_WEEK;
    if elapsed % SECONDS_PER_WEEK != 0 || instant.nanosecond() > 0 {
        weeks += 1;
    }
    weeks.max(1)
}

/// Weekday index with Monday = 0 .. Sunday = 6.
pub fn monday_based_weekday(instant: &Instant) -> u32 {
    instant.weekday().num_days_from_monday()
}

/// Share of the current day covered by whole hours and minutes, 0.0..1.0.
///
/// Seconds are deliberately ignored; week and month progress use this.
pub fn fraction_of_day(instant: &Instant) -> f64 {
    (f64::from(instant.hour()) + f64::from(instant.minute()) / 60.0) / 24.0
}

/// Local midnight on January 1 of `year`.
pub fn year_start(year: i32) -> Result<Instant, ProgressError> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or(ProgressError::YearOutOfRange(year))
}

pub fn month_name(instant: &Instant) -> &'static str {
    MONTH_NAMES[instant.month0() as usize]
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Instant {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .expect("valid test instant")
    }

    #[test]
    fn leap_years_follow_gregorian_rule() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn year_lengths() {
        for year in 1890..2110 {
            let days = days_in_year(year);
            assert!(days == 365 || days == 366, "{year}: {days}");
            assert_eq!(days == 366, is_leap_year(year));
        }
    }

    #[test]
    fn february_is_leap_aware() {
        assert_eq!(days_in_month(2024, 1), Ok(29));
        assert_eq!(days_in_month(2023, 1), Ok(28));
        assert_eq!(days_in_month(1900, 1), Ok(28));
        assert_eq!(days_in_month(2000, 1), Ok(29));
    }

    #[test]
    fn month_lengths_sum_to_year_length() {
        for year in [1900, 2000, 2023, 2024] {
            let total: u32 = (0..12).map(|m| days_in_month(year, m).unwrap()).sum();
            assert_eq!(total, days_in_year(year));
        }
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert_eq!(days_in_month(2024, 12), Err(ProgressError::InvalidMonth(12)));
    }

    #[test]
    fn month_length_of_matches_days_in_month() {
        assert_eq!(month_length_of(&at(2024, 2, 10, 0, 0, 0)), 29);
        assert_eq!(month_length_of(&at(2023, 4, 30, 12, 0, 0)), 30);
        assert_eq!(month_length_of(&at(2023, 12, 31, 23, 59, 59)), 31);
    }

    #[test]
    fn day_of_year_is_one_based() {
        assert_eq!(day_of_year(&at(2024, 1, 1, 0, 0, 0)), 1);
        assert_eq!(day_of_year(&at(2024, 12, 31, 23, 0, 0)), 366);
        assert_eq!(day_of_year(&at(2023, 12, 31, 0, 0, 0)), 365);
        assert_eq!(day_of_year(&at(2024, 3, 1, 8, 0, 0)), 61);
    }

    #[test]
    fn week_of_year_uses_seven_day_buckets() {
        assert_eq!(week_of_year(&at(2024, 1, 1, 0, 0, 0)), 1);
        assert_eq!(week_of_year(&at(2024, 1, 1, 0, 0, 1)), 1);
        assert_eq!(week_of_year(&at(2024, 1, 8, 0, 0, 0)), 1);
        assert_eq!(week_of_year(&at(2024, 1, 8, 0, 0, 1)), 2);
        assert_eq!(week_of_year(&at(2024, 12, 31, 12, 0, 0)), 53);
    }

    #[test]
    fn weekday_remap_starts_on_monday() {
        // 2024-06-10 was a Monday
        assert_eq!(monday_based_weekday(&at(2024, 6, 10, 9, 0, 0)), 0);
        assert_eq!(monday_based_weekday(&at(2024, 6, 16, 9, 0, 0)), 6);
    }

    #[test]
    fn fraction_of_day_ignores_seconds() {
        assert_eq!(fraction_of_day(&at(2024, 6, 10, 12, 0, 59)), 0.5);
        assert_eq!(fraction_of_day(&at(2024, 6, 10, 0, 0, 0)), 0.0);
    }

    #[test]
    fn names() {
        assert_eq!(month_name(&at(2024, 2, 1, 0, 0, 0)), "February");
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
    }
}
