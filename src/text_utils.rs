// src/text_utils.rs
// en-US formatting for percentages, dates and report details

use crate::progress::{Detail, Instant, LifeReport, ProgressReport, Snapshot};

/// Two decimals and a percent sign, e.g. `79.18%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Insert thousands separators: `2392` -> `2,392`.
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `03:07:09 PM`
pub fn format_clock(at: &Instant) -> String {
    at.format("%I:%M:%S %p").to_string()
}

/// `Saturday, June 15, 2024`
pub fn format_long_date(at: &Instant) -> String {
    at.format("%A, %B %-d, %Y").to_string()
}

/// One-line description of a period report.
pub fn describe_period(report: &ProgressReport) -> String {
    match report.detail {
        Detail::Day {
            hours_left,
            minutes_left,
        } => format!("{}h {}m remaining today", hours_left, minutes_left),
        Detail::Week {
            weekday,
            week_of_year,
            year,
        } => format!("{} • Week {} of {}", weekday, week_of_year, year),
        Detail::Month { name, day, .. } => format!(
            "{} {} of {} • {} days remaining",
            name, day, report.units_total, report.units_remaining
        ),
        Detail::Year { day_of_year, .. } => format!(
            "Day {} of {} • {} days remaining",
            day_of_year, report.units_total, report.units_remaining
        ),
    }
}

pub fn describe_life(report: &LifeReport) -> String {
    format!(
        "Age {} • ~{} years remaining ({} weeks)",
        report.age_years,
        report.years_remaining,
        group_thousands(report.weeks_remaining)
    )
}

/// Compact single line used by pipe mode:
/// `Y 45.36% | M 46.67% | W 76.79% | D 50.00%` with `| L ..` when known.
pub fn summary_line(snapshot: &Snapshot) -> String {
    let mut line = format!(
        "Y {} | M {} | W {} | D {}",
        format_percent(snapshot.year.fraction_percent),
        format_percent(snapshot.month.fraction_percent),
        format_percent(snapshot.week.fraction_percent),
        format_percent(snapshot.day.fraction_percent),
    );
    if let Some(life) = &snapshot.life {
        line.push_str(" | L ");
        line.push_str(&format_percent(life.fraction_percent));
    }
    line
}
