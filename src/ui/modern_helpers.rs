use crate::progress::{LifeReport, ProgressReport, Snapshot};
use crate::text_utils::{
    describe_life, describe_period, format_clock, format_long_date, format_percent,
};
use crate::ui::input::BirthYearEntry;
use crate::ui::styles::ProgressStyles;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

const TITLE: &str = "⏳ Year Progress";
const TAGLINE: &str = "Time is your most valuable asset. Spend it wisely.";
const GAUGE_HEIGHT: u16 = 3;

/// Everything the full-screen view draws from.
pub struct ViewModel<'a> {
    pub snapshot: Option<&'a Snapshot>,
    pub entry: Option<&'a BirthYearEntry>,
    pub status: Option<&'a str>,
}

/// Draw one frame: header, period gauges, life gauge or hint, footer.
pub fn render(frame: &mut Frame, view: &ViewModel, styles: &ProgressStyles) {
    let Some(snapshot) = view.snapshot else {
        let waiting = Paragraph::new(Line::from(Span::styled("Waiting for the clock...", styles.hint)))
            .alignment(Alignment::Center);
        frame.render_widget(waiting, frame.area());
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(GAUGE_HEIGHT), // Year
            Constraint::Length(GAUGE_HEIGHT), // Month
            Constraint::Length(GAUGE_HEIGHT), // Week
            Constraint::Length(GAUGE_HEIGHT), // Day
            Constraint::Length(GAUGE_HEIGHT), // Life
            Constraint::Min(0),
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], snapshot, styles);
    draw_period(frame, chunks[1], "Year", &snapshot.year, styles.year);
    draw_period(frame, chunks[2], "Month", &snapshot.month, styles.month);
    draw_period(frame, chunks[3], "Week", &snapshot.week, styles.week);
    draw_period(frame, chunks[4], "Day", &snapshot.day, styles.day);
    match &snapshot.life {
        Some(life) => draw_life(frame, chunks[5], life, styles),
        None => {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Press b and enter your birth year to see life progress",
                styles.hint,
            )))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Life "));
            frame.render_widget(hint, chunks[5]);
        }
    }
    draw_footer(frame, chunks[7], view, styles);
}

fn draw_header(frame: &mut Frame, area: Rect, snapshot: &Snapshot, styles: &ProgressStyles) {
    let lines = vec![
        Line::from(Span::styled(TITLE, styles.title)),
        Line::from(vec![
            Span::raw(format_long_date(&snapshot.at)),
            Span::raw("  "),
            Span::styled(format_clock(&snapshot.at), styles.clock),
        ]),
        Line::from(Span::styled(TAGLINE, styles.subtitle)),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_period(frame: &mut Frame, area: Rect, name: &str, report: &ProgressReport, style: Style) {
    let title = format!(" {} {} ", name, format_percent(report.fraction_percent));
    frame.render_widget(
        gauge(title, describe_period(report), report.fraction_percent, style),
        area,
    );
}

fn draw_life(frame: &mut Frame, area: Rect, life: &LifeReport, styles: &ProgressStyles) {
    let title = format!(
        " Life {} (born {}, {} year expectancy) ",
        format_percent(life.fraction_percent),
        life.birth_year,
        life.life_expectancy_years
    );
    frame.render_widget(
        gauge(title, describe_life(life), life.fraction_percent, styles.life),
        area,
    );
}

fn gauge<'a>(title: String, label: String, percent: f64, style: Style) -> Gauge<'a> {
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(style)
        .use_unicode(true)
        .ratio(gauge_ratio(percent))
        .label(label)
}

/// Gauge ratios must lie in 0.0..=1.0.
pub fn gauge_ratio(percent: f64) -> f64 {
    if percent.is_finite() {
        (percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &ViewModel, styles: &ProgressStyles) {
    let line = if let Some(entry) = view.entry {
        let mut spans = vec![
            Span::raw("Birth year: "),
            Span::styled(format!("{}_", entry.text), styles.clock),
            Span::styled("  Enter save • Esc cancel", styles.hint),
        ];
        if let Some(err) = &entry.error {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(err.clone(), styles.error));
        }
        Line::from(spans)
    } else if let Some(status) = view.status {
        Line::from(Span::styled(status.to_string(), styles.error))
    } else {
        Line::from(Span::styled("b birth year • q quit", styles.hint))
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::parse_instant;
    use crate::progress::{LifeSettings, snapshot_at};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(view: &ViewModel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let styles = ProgressStyles::default();
        terminal.draw(|f| render(f, view, &styles)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn snapshot(birth_year: Option<i32>) -> Snapshot {
        let at = parse_instant("2024-06-15T15:00:00").unwrap();
        snapshot_at(
            &at,
            &LifeSettings {
                birth_year,
                ..LifeSettings::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn ratio_is_clamped() {
        assert_eq!(gauge_ratio(50.0), 0.5);
        assert_eq!(gauge_ratio(120.0), 1.0);
        assert_eq!(gauge_ratio(-3.0), 0.0);
        assert_eq!(gauge_ratio(f64::NAN), 0.0);
    }

    #[test]
    fn waiting_screen_before_first_update() {
        let text = rendered(&ViewModel {
            snapshot: None,
            entry: None,
            status: None,
        });
        assert!(text.contains("Waiting for the clock..."));
    }

    #[test]
    fn renders_periods_and_life_hint() {
        let snap = snapshot(None);
        let text = rendered(&ViewModel {
            snapshot: Some(&snap),
            entry: None,
            status: None,
        });
        assert!(text.contains("Saturday, June 15, 2024"));
        assert!(text.contains("03:00:00 PM"));
        assert!(text.contains("Year 45.63%"));
        assert!(text.contains("Day 62.50%"));
        assert!(text.contains("9h 0m remaining today"));
        assert!(text.contains("Press b and enter your birth year"));
        assert!(text.contains("b birth year • q quit"));
    }

    #[test]
    fn renders_life_gauge_and_entry_line() {
        let snap = snapshot(Some(1990));
        let entry = BirthYearEntry {
            text: "19".to_string(),
            error: Some("not a year: \"19\"".to_string()),
        };
        let text = rendered(&ViewModel {
            snapshot: Some(&snap),
            entry: Some(&entry),
            status: None,
        });
        assert!(text.contains("Life 43.07%"));
        assert!(text.contains("Age 34"));
        assert!(text.contains("Birth year: 19_"));
        assert!(text.contains("not a year"));
    }
}
