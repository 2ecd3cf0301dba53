use ratatui::style::{Color, Modifier, Style};

pub struct ProgressStyles {
    pub title: Style,
    pub subtitle: Style,
    pub clock: Style,
    pub year: Style,
    pub month: Style,
    pub week: Style,
    pub day: Style,
    pub life: Style,
    pub hint: Style,
    pub error: Style,
}

impl Default for ProgressStyles {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Indexed(63))
                .add_modifier(Modifier::BOLD),
            subtitle: Style::default().add_modifier(Modifier::DIM),
            clock: Style::default().add_modifier(Modifier::BOLD),
            year: Style::default().fg(Color::Indexed(63)),
            month: Style::default().fg(Color::Magenta),
            week: Style::default().fg(Color::Cyan),
            day: Style::default().fg(Color::Green),
            life: Style::default().fg(Color::Yellow),
            hint: Style::default()
                .add_modifier(Modifier::ITALIC | Modifier::DIM),
            error: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }
}
