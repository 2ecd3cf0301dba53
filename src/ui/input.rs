//! Birth-year entry line for the full-screen view.

use crate::preferences::parse_birth_year;
use crossterm::event::KeyCode;

const MAX_DIGITS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Editing,
    Cancelled,
    Submitted(i32),
}

/// Text being typed plus the last validation error, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BirthYearEntry {
    pub text: String,
    pub error: Option<String>,
}

impl BirthYearEntry {
    /// Start editing, prefilled with the year currently in use.
    pub fn new(initial: Option<i32>) -> Self {
        Self {
            text: initial.map(|y| y.to_string()).unwrap_or_default(),
            error: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, current_year: i32) -> EntryOutcome {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.text.len() < MAX_DIGITS {
                    self.text.push(c);
                }
                self.error = None;
                EntryOutcome::Editing
            }
            KeyCode::Backspace => {
                self.text.pop();
                self.error = None;
                EntryOutcome::Editing
            }
            KeyCode::Enter => match parse_birth_year(&self.text, current_year) {
                Ok(year) => EntryOutcome::Submitted(year),
                Err(e) => {
                    self.error = Some(e.to_string());
                    EntryOutcome::Editing
                }
            },
            KeyCode::Esc => EntryOutcome::Cancelled,
            _ => EntryOutcome::Editing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(entry: &mut BirthYearEntry, text: &str) {
        for c in text.chars() {
            entry.handle_key(KeyCode::Char(c), 2024);
        }
    }

    #[test]
    fn prefills_current_year() {
        assert_eq!(BirthYearEntry::new(Some(1990)).text, "1990");
        assert_eq!(BirthYearEntry::new(None).text, "");
    }

    #[test]
    fn accepts_only_four_digits() {
        let mut entry = BirthYearEntry::new(None);
        type_text(&mut entry, "19a90123");
        assert_eq!(entry.text, "1990");
        entry.handle_key(KeyCode::Backspace, 2024);
        assert_eq!(entry.text, "199");
    }

    #[test]
    fn submits_valid_year() {
        let mut entry = BirthYearEntry::new(None);
        type_text(&mut entry, "1985");
        assert_eq!(entry.handle_key(KeyCode::Enter, 2024), EntryOutcome::Submitted(1985));
    }

    #[test]
    fn keeps_editing_on_invalid_year() {
        let mut entry = BirthYearEntry::new(None);
        type_text(&mut entry, "2030");
        assert_eq!(entry.handle_key(KeyCode::Enter, 2024), EntryOutcome::Editing);
        assert!(entry.error.as_deref().unwrap_or_default().contains("between 1900 and 2024"));

        entry.handle_key(KeyCode::Backspace, 2024);
        assert_eq!(entry.error, None);
    }

    #[test]
    fn escape_cancels() {
        let mut entry = BirthYearEntry::new(Some(1990));
        assert_eq!(entry.handle_key(KeyCode::Esc, 2024), EntryOutcome::Cancelled);
    }
}
