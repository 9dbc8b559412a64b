//! Terminal rendering for gridcal types.
//!
//! Extension traits that add colored output to gridcal-core types using
//! owo_colors.

use chrono::NaiveDate;
use gridcal_core::event::{CalendarEvent, EventKind};
use gridcal_core::grid::{CalendarCell, WEEKDAY_LABELS, weeks};
use gridcal_core::notify::{Notification, NotificationLevel, Notifier};
use owo_colors::OwoColorize;

/// Width of one grid column, including the separating space.
const CELL_WIDTH: usize = 14;

/// Event titles shown per cell before collapsing into "+N more".
const TITLES_PER_CELL: usize = 2;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventKind {
    fn render(&self) -> String {
        match self {
            EventKind::Event => "●".blue().to_string(),
            EventKind::Task => "✓".green().to_string(),
            EventKind::Appointment => "◆".magenta().to_string(),
        }
    }
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let mut line = format!("{} {}", self.kind.render(), self.title.bold());
        if !self.description.is_empty() {
            line.push_str(&format!(" {}", self.description.dimmed()));
        }
        line
    }
}

impl Render for Notification {
    fn render(&self) -> String {
        let title = match self.level {
            NotificationLevel::Success => self.title.green().to_string(),
            NotificationLevel::Error => self.title.red().to_string(),
        };
        match &self.description {
            Some(description) => format!("{}\n  {}", title, description.dimmed()),
            None => title,
        }
    }
}

/// Prints notifications to the terminal; errors go to stderr.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => println!("{}", notification.render()),
            NotificationLevel::Error => eprintln!("{}", notification.render()),
        }
    }
}

/// Render a month grid with up to two titles per day.
pub fn render_month<'a, F>(title: &str, cells: &[CalendarCell], events_for: F) -> String
where
    F: Fn(NaiveDate) -> Vec<&'a CalendarEvent>,
{
    let mut lines = Vec::new();
    let width = CELL_WIDTH * WEEKDAY_LABELS.len();

    lines.push(format!("{:^width$}", title, width = width).bold().to_string());
    lines.push(
        WEEKDAY_LABELS
            .iter()
            .map(|label| pad(label, CELL_WIDTH))
            .collect::<String>()
            .dimmed()
            .to_string(),
    );

    for week in weeks(cells) {
        let day_events: Vec<Vec<&CalendarEvent>> =
            week.iter().map(|c| events_for(c.date)).collect();

        lines.push(week.iter().map(render_day_number).collect());

        let rows = day_events.iter().map(|e| e.len()).max().unwrap_or(0).min(TITLES_PER_CELL + 1);
        for row in 0..rows {
            let line: String = day_events
                .iter()
                .zip(week)
                .map(|(events, cell)| render_cell_line(events, row, cell.is_current_month))
                .collect();
            lines.push(line.trim_end().to_string());
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn render_day_number(cell: &CalendarCell) -> String {
    let number = format!("{:>2}", cell.date.format("%-d"));
    let padded = pad(&number, CELL_WIDTH);
    if cell.is_today {
        // Only the digits are highlighted, the padding stays plain
        format!("{}{}", number.black().on_yellow(), &padded[number.len()..])
    } else if cell.is_current_month {
        padded.bold().to_string()
    } else {
        padded.dimmed().to_string()
    }
}

fn render_cell_line(events: &[&CalendarEvent], row: usize, current_month: bool) -> String {
    let text = if events.len() > TITLES_PER_CELL + 1 && row == TITLES_PER_CELL {
        format!("+{} more", events.len() - TITLES_PER_CELL)
    } else {
        match events.get(row) {
            Some(event) => truncate(&event.title, CELL_WIDTH - 2),
            None => String::new(),
        }
    };

    let padded = pad(&text, CELL_WIDTH);
    if current_month {
        padded.cyan().to_string()
    } else {
        padded.dimmed().to_string()
    }
}

/// Pad to a display width measured in chars.
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
