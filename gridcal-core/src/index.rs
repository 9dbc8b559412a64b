//! Date lookup over the event collection.

use chrono::NaiveDate;

use crate::date::format_date;
use crate::event::CalendarEvent;

/// Records whose date string equals `date` formatted as `YYYY-MM-DD`.
///
/// Both sides go through [`format_date`]; timestamps are never compared.
/// Insertion order is preserved.
pub fn events_for_date(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    let target = format_date(date);
    events.iter().filter(|e| e.date == target).collect()
}
