//! Month grid construction.
//!
//! A grid covers whole Sunday-first weeks: it starts on the Sunday on or
//! before the 1st and ends on the Saturday on or after the last day, so its
//! length is always a multiple of 7 (35 or 42 for most months, 28 for a
//! February that starts on Sunday in a common year).

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

use crate::date;
use crate::error::{GridcalError, GridcalResult};
use crate::month::MonthCursor;

pub const DAYS_PER_WEEK: usize = 7;

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One square of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
}

/// Build the grid for a year and zero-based month, marking `today`.
pub fn build_month_grid(
    year: i32,
    month0: u32,
    today: NaiveDate,
) -> GridcalResult<Vec<CalendarCell>> {
    let cursor = MonthCursor::new(year, month0)?;
    let out_of_range = || GridcalError::Validation(format!("Month {} out of range", cursor));

    let first = cursor.first_day().ok_or_else(out_of_range)?;
    let last = last_day_of_month(first);

    let leading = first.weekday().num_days_from_sunday() as i64;
    let trailing = 6 - last.weekday().num_days_from_sunday() as i64;

    let start = first
        .checked_sub_signed(Duration::days(leading))
        .ok_or_else(out_of_range)?;
    let end = last
        .checked_add_signed(Duration::days(trailing))
        .ok_or_else(out_of_range)?;

    let span = (end - start).num_days() as usize + 1;
    let cells = std::iter::successors(Some(start), |d| d.succ_opt())
        .take(span)
        .map(|d| CalendarCell {
            date: d,
            is_current_month: d.year() == first.year() && d.month() == first.month(),
            is_today: d == today,
        })
        .collect();

    Ok(cells)
}

/// Build the grid for a cursor, marking the host's local today.
pub fn month_grid(cursor: MonthCursor) -> GridcalResult<Vec<CalendarCell>> {
    build_month_grid(cursor.year, cursor.month0, date::today())
}

/// Split a grid into rows of seven cells.
pub fn weeks(cells: &[CalendarCell]) -> impl Iterator<Item = &[CalendarCell]> {
    cells.chunks(DAYS_PER_WEEK)
}

/// Last day of the month of `first`: the day before the next month's 1st.
fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
