//! Calendar date helpers.
//!
//! Event dates are stored as `YYYY-MM-DD` strings holding the local calendar
//! day. Everything that produces or compares those strings goes through
//! [`format_date`], so two dates match exactly when their strings match.

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::error::{GridcalError, GridcalResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a calendar date as zero-padded `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a strict `YYYY-MM-DD` string.
pub fn parse_date(s: &str) -> GridcalResult<NaiveDate> {
    let trimmed = s.trim();
    // chrono accepts unpadded fields, stored dates are always 4-2-2
    if trimmed.len() != 10 {
        return Err(invalid_date(s));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid_date(s))
}

fn invalid_date(s: &str) -> GridcalError {
    GridcalError::Validation(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
}

/// Today's date in the host's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Local calendar day of a UTC timestamp.
pub fn local_date_of(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// Local midnight of a calendar day, as a UTC timestamp.
///
/// Falls back to UTC midnight when local midnight does not exist (DST gaps).
pub fn local_midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    midnight
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}
