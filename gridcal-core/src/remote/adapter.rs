//! Mapping between backend rows and [`CalendarEvent`].
//!
//! The backend table is owned elsewhere and its rows are booking-shaped:
//! `id`, `product`, `summary`, `start_time`, `meeting_link`, `team_member`.
//! This is the only place that knows about those column names.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value, json};

use crate::date::{format_date, local_date_of, local_midnight_utc};
use crate::error::{GridcalError, GridcalResult};
use crate::event::{CalendarEvent, EventKind};

const UNTITLED: &str = "Untitled";

/// Map one backend row into a record.
pub fn row_to_event(row: &Value) -> GridcalResult<CalendarEvent> {
    let obj = row
        .as_object()
        .ok_or_else(|| GridcalError::Serialization("row is not an object".into()))?;

    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(GridcalError::Serialization("row has no id".into())),
    };

    let start = text(obj, "start_time")
        .ok_or_else(|| GridcalError::Serialization(format!("row {} has no start_time", id)))?;
    let date = row_date(start).ok_or_else(|| {
        GridcalError::Serialization(format!("row {} has invalid start_time '{}'", id, start))
    })?;

    let title = text(obj, "product").unwrap_or(UNTITLED).to_string();
    let description = text(obj, "summary").unwrap_or_default().to_string();
    let meeting_link = text(obj, "meeting_link").map(str::to_string);

    let kind = text(obj, "kind")
        .and_then(|k| k.parse().ok())
        .unwrap_or(if meeting_link.is_some() {
            EventKind::Appointment
        } else {
            EventKind::Event
        });

    Ok(CalendarEvent {
        id,
        title,
        description,
        date: format_date(date),
        kind,
        meeting_link,
    })
}

/// Map every row that can be mapped; malformed rows are logged and skipped.
pub fn rows_to_events(rows: &[Value]) -> Vec<CalendarEvent> {
    rows.iter()
        .filter_map(|row| match row_to_event(row) {
            Ok(event) => Some(event),
            Err(e) => {
                log::warn!("skipping backend row: {}", e);
                None
            }
        })
        .collect()
}

/// Build the insert body for a record. The backend assigns the id.
pub fn event_to_row(event: &CalendarEvent, team_member: Option<&str>) -> GridcalResult<Value> {
    let date = event.naive_date()?;

    Ok(json!({
        "product": event.title,
        "summary": event.description,
        "start_time": local_midnight_utc(date).to_rfc3339(),
        "meeting_link": event.meeting_link,
        "team_member": team_member,
    }))
}

/// Non-empty, trimmed string column.
fn text<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Local calendar day of a backend timestamp.
///
/// Zoned timestamps are shifted into the local zone first. Timestamps without
/// an offset and bare dates are already local wall-clock values.
fn row_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(local_date_of(dt.with_timezone(&Utc)));
    }
    // Postgres renders timestamptz with a space and a short offset
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(local_date_of(dt.with_timezone(&Utc)));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::local_midnight_utc;

    #[test]
    fn maps_a_booking_row() {
        let start = local_midnight_utc(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
            + chrono::Duration::hours(9);
        let row = json!({
            "id": 42,
            "product": "Consultation",
            "summary": "Initial call",
            "start_time": start.to_rfc3339(),
            "meeting_link": "https://meet.example.com/abc",
            "team_member": "alice"
        });

        let event = row_to_event(&row).unwrap();
        assert_eq!(event.id, "42");
        assert_eq!(event.title, "Consultation");
        assert_eq!(event.description, "Initial call");
        assert_eq!(event.date, "2024-03-10");
        assert_eq!(event.kind, EventKind::Appointment);
        assert_eq!(event.meeting_link.as_deref(), Some("https://meet.example.com/abc"));
    }

    #[test]
    fn fills_missing_text_columns() {
        let row = json!({ "id": "abc", "start_time": "2024-03-10", "meeting_link": "" });

        let event = row_to_event(&row).unwrap();
        assert_eq!(event.title, "Untitled");
        assert_eq!(event.description, "");
        assert_eq!(event.meeting_link, None);
        assert_eq!(event.kind, EventKind::Event);
    }

    #[test]
    fn naive_timestamp_keeps_its_day() {
        let row = json!({ "id": 1, "start_time": "2024-03-10T23:30:00" });
        assert_eq!(row_to_event(&row).unwrap().date, "2024-03-10");
    }

    #[test]
    fn explicit_kind_column_wins() {
        let row = json!({ "id": 1, "start_time": "2024-03-10", "kind": "task" });
        assert_eq!(row_to_event(&row).unwrap().kind, EventKind::Task);
    }

    #[test]
    fn rejects_rows_without_id_or_date() {
        assert!(row_to_event(&json!({ "start_time": "2024-03-10" })).is_err());
        assert!(row_to_event(&json!({ "id": 1 })).is_err());
        assert!(row_to_event(&json!({ "id": 1, "start_time": "soon" })).is_err());
        assert!(row_to_event(&json!([1, 2])).is_err());
    }

    #[test]
    fn skips_malformed_rows() {
        let rows = vec![
            json!({ "id": 1, "product": "ok", "start_time": "2024-03-10" }),
            json!({ "product": "no id" }),
            json!({ "id": 2, "product": "also ok", "start_time": "2024-03-11" }),
        ];

        let titles: Vec<_> = rows_to_events(&rows).into_iter().map(|e| e.title).collect();
        assert_eq!(titles, ["ok", "also ok"]);
    }

    #[test]
    fn insert_row_round_trips_the_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let event = CalendarEvent::new("Standup", "daily", date)
            .with_meeting_link(Some("https://meet.example.com/x".into()));

        let mut row = event_to_row(&event, Some("alice")).unwrap();
        assert_eq!(row["product"], "Standup");
        assert_eq!(row["team_member"], "alice");
        assert!(row.get("id").is_none());

        row["id"] = json!(7);
        let mapped = row_to_event(&row).unwrap();
        assert_eq!(mapped.date, event.date);
        assert_eq!(mapped.title, event.title);
    }
}
