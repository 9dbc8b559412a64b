//! Calendar records.
//!
//! Events, tasks and appointments share one shape and differ only by
//! [`EventKind`] and the optional meeting link.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{format_date, parse_date};
use crate::error::{GridcalError, GridcalResult};

/// Which creation flow produced a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Event,
    Task,
    Appointment,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Event, EventKind::Task, EventKind::Appointment];

    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Event => "event",
            EventKind::Task => "task",
            EventKind::Appointment => "appointment",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for EventKind {
    type Err = GridcalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "event" => Ok(EventKind::Event),
            "task" => Ok(EventKind::Task),
            "appointment" | "appt" => Ok(EventKind::Appointment),
            other => Err(GridcalError::Validation(format!(
                "Unknown kind '{}'. Expected event, task or appointment",
                other
            ))),
        }
    }
}

/// A calendar record as stored and displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Local calendar day, `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
}

impl CalendarEvent {
    /// Create a record for a local calendar day with a fresh id.
    pub fn new(title: impl Into<String>, description: impl Into<String>, date: NaiveDate) -> Self {
        CalendarEvent {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            date: format_date(date),
            kind: EventKind::Event,
            meeting_link: None,
        }
    }

    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_meeting_link(mut self, link: Option<String>) -> Self {
        self.meeting_link = link.filter(|l| !l.trim().is_empty());
        self
    }

    /// The stored date parsed back into a calendar day.
    pub fn naive_date(&self) -> GridcalResult<NaiveDate> {
        parse_date(&self.date)
    }
}

/// User input for a new record; the date comes from the current selection.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub kind: EventKind,
    pub meeting_link: Option<String>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        EventDraft {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> GridcalResult<()> {
        if self.title.trim().is_empty() {
            return Err(GridcalError::Validation("Title is required".into()));
        }
        Ok(())
    }

    /// Turn the draft into a record on `date`.
    pub fn into_event(self, date: NaiveDate) -> CalendarEvent {
        CalendarEvent::new(self.title.trim(), self.description.trim(), date)
            .with_kind(self.kind)
            .with_meeting_link(self.meeting_link)
    }
}
