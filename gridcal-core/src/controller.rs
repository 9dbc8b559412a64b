//! Top-level calendar state.
//!
//! The controller owns the displayed month, the selected date and the event
//! list. State changes only through its methods; a failed save leaves the
//! event list as it was and raises exactly one error notification.

use chrono::NaiveDate;

use crate::error::{GridcalError, GridcalResult};
use crate::event::{CalendarEvent, EventDraft};
use crate::grid::{CalendarCell, build_month_grid};
use crate::index::events_for_date;
use crate::month::MonthCursor;
use crate::notify::{Notification, Notifier};
use crate::repository::EventRepository;

pub struct CalendarController<R> {
    repository: R,
    notifier: Box<dyn Notifier>,
    today: NaiveDate,
    cursor: MonthCursor,
    selected_date: Option<NaiveDate>,
    events: Vec<CalendarEvent>,
}

impl<R: EventRepository> CalendarController<R> {
    /// Start on the month containing `today`, with no events loaded.
    pub fn new(repository: R, notifier: Box<dyn Notifier>, today: NaiveDate) -> Self {
        CalendarController {
            repository,
            notifier,
            today,
            cursor: MonthCursor::containing(today),
            selected_date: None,
            events: Vec::new(),
        }
    }

    /// Replace the event list with what the repository holds.
    pub async fn load(&mut self) -> GridcalResult<()> {
        match self.repository.load().await {
            Ok(events) => {
                self.events = events;
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("Could not load events", e.describe()));
                Err(e)
            }
        }
    }

    // NAVIGATION:

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn title(&self) -> String {
        self.cursor.title()
    }

    pub fn prev_month(&mut self) {
        self.cursor = self.cursor.prev();
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
    }

    pub fn go_to(&mut self, cursor: MonthCursor) {
        self.cursor = cursor;
    }

    pub fn grid(&self) -> GridcalResult<Vec<CalendarCell>> {
        build_month_grid(self.cursor.year, self.cursor.month0, self.today)
    }

    // SELECTION:

    /// Pick the date new records are created on.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn clear_selection(&mut self) {
        self.selected_date = None;
    }

    // EVENTS:

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn events_for(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        events_for_date(&self.events, date)
    }

    pub fn event(&self, id: &str) -> GridcalResult<&CalendarEvent> {
        self.events
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| GridcalError::EventNotFound(id.to_string()))
    }

    /// Create a record on the selected date and persist it.
    ///
    /// Validation errors are returned without touching state or notifying.
    pub async fn add_event(&mut self, draft: EventDraft) -> GridcalResult<CalendarEvent> {
        let date = self
            .selected_date
            .ok_or_else(|| GridcalError::Validation("Please select a date".into()))?;
        draft.validate()?;

        let kind = draft.kind;
        let candidate = draft.into_event(date);

        match self.repository.insert(candidate, &self.events).await {
            Ok(stored) => {
                self.events.push(stored.clone());
                self.selected_date = None;
                self.notifier
                    .notify(Notification::success(format!("Added {} \"{}\"", kind, stored.title)));
                Ok(stored)
            }
            Err(e) => {
                log::warn!("save failed: {}", e);
                self.notifier
                    .notify(Notification::error(format!("Failed to save {}", kind), e.describe()));
                Err(e)
            }
        }
    }
}
