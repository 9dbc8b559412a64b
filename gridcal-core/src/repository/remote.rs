use crate::error::GridcalResult;
use crate::event::CalendarEvent;
use crate::remote::RestBackend;
use crate::remote::adapter::{event_to_row, row_to_event, rows_to_events};
use crate::repository::EventRepository;

/// Events stored in the hosted backend table.
pub struct RemoteRepository {
    backend: RestBackend,
    /// When set, only this member's rows are loaded and new rows are tagged with it.
    team_member: Option<String>,
}

impl RemoteRepository {
    pub fn new(backend: RestBackend, team_member: Option<String>) -> Self {
        RemoteRepository {
            backend,
            team_member,
        }
    }
}

impl EventRepository for RemoteRepository {
    async fn load(&self) -> GridcalResult<Vec<CalendarEvent>> {
        let rows = self.backend.select_rows(self.team_member.as_deref()).await?;
        let events = rows_to_events(&rows);
        log::debug!("loaded {} of {} backend rows", events.len(), rows.len());
        Ok(events)
    }

    async fn insert(
        &self,
        event: CalendarEvent,
        _existing: &[CalendarEvent],
    ) -> GridcalResult<CalendarEvent> {
        let row = event_to_row(&event, self.team_member.as_deref())?;
        let stored = self.backend.insert_row(&row).await?;
        let mut mapped = row_to_event(&stored)?;

        // Keep what the user typed if the table has no column for it
        mapped.kind = event.kind;
        mapped.date = event.date;
        Ok(mapped)
    }
}
