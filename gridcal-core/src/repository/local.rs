use crate::error::GridcalResult;
use crate::event::CalendarEvent;
use crate::repository::EventRepository;
use crate::store::KeyValueStore;

/// Storage key holding the whole event list.
pub const EVENTS_KEY: &str = "calendarEvents";

/// Events kept as one JSON list on this machine, rewritten on every change.
pub struct LocalRepository {
    store: KeyValueStore,
}

impl LocalRepository {
    pub fn new(store: KeyValueStore) -> Self {
        LocalRepository { store }
    }
}

impl EventRepository for LocalRepository {
    async fn load(&self) -> GridcalResult<Vec<CalendarEvent>> {
        let events: Vec<CalendarEvent> = self.store.get_json(EVENTS_KEY)?.unwrap_or_default();
        log::debug!("loaded {} local events", events.len());
        Ok(events)
    }

    async fn insert(
        &self,
        event: CalendarEvent,
        existing: &[CalendarEvent],
    ) -> GridcalResult<CalendarEvent> {
        let mut all = existing.to_vec();
        all.push(event.clone());
        self.store.set_json(EVENTS_KEY, &all)?;
        Ok(event)
    }
}
