//! Where events are loaded from and saved to.

mod local;
mod remote;

pub use local::LocalRepository;
pub use remote::RemoteRepository;

use std::future::Future;

use crate::error::GridcalResult;
use crate::event::CalendarEvent;

/// Persistence for the event collection.
///
/// `load` runs once at startup. `insert` persists one new record and returns
/// it as stored (the backend may assign its own id). Nothing is retried.
pub trait EventRepository {
    fn load(&self) -> impl Future<Output = GridcalResult<Vec<CalendarEvent>>>;

    /// `existing` is the collection before the insert.
    fn insert(
        &self,
        event: CalendarEvent,
        existing: &[CalendarEvent],
    ) -> impl Future<Output = GridcalResult<CalendarEvent>>;
}
