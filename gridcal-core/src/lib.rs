//! Core of gridcal: a month-grid calendar.
//!
//! - [`grid`] builds Sunday-first month grids and [`index`] finds the records
//!   on a given day, both keyed on `YYYY-MM-DD` local dates from [`date`].
//! - [`repository`] persists records locally or in the hosted backend, whose
//!   rows are translated by [`remote::adapter`].
//! - [`controller`] owns the UI state; [`auth`] is the login gate.

pub mod auth;
pub mod config;
pub mod controller;
pub mod date;
pub mod error;
pub mod event;
pub mod grid;
pub mod index;
pub mod month;
pub mod notify;
pub mod remote;
pub mod repository;
pub mod store;

pub use controller::CalendarController;
pub use error::{GridcalError, GridcalResult};
pub use event::{CalendarEvent, EventDraft, EventKind};
pub use grid::CalendarCell;
pub use month::MonthCursor;
