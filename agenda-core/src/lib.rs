//! Core types for agenda.
//!
//! This crate holds everything below the command line:
//! - `event` and `store` for the persisted event collection
//! - `grid` and `placement` for week, month and year layouts
//! - `form` and `controller` for creating and editing events

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod form;
pub mod grid;
pub mod placement;
pub mod seed;
pub mod storage;
pub mod store;
pub mod zone;

pub use config::AgendaConfig;
pub use controller::{CalendarView, Modal, Notice};
pub use error::{AgendaError, AgendaResult};
pub use event::{Appointment, Event, EventId, EventKind, EventType, NewEvent, Webinar};
pub use form::{EventForm, FormError, FormIssue, FormMode, FormOutcome};
pub use grid::ViewMode;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::EventStore;
pub use zone::Zone;
