//! Error types for agenda.

use thiserror::Error;

use crate::event::EventId;
use crate::form::FormError;

/// Errors that can occur in agenda operations.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Invalid time '{0}'. Expected HH:MM or an RFC 3339 timestamp")]
    InvalidTime(String),

    #[error("Unknown time zone: {0}")]
    InvalidZone(String),

    #[error("No event form is open")]
    NoOpenForm,

    #[error("Invalid event: {0}")]
    Form(#[from] FormError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
