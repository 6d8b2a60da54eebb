//! The persisted event collection.
//!
//! All events live in one storage slot as a versioned JSON document. The slot
//! is read once when the store is opened and rewritten on every mutation.

use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, AgendaResult};
use crate::event::{Event, EventId, NewEvent};
use crate::seed::seed_events;
use crate::storage::KeyValueStore;

/// Storage key holding the event collection.
pub const EVENTS_KEY: &str = "events";

/// Version written into the stored document.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEvents {
    version: u32,
    next_id: EventId,
    events: Vec<Event>,
}

/// Layouts accepted on read. The unversioned layout is a bare array of events.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLayout {
    Versioned(StoredEvents),
    Unversioned(Vec<Event>),
}

pub struct EventStore<S> {
    storage: S,
    events: Vec<Event>,
    next_id: EventId,
    open_failure: Option<String>,
}

impl<S: KeyValueStore> EventStore<S> {
    /// Open the store, falling back to the seed events if nothing usable is stored.
    pub fn open(storage: S) -> Self {
        Self::open_with_default(storage, seed_events())
    }

    /// Open the store with a custom fallback collection.
    ///
    /// Unreadable or corrupt data is never surfaced: the fallback is used and
    /// the stored slot is left alone until the next mutation overwrites it.
    pub fn open_with_default(mut storage: S, default: Vec<Event>) -> Self {
        let default_next = next_id_after(&default, EventId(1)).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "default events leave no free id");
            EventId(u64::MAX)
        });
        let mut open_failure = None;

        let loaded = match storage.get(EVENTS_KEY) {
            Ok(Some(raw)) => match decode(&raw) {
                Ok(stored) => Some(stored),
                Err(e) => {
                    tracing::warn!(error = %e, "stored events are unreadable, using defaults");
                    None
                }
            },
            Ok(None) => {
                tracing::info!("no stored events, writing defaults");
                let written =
                    encode(&default, default_next).and_then(|raw| storage.set(EVENTS_KEY, &raw));
                if let Err(e) = written {
                    tracing::warn!(error = %e, "could not write default events");
                    open_failure = Some(failure_reason(e));
                }
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored events, using defaults");
                None
            }
        };

        let (events, next_id) = loaded.unwrap_or((default, default_next));

        tracing::debug!(count = events.len(), next_id = %next_id, "event store opened");

        EventStore {
            storage,
            events,
            next_id,
            open_failure,
        }
    }

    /// Why the defaults could not be written when the store was opened, if
    /// they could not. Returned once.
    pub fn take_open_failure(&mut self) -> Option<String> {
        self.open_failure.take()
    }

    /// All events in insertion order.
    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> AgendaResult<&Event> {
        self.events
            .iter()
            .find(|e| e.id == id)
            .ok_or(AgendaError::EventNotFound(id))
    }

    /// Store a new event at the end of the collection under a fresh id.
    pub fn append(&mut self, new_event: NewEvent) -> AgendaResult<Event> {
        let next_id = self
            .next_id
            .next()
            .ok_or_else(|| AgendaError::Storage("No event ids left".to_string()))?;
        let event = new_event.with_id(self.next_id);

        let mut events = self.events.clone();
        events.push(event.clone());
        self.persist(&events, next_id)?;

        self.events = events;
        self.next_id = next_id;
        tracing::debug!(id = %event.id, title = %event.title, "appended event");
        Ok(event)
    }

    /// Replace the stored event that has the same id, keeping its position.
    pub fn replace_by_id(&mut self, event: Event) -> AgendaResult<()> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == event.id)
            .ok_or(AgendaError::EventNotFound(event.id))?;

        let mut events = self.events.clone();
        let id = event.id;
        events[index] = event;
        self.persist(&events, self.next_id)?;

        self.events = events;
        tracing::debug!(id = %id, "replaced event");
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self, events: &[Event], next_id: EventId) -> AgendaResult<()> {
        let raw = encode(events, next_id)?;
        self.storage.set(EVENTS_KEY, &raw)
    }
}

fn encode(events: &[Event], next_id: EventId) -> AgendaResult<String> {
    let doc = StoredEvents {
        version: SCHEMA_VERSION,
        next_id,
        events: events.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

fn decode(raw: &str) -> AgendaResult<(Vec<Event>, EventId)> {
    match serde_json::from_str::<StoredLayout>(raw) {
        Ok(StoredLayout::Versioned(doc)) => {
            if doc.version > SCHEMA_VERSION {
                return Err(AgendaError::Storage(format!(
                    "Stored events use schema version {}, this build reads up to {}",
                    doc.version, SCHEMA_VERSION
                )));
            }
            let next_id = next_id_after(&doc.events, doc.next_id)?;
            Ok((doc.events, next_id))
        }
        Ok(StoredLayout::Unversioned(events)) => {
            tracing::info!("migrating unversioned stored events");
            let next_id = next_id_after(&events, EventId(1))?;
            Ok((events, next_id))
        }
        Err(e) => Err(AgendaError::Serialization(e)),
    }
}

/// Smallest id that is at least `floor` and above every id in `events`.
fn next_id_after(events: &[Event], floor: EventId) -> AgendaResult<EventId> {
    events.iter().try_fold(floor, |next, event| {
        event
            .id
            .next()
            .map(|after| after.max(next))
            .ok_or_else(|| AgendaError::Storage(format!("Event id {} leaves no free id", event.id)))
    })
}

/// The message kept when a write fails.
fn failure_reason(e: AgendaError) -> String {
    match e {
        AgendaError::Storage(reason) => reason,
        other => other.to_string(),
    }
}
