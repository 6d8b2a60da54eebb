//! Calendar event types.
//!
//! An event is either an appointment (one-on-one with a client) or a webinar
//! (broadcast with an organizer). The variant lives in [`EventKind`] and is
//! serialized inline with a `type` tag, so a stored record looks like:
//!
//! ```json
//! { "id": 1, "type": "appointment", "title": "Intro call",
//!   "startTime": "2025-02-20T09:00:00Z", "endTime": "2025-02-20T10:00:00Z",
//!   "clientName": "Alex Stan", "hasVideoCall": true }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category given to webinars when none is supplied.
pub const DEFAULT_WEBINAR_CATEGORY: &str = "Professional Development";

/// Avatar reference attached to new appointments.
pub const DEFAULT_CLIENT_AVATAR: &str = "/placeholder.svg";

/// Identifier of a stored event. Assigned by the event store, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl EventId {
    /// The id after this one, `None` once the id space is used up.
    pub fn next(self) -> Option<EventId> {
        self.0.checked_add(1).map(EventId)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(EventId)
            .map_err(|_| format!("Invalid event id '{}'", s))
    }
}

/// A stored calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(rename = "startTime")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// An event that has not been stored yet, so it has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: Option<String>,
    pub kind: EventKind,
}

impl NewEvent {
    pub fn with_id(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            start: self.start,
            end: self.end,
            description: self.description,
            kind: self.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventKind {
    Appointment(Appointment),
    Webinar(Webinar),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub client_name: String,
    pub has_video_call: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webinar {
    pub organizer: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

fn default_category() -> String {
    DEFAULT_WEBINAR_CATEGORY.to_string()
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Appointment(_) => EventType::Appointment,
            EventKind::Webinar(_) => EventType::Webinar,
        }
    }
}

impl Event {
    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    /// The person the event is held with: the client of an appointment or the
    /// organizer of a webinar.
    pub fn counterpart(&self) -> &str {
        match &self.kind {
            EventKind::Appointment(a) => &a.client_name,
            EventKind::Webinar(w) => &w.organizer,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Discriminant of [`EventKind`], used by the form's type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventType {
    #[default]
    Appointment,
    Webinar,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Appointment => "appointment",
            EventType::Webinar => "webinar",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "appointment" => Ok(EventType::Appointment),
            "webinar" => Ok(EventType::Webinar),
            other => Err(format!(
                "Unknown event type '{}'. Expected appointment or webinar",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn appointment() -> Event {
        Event {
            id: EventId(1),
            title: "Intro call".to_string(),
            start: Utc.with_ymd_and_hms(2025, 2, 20, 9, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 2, 20, 10, 0, 0).unwrap(),
            description: None,
            kind: EventKind::Appointment(Appointment {
                client_name: "Alex Stan".to_string(),
                has_video_call: true,
                client_avatar: Some(DEFAULT_CLIENT_AVATAR.to_string()),
            }),
        }
    }

    #[test]
    fn serializes_with_type_tag_and_camel_case_fields() {
        let json = serde_json::to_value(appointment()).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["type"], "appointment");
        assert_eq!(json["startTime"], "2025-02-20T09:00:00Z");
        assert_eq!(json["clientName"], "Alex Stan");
        assert_eq!(json["hasVideoCall"], true);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn webinar_without_category_gets_default() {
        let json = r#"{
            "id": 7,
            "type": "webinar",
            "title": "Weekly all-hands",
            "startTime": "2025-02-21T09:00:00Z",
            "endTime": "2025-02-21T09:30:00Z",
            "organizer": "Ops"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, EventId(7));
        assert_eq!(event.event_type(), EventType::Webinar);
        match event.kind {
            EventKind::Webinar(w) => {
                assert_eq!(w.organizer, "Ops");
                assert_eq!(w.category, DEFAULT_WEBINAR_CATEGORY);
                assert_eq!(w.thumbnail, None);
            }
            EventKind::Appointment(_) => panic!("expected a webinar"),
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        let json = r#"{
            "id": 3, "type": "party", "title": "x",
            "startTime": "2025-02-21T09:00:00Z", "endTime": "2025-02-21T09:30:00Z"
        }"#;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }

    #[test]
    fn counterpart_follows_variant() {
        assert_eq!(appointment().counterpart(), "Alex Stan");
    }

    #[test]
    fn event_type_parses_case_insensitively() {
        assert_eq!("Webinar".parse::<EventType>(), Ok(EventType::Webinar));
        assert_eq!(" appointment ".parse::<EventType>(), Ok(EventType::Appointment));
        assert!("meeting".parse::<EventType>().is_err());
    }

    #[test]
    fn next_id_stops_at_the_end_of_the_range() {
        assert_eq!(EventId(41).next(), Some(EventId(42)));
        assert_eq!(EventId(u64::MAX).next(), None);
    }
}
