//! The create/update event form.
//!
//! A form is opened either empty on a date ([`EventForm::create`]) or filled
//! from a stored event ([`EventForm::update`]). Time inputs are normalised the
//! moment they are set, so the form only ever holds UTC instants.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

use crate::error::{AgendaError, AgendaResult};
use crate::event::{
    Appointment, DEFAULT_CLIENT_AVATAR, DEFAULT_WEBINAR_CATEGORY, Event, EventId, EventKind,
    EventType, NewEvent, Webinar,
};
use crate::zone::Zone;

fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

fn default_end_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(EventId),
}

/// What a successful submit produces.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Create(NewEvent),
    Update(Event),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormIssue {
    #[error("Title is required")]
    MissingTitle,
    #[error("Client name is required for appointments")]
    MissingClientName,
    #[error("Organizer is required for webinars")]
    MissingOrganizer,
    #[error("End time is before start time")]
    EndBeforeStart,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_issues(.issues))]
pub struct FormError {
    pub issues: Vec<FormIssue>,
}

fn join_issues(issues: &[FormIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    mode: FormMode,
    zone: Zone,
    /// Day that bare times are placed on.
    date: NaiveDate,
    event_type: EventType,
    title: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    description: String,
    client_name: String,
    has_video_call: bool,
    organizer: String,
    // Not editable in the form, carried over from the event being updated.
    client_avatar: Option<String>,
    category: String,
    thumbnail: Option<String>,
}

impl EventForm {
    pub fn create(date: NaiveDate, zone: Zone) -> Self {
        EventForm {
            mode: FormMode::Create,
            zone,
            date,
            event_type: EventType::default(),
            title: String::new(),
            start: zone.combine(date, default_start_time()),
            end: zone.combine(date, default_end_time()),
            description: String::new(),
            client_name: String::new(),
            has_video_call: true,
            organizer: String::new(),
            client_avatar: Some(DEFAULT_CLIENT_AVATAR.to_string()),
            category: DEFAULT_WEBINAR_CATEGORY.to_string(),
            thumbnail: None,
        }
    }

    pub fn update(event: &Event, zone: Zone) -> Self {
        let mut form = EventForm::create(zone.date_of(event.start), zone);
        form.mode = FormMode::Update(event.id);
        form.event_type = event.event_type();
        form.title = event.title.clone();
        form.start = event.start;
        form.end = event.end;
        form.description = event.description.clone().unwrap_or_default();

        match &event.kind {
            EventKind::Appointment(a) => {
                form.client_name = a.client_name.clone();
                form.has_video_call = a.has_video_call;
                form.client_avatar = a.client_avatar.clone();
            }
            EventKind::Webinar(w) => {
                form.organizer = w.organizer.clone();
                form.category = w.category.clone();
                form.thumbnail = w.thumbnail.clone();
            }
        }
        form
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn has_video_call(&self) -> bool {
        self.has_video_call
    }

    pub fn organizer(&self) -> &str {
        &self.organizer
    }

    /// Start as shown in a time picker (`HH:MM` in the calendar zone).
    pub fn start_input(&self) -> String {
        self.zone.time_of(self.start).format("%H:%M").to_string()
    }

    pub fn end_input(&self) -> String {
        self.zone.time_of(self.end).format("%H:%M").to_string()
    }

    /// Switch between appointment and webinar. Common fields are kept, and
    /// variant fields typed earlier come back when switching back.
    pub fn set_event_type(&mut self, event_type: EventType) {
        self.event_type = event_type;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_start(&mut self, input: &str) -> AgendaResult<()> {
        self.start = normalize_time(input, self.date, self.zone)?;
        Ok(())
    }

    pub fn set_end(&mut self, input: &str) -> AgendaResult<()> {
        self.end = normalize_time(input, self.date, self.zone)?;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_client_name(&mut self, client_name: impl Into<String>) {
        self.client_name = client_name.into();
    }

    pub fn set_video_call(&mut self, has_video_call: bool) {
        self.has_video_call = has_video_call;
    }

    pub fn toggle_video_call(&mut self) {
        self.has_video_call = !self.has_video_call;
    }

    pub fn set_organizer(&mut self, organizer: impl Into<String>) {
        self.organizer = organizer.into();
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let mut issues = Vec::new();

        if self.title.trim().is_empty() {
            issues.push(FormIssue::MissingTitle);
        }
        match self.event_type {
            EventType::Appointment if self.client_name.trim().is_empty() => {
                issues.push(FormIssue::MissingClientName)
            }
            EventType::Webinar if self.organizer.trim().is_empty() => {
                issues.push(FormIssue::MissingOrganizer)
            }
            _ => {}
        }
        if self.end < self.start {
            issues.push(FormIssue::EndBeforeStart);
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(FormError { issues })
        }
    }

    /// Assemble the record to store. The form itself is left untouched.
    pub fn submit(&self) -> Result<FormOutcome, FormError> {
        self.validate()?;

        let kind = match self.event_type {
            EventType::Appointment => EventKind::Appointment(Appointment {
                client_name: self.client_name.trim().to_string(),
                has_video_call: self.has_video_call,
                client_avatar: self.client_avatar.clone(),
            }),
            EventType::Webinar => EventKind::Webinar(Webinar {
                organizer: self.organizer.trim().to_string(),
                category: self.category.clone(),
                thumbnail: self.thumbnail.clone(),
            }),
        };
        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let new_event = NewEvent {
            title: self.title.trim().to_string(),
            start: self.start,
            end: self.end,
            description,
            kind,
        };

        Ok(match self.mode {
            FormMode::Create => FormOutcome::Create(new_event),
            FormMode::Update(id) => FormOutcome::Update(new_event.with_id(id)),
        })
    }

    /// Drop everything typed so far and go back to an empty create form.
    pub fn reset(&mut self) {
        *self = EventForm::create(self.date, self.zone);
    }
}

/// Turn a time input into an instant.
///
/// Accepts a bare local time (`HH:MM` or `HH:MM:SS`), placed on `date` in
/// `zone`, or a full RFC 3339 timestamp, used as is.
pub fn normalize_time(input: &str, date: NaiveDate, zone: Zone) -> AgendaResult<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }

    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .map(|time| zone.combine(date, time))
        .map_err(|_| AgendaError::InvalidTime(input.to_string()))
}
