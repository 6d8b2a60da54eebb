//! The calendar view: navigation state, open forms and the event store.

use std::fmt;

use chrono::NaiveDate;

use crate::error::{AgendaError, AgendaResult};
use crate::event::{Event, EventId};
use crate::form::{EventForm, FormOutcome};
use crate::grid::{ViewMode, add_months, grid_for, mini_month, shift};
use crate::placement::{PlacedGrid, events_on, place_grid};
use crate::storage::KeyValueStore;
use crate::store::EventStore;
use crate::zone::Zone;

/// Whatever is open on top of the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Form(EventForm),
    EventList(Vec<Event>),
}

/// Non-fatal messages for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Created { id: EventId, title: String },
    Updated { id: EventId, title: String },
    SaveFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Created { id, title } => write!(f, "Created #{}: {}", id, title),
            Notice::Updated { id, title } => write!(f, "Updated #{}: {}", id, title),
            Notice::SaveFailed(reason) => write!(f, "Could not save: {}", reason),
        }
    }
}

pub struct CalendarView<S> {
    store: EventStore<S>,
    zone: Zone,
    reference: NaiveDate,
    selected: NaiveDate,
    mini_anchor: NaiveDate,
    mode: ViewMode,
    modal: Option<Modal>,
    notices: Vec<Notice>,
}

impl<S: KeyValueStore> CalendarView<S> {
    pub fn new(mut store: EventStore<S>, zone: Zone, today: NaiveDate) -> Self {
        let notices = store
            .take_open_failure()
            .map(Notice::SaveFailed)
            .into_iter()
            .collect();

        CalendarView {
            store,
            zone,
            reference: today,
            selected: today,
            mini_anchor: today,
            mode: ViewMode::default(),
            modal: None,
            notices,
        }
    }

    pub fn store(&self) -> &EventStore<S> {
        &self.store
    }

    pub fn events(&self) -> &[Event] {
        self.store.list()
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected
    }

    pub fn mini_anchor(&self) -> NaiveDate {
        self.mini_anchor
    }

    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    // NAVIGATION:

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn previous(&mut self) {
        self.reference = shift(self.reference, self.mode, -1);
    }

    pub fn next(&mut self) {
        self.reference = shift(self.reference, self.mode, 1);
    }

    /// Point the grid, the selection and the mini-calendar at `date`.
    pub fn jump_to(&mut self, date: NaiveDate) {
        self.reference = date;
        self.selected = date;
        self.mini_anchor = date;
    }

    pub fn today(&mut self) {
        self.jump_to(self.zone.today());
    }

    /// Mini-calendar click: changes the selection, not the main grid.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected = date;
    }

    pub fn mini_previous(&mut self) {
        self.mini_anchor = add_months(self.mini_anchor, -1);
    }

    pub fn mini_next(&mut self) {
        self.mini_anchor = add_months(self.mini_anchor, 1);
    }

    // RENDERING DATA:

    pub fn grid(&self) -> PlacedGrid<'_> {
        let grid = grid_for(self.reference, self.mode);
        place_grid(&grid, self.store.list(), self.zone)
    }

    pub fn mini_calendar(&self) -> Vec<Option<NaiveDate>> {
        mini_month(self.mini_anchor)
    }

    /// Events starting on the selected date.
    pub fn upcoming(&self) -> Vec<&Event> {
        events_on(self.selected, self.store.list(), self.zone)
    }

    // MODALS:

    /// Date cell click: open an empty form on that date.
    pub fn click_date(&mut self, date: NaiveDate) {
        tracing::debug!(%date, "opening create form");
        self.modal = Some(Modal::Form(EventForm::create(date, self.zone)));
    }

    /// Event click: open the form filled with that event.
    pub fn click_event(&mut self, id: EventId) -> AgendaResult<()> {
        let event = self.store.get(id)?;
        tracing::debug!(%id, "opening update form");
        self.modal = Some(Modal::Form(EventForm::update(event, self.zone)));
        Ok(())
    }

    /// "View all" in the upcoming panel.
    pub fn open_event_list(&mut self) {
        let events = self.upcoming().into_iter().cloned().collect();
        self.modal = Some(Modal::EventList(events));
    }

    pub fn form(&self) -> Option<&EventForm> {
        match &self.modal {
            Some(Modal::Form(form)) => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> AgendaResult<&mut EventForm> {
        match &mut self.modal {
            Some(Modal::Form(form)) => Ok(form),
            _ => Err(AgendaError::NoOpenForm),
        }
    }

    /// Cancel or backdrop click. Whatever was typed is discarded.
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Validate and store the open form.
    ///
    /// Returns the stored event and closes the form on success. An invalid
    /// form is an error and stays open. If storage refuses the write, a
    /// [`Notice::SaveFailed`] is queued, the form stays open and `None` is
    /// returned.
    pub fn submit_form(&mut self) -> AgendaResult<Option<Event>> {
        let outcome = match &self.modal {
            Some(Modal::Form(form)) => form.submit()?,
            _ => return Err(AgendaError::NoOpenForm),
        };

        let saved = match outcome {
            FormOutcome::Create(new_event) => self.store.append(new_event).map(|event| {
                let notice = Notice::Created {
                    id: event.id,
                    title: event.title.clone(),
                };
                (event, notice)
            }),
            FormOutcome::Update(event) => {
                self.store.replace_by_id(event.clone()).map(|()| {
                    let notice = Notice::Updated {
                        id: event.id,
                        title: event.title.clone(),
                    };
                    (event, notice)
                })
            }
        };

        match saved {
            Ok((event, notice)) => {
                self.notices.push(notice);
                self.modal = None;
                Ok(Some(event))
            }
            Err(AgendaError::Storage(reason)) => {
                tracing::warn!(%reason, "event was not saved");
                self.notices.push(Notice::SaveFailed(reason));
                Ok(None)
            }
            Err(AgendaError::Io(e)) => {
                tracing::warn!(error = %e, "event was not saved");
                self.notices.push(Notice::SaveFailed(e.to_string()));
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
