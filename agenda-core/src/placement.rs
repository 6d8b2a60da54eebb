//! Placing events on grid cells.
//!
//! An event belongs to the day its start falls on in the calendar zone.
//! Events of the same day keep their insertion order.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::event::Event;
use crate::grid::{DayCell, Grid};
use crate::zone::Zone;

/// Events shown in a month-view cell before "view more".
pub const MONTH_CELL_LIMIT: usize = 2;

/// Events shown in the upcoming-events panel before "view all".
pub const UPCOMING_LIMIT: usize = 3;

pub fn events_on(date: NaiveDate, events: &[Event], zone: Zone) -> Vec<&Event> {
    events
        .iter()
        .filter(|e| zone.date_of(e.start) == date)
        .collect()
}

pub fn has_events(date: NaiveDate, events: &[Event], zone: Zone) -> bool {
    events.iter().any(|e| zone.date_of(e.start) == date)
}

/// Events grouped by start day, in insertion order within each day.
pub struct DayIndex<'a> {
    by_day: HashMap<NaiveDate, Vec<&'a Event>>,
}

impl<'a> DayIndex<'a> {
    pub fn new(events: &'a [Event], zone: Zone) -> Self {
        let mut by_day: HashMap<NaiveDate, Vec<&'a Event>> = HashMap::new();
        for event in events {
            by_day.entry(zone.date_of(event.start)).or_default().push(event);
        }
        DayIndex { by_day }
    }

    pub fn on(&self, date: NaiveDate) -> &[&'a Event] {
        self.by_day.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone)]
pub struct PlacedDay<'a> {
    pub cell: DayCell,
    pub events: Vec<&'a Event>,
}

impl<'a> PlacedDay<'a> {
    pub fn capped(&self, limit: usize) -> Capped<'_, 'a> {
        Capped::new(&self.events, limit)
    }
}

#[derive(Debug, Clone)]
pub struct PlacedMonth {
    pub first: NaiveDate,
    /// Each day of the month and whether anything starts on it.
    pub days: Vec<(NaiveDate, bool)>,
}

impl PlacedMonth {
    pub fn name(&self) -> String {
        self.first.format("%B").to_string()
    }
}

#[derive(Debug, Clone)]
pub enum PlacedGrid<'a> {
    Week(Vec<PlacedDay<'a>>),
    Month(Vec<PlacedDay<'a>>),
    Year(Vec<PlacedMonth>),
}

pub fn place<'a>(cells: &[DayCell], events: &'a [Event], zone: Zone) -> Vec<PlacedDay<'a>> {
    let index = DayIndex::new(events, zone);
    place_indexed(cells, &index)
}

pub fn place_grid<'a>(grid: &Grid, events: &'a [Event], zone: Zone) -> PlacedGrid<'a> {
    let index = DayIndex::new(events, zone);
    match grid {
        Grid::Week(cells) => PlacedGrid::Week(place_indexed(cells, &index)),
        Grid::Month(cells) => PlacedGrid::Month(place_indexed(cells, &index)),
        Grid::Year(months) => PlacedGrid::Year(
            months
                .iter()
                .map(|month| PlacedMonth {
                    first: month.first,
                    days: month
                        .days
                        .iter()
                        .map(|day| (*day, !index.on(*day).is_empty()))
                        .collect(),
                })
                .collect(),
        ),
    }
}

fn place_indexed<'a>(cells: &[DayCell], index: &DayIndex<'a>) -> Vec<PlacedDay<'a>> {
    cells
        .iter()
        .map(|cell| PlacedDay {
            cell: *cell,
            events: index.on(cell.date).to_vec(),
        })
        .collect()
}

/// The visible head of a list of events plus a count of the rest.
#[derive(Debug, Clone, Copy)]
pub struct Capped<'s, 'a> {
    pub shown: &'s [&'a Event],
    pub hidden: usize,
}

impl<'s, 'a> Capped<'s, 'a> {
    pub fn new(events: &'s [&'a Event], limit: usize) -> Self {
        let shown = &events[..events.len().min(limit)];
        Capped {
            shown,
            hidden: events.len() - shown.len(),
        }
    }

    pub fn has_more(&self) -> bool {
        self.hidden > 0
    }
}
