use agenda_core::placement::UPCOMING_LIMIT;
use agenda_core::{Event, Modal};
use anyhow::Result;

use crate::commands::{open_view, parse_date};
use crate::render::render_upcoming;

pub fn run(date: Option<&str>, all: bool) -> Result<()> {
    let (_, mut view) = open_view()?;

    if let Some(date) = date {
        view.select_date(parse_date(date)?);
    }

    let zone = view.zone();
    let selected = view.selected_date();

    if !all {
        println!("{}", render_upcoming(selected, &view.upcoming(), Some(UPCOMING_LIMIT), zone));
        return Ok(());
    }

    view.open_event_list();
    if let Some(Modal::EventList(events)) = view.modal() {
        let events: Vec<&Event> = events.iter().collect();
        println!("{}", render_upcoming(selected, &events, None, zone));
    }

    Ok(())
}
