use agenda_core::EventId;
use anyhow::Result;

use crate::commands::open_view;
use crate::render::event_card;

pub fn run(id: EventId) -> Result<()> {
    let (_, view) = open_view()?;

    let event = view.store().get(id)?;
    println!("{}", event_card(event, view.zone()));

    Ok(())
}
