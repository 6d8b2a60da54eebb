use agenda_core::EventId;
use anyhow::Result;

use crate::commands::{EventFields, open_view, save};

pub fn run(id: EventId, fields: EventFields) -> Result<()> {
    let (_, mut view) = open_view()?;

    view.click_event(id)?;
    fields.apply(view.form_mut()?)?;

    save(&mut view)
}
