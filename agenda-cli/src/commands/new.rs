use anyhow::Result;
use dialoguer::Input;

use crate::commands::{EventFields, open_view, parse_date, save};

pub fn run(date: Option<&str>, fields: EventFields) -> Result<()> {
    let (_, mut view) = open_view()?;

    let date = match date {
        Some(d) => parse_date(d)?,
        None => view.zone().today(),
    };

    view.click_date(date);
    let form = view.form_mut()?;
    fields.apply(form)?;

    if form.title().trim().is_empty() {
        let title: String = Input::new().with_prompt("  Title").interact_text()?;
        form.set_title(title);
    }

    save(&mut view)
}
