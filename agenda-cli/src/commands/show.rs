use agenda_core::placement::UPCOMING_LIMIT;
use agenda_core::{CalendarView, KeyValueStore, ViewMode};
use anyhow::Result;

use crate::commands::{open_view, parse_date};
use crate::render::{Render, render_grid, render_mini_calendar, render_upcoming};

pub fn run(view_mode: Option<ViewMode>, date: Option<&str>, mini: i32) -> Result<()> {
    let (config, mut view) = open_view()?;

    for notice in view.take_notices() {
        eprintln!("  {}", notice.render());
    }

    view.set_view_mode(view_mode.unwrap_or(config.default_view));
    if let Some(date) = date {
        view.jump_to(parse_date(date)?);
    }
    scroll_mini(&mut view, mini);

    let zone = view.zone();
    println!("{}", render_grid(&view.grid(), view.reference_date(), zone));
    println!();
    println!(
        "{}",
        render_mini_calendar(
            &view.mini_calendar(),
            view.mini_anchor(),
            view.selected_date(),
            view.events(),
            zone
        )
    );
    println!();
    println!(
        "{}",
        render_upcoming(view.selected_date(), &view.upcoming(), Some(UPCOMING_LIMIT), zone)
    );

    Ok(())
}

/// Move the mini-calendar by `months`, backwards when negative.
fn scroll_mini<S: KeyValueStore>(view: &mut CalendarView<S>, months: i32) {
    for _ in 0..months.unsigned_abs() {
        if months < 0 {
            view.mini_previous();
        } else {
            view.mini_next();
        }
    }
}
