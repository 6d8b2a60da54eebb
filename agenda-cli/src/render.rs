//! Terminal rendering for agenda types.
//!
//! Extension traits and helpers that turn agenda-core values into colored
//! text using owo_colors. Cells are padded before they are colored so that
//! escape codes don't break the column layout.

use agenda_core::grid::{DAYS_PER_WEEK, WEEKDAY_LABELS};
use agenda_core::placement::{
    Capped, MONTH_CELL_LIMIT, PlacedDay, PlacedGrid, PlacedMonth, has_events,
};
use agenda_core::{Event, EventKind, EventType, Notice, Zone};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

/// Width of one month-view column, including the separating space.
const CELL_WIDTH: usize = 16;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventType {
    fn render(&self) -> String {
        match self {
            EventType::Appointment => self.as_str().cyan().to_string(),
            EventType::Webinar => self.as_str().magenta().to_string(),
        }
    }
}

impl Render for Notice {
    fn render(&self) -> String {
        match self {
            Notice::Created { .. } | Notice::Updated { .. } => self.to_string().green().to_string(),
            Notice::SaveFailed(_) => self.to_string().red().to_string(),
        }
    }
}

/// One-line summary: `#id HH:MM-HH:MM title (with whom)`.
pub fn event_line(event: &Event, zone: Zone) -> String {
    format!(
        "{} {} {} {}",
        format!("#{}", event.id).dimmed(),
        time_span(event, zone),
        event.title.bold(),
        format!("({})", event.counterpart()).dimmed()
    )
}

/// Every field of an event, one per line.
pub fn event_card(event: &Event, zone: Zone) -> String {
    let mut lines = vec![
        format!("{} {}", event.title.bold(), format!("#{}", event.id).dimmed()),
        format!("  Type:         {}", event.event_type().render()),
        format!(
            "  When:         {} {}",
            zone.date_of(event.start).format("%a %b %-d %Y"),
            time_span(event, zone)
        ),
    ];

    match &event.kind {
        EventKind::Appointment(a) => {
            lines.push(format!("  Client:       {}", a.client_name));
            let video = if a.has_video_call { "yes" } else { "no" };
            lines.push(format!("  Video call:   {}", video));
        }
        EventKind::Webinar(w) => {
            lines.push(format!("  Organizer:    {}", w.organizer));
            lines.push(format!("  Category:     {}", w.category));
        }
    }

    if let Some(description) = &event.description {
        lines.push(format!("  Description:  {}", description));
    }

    lines.join("\n")
}

fn time_span(event: &Event, zone: Zone) -> String {
    format!(
        "{}-{}",
        zone.time_of(event.start).format("%H:%M"),
        zone.time_of(event.end).format("%H:%M")
    )
}

pub fn render_grid(grid: &PlacedGrid<'_>, reference: NaiveDate, zone: Zone) -> String {
    match grid {
        PlacedGrid::Week(days) => render_week(days, zone),
        PlacedGrid::Month(days) => render_month(days, reference),
        PlacedGrid::Year(months) => render_year(months, reference),
    }
}

/// Seven day columns per row, each listing the first few events.
pub fn render_month(days: &[PlacedDay<'_>], reference: NaiveDate) -> String {
    let mut lines = vec![reference.format("%B %Y").to_string().bold().to_string()];
    lines.push(
        WEEKDAY_LABELS
            .iter()
            .map(|label| pad(label, CELL_WIDTH).dimmed().to_string())
            .collect::<String>(),
    );

    for week in days.chunks(DAYS_PER_WEEK) {
        lines.push(
            week.iter()
                .map(|day| {
                    let number = pad(&day.cell.date.format("%-d").to_string(), CELL_WIDTH);
                    if !day.cell.is_current() {
                        number.dimmed().to_string()
                    } else if day.events.is_empty() {
                        number
                    } else {
                        number.bold().to_string()
                    }
                })
                .collect::<String>(),
        );

        let capped: Vec<Capped<'_, '_>> = week.iter().map(|d| d.capped(MONTH_CELL_LIMIT)).collect();
        for row in 0..MONTH_CELL_LIMIT {
            if capped.iter().all(|c| c.shown.len() <= row) {
                break;
            }
            lines.push(
                capped
                    .iter()
                    .map(|c| match c.shown.get(row) {
                        Some(event) => colorize_kind(event.event_type(), &pad(&event.title, CELL_WIDTH)),
                        None => pad("", CELL_WIDTH),
                    })
                    .collect::<String>(),
            );
        }

        if capped.iter().any(Capped::has_more) {
            lines.push(
                capped
                    .iter()
                    .map(|c| {
                        if c.has_more() {
                            pad(&format!("+{} more", c.hidden), CELL_WIDTH).yellow().to_string()
                        } else {
                            pad("", CELL_WIDTH)
                        }
                    })
                    .collect::<String>(),
            );
        }
    }

    lines.join("\n")
}

/// One block per day with every event of that day.
pub fn render_week(days: &[PlacedDay<'_>], zone: Zone) -> String {
    let mut lines = Vec::new();

    for day in days {
        lines.push(day.cell.date.format("%a %b %-d").to_string().bold().to_string());
        if day.events.is_empty() {
            lines.push(format!("  {}", "No events".dimmed()));
        }
        for event in &day.events {
            lines.push(format!("  {}", event_line(event, zone)));
        }
    }

    lines.join("\n")
}

/// Twelve small months; days with events are highlighted.
pub fn render_year(months: &[PlacedMonth], reference: NaiveDate) -> String {
    let mut blocks = vec![reference.format("%Y").to_string().bold().to_string()];

    for month in months {
        let cells: Vec<Option<(NaiveDate, bool)>> = std::iter::repeat_n(None, leading_blanks(month.first))
            .chain(month.days.iter().copied().map(Some))
            .collect();

        let mut lines = vec![month.name().bold().to_string()];
        lines.push(weekday_header());
        lines.extend(cells.chunks(DAYS_PER_WEEK).map(|week| {
            week.iter()
                .map(|cell| match cell {
                    Some((date, true)) => pad_number(*date).green().bold().to_string(),
                    Some((date, false)) => pad_number(*date),
                    None => "   ".to_string(),
                })
                .collect::<String>()
        }));
        blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
}

/// The month of `anchor`, marking the selected day and days with events.
pub fn render_mini_calendar(
    cells: &[Option<NaiveDate>],
    anchor: NaiveDate,
    selected: NaiveDate,
    events: &[Event],
    zone: Zone,
) -> String {
    let mut lines = vec![anchor.format("%B %Y").to_string().bold().to_string()];
    lines.push(weekday_header());

    for week in cells.chunks(DAYS_PER_WEEK) {
        if week.iter().all(Option::is_none) {
            continue;
        }
        lines.push(
            week.iter()
                .map(|cell| match cell {
                    Some(date) if *date == selected => pad_number(*date).reversed().to_string(),
                    Some(date) if has_events(*date, events, zone) => {
                        pad_number(*date).green().to_string()
                    }
                    Some(date) => pad_number(*date),
                    None => "   ".to_string(),
                })
                .collect::<String>(),
        );
    }

    lines.join("\n")
}

/// The day's events, capped at `limit` when given.
pub fn render_upcoming(date: NaiveDate, events: &[&Event], limit: Option<usize>, zone: Zone) -> String {
    let mut lines = vec![format!("Upcoming on {}", date.format("%a %b %-d")).bold().to_string()];

    if events.is_empty() {
        lines.push(format!("  {}", "No events".dimmed()));
        return lines.join("\n");
    }

    let capped = Capped::new(events, limit.unwrap_or(events.len()));
    for event in capped.shown {
        lines.push(format!("  {}", event_line(event, zone)));
    }
    if capped.has_more() {
        let hint = format!("+{} more (agenda upcoming --all)", capped.hidden);
        lines.push(format!("  {}", hint.yellow()));
    }

    lines.join("\n")
}

fn colorize_kind(kind: EventType, text: &str) -> String {
    match kind {
        EventType::Appointment => text.cyan().to_string(),
        EventType::Webinar => text.magenta().to_string(),
    }
}

fn weekday_header() -> String {
    WEEKDAY_LABELS
        .iter()
        .map(|label| pad(&label[..2], 3).dimmed().to_string())
        .collect()
}

fn leading_blanks(first: NaiveDate) -> usize {
    use chrono::Datelike;
    first.weekday().num_days_from_sunday() as usize
}

fn pad_number(date: NaiveDate) -> String {
    format!("{:>2} ", date.format("%-d").to_string())
}

/// Fit `text` into `width` columns, truncating with an ellipsis.
fn pad(text: &str, width: usize) -> String {
    let max = width.saturating_sub(1);
    let count = text.chars().count();
    if count > max {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}… ", cut)
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::grid::month_grid;
    use agenda_core::placement::place;
    use agenda_core::seed::seed_events;
    use agenda_core::{EventId, Webinar};
    use chrono::{TimeZone, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn webinar(id: u64, title: &str) -> Event {
        Event {
            id: EventId(id),
            title: title.to_string(),
            start: Utc.with_ymd_and_hms(2025, 2, 20, 14, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 2, 20, 15, 0, 0).unwrap(),
            description: None,
            kind: EventKind::Webinar(Webinar {
                organizer: "Ops".to_string(),
                category: "Team".to_string(),
                thumbnail: None,
            }),
        }
    }

    #[test]
    fn pad_fills_and_truncates() {
        assert_eq!(pad("abc", 6), "abc   ");
        assert_eq!(pad("abcdefghij", 6), "abcd… ");
        assert_eq!(pad("abcde", 6).chars().count(), 6);
    }

    #[test]
    fn event_line_shows_time_title_and_counterpart() {
        let events = seed_events();
        let line = event_line(&events[0], Zone::UTC);

        assert!(line.contains("09:00-10:00"));
        assert!(line.contains("Hello, I'm LAi"));
        assert!(line.contains("Alex Stan"));
    }

    #[test]
    fn card_has_kind_specific_fields() {
        let events = seed_events();

        let appointment = event_card(&events[0], Zone::UTC);
        assert!(appointment.contains("Client:"));
        assert!(appointment.contains("Video call:   yes"));

        let webinar = event_card(&events[1], Zone::UTC);
        assert!(webinar.contains("Organizer:    Professional Development Institute"));
        assert!(webinar.contains("Description:"));
    }

    #[test]
    fn month_shows_more_marker_for_busy_days() {
        let mut events = seed_events();
        events.push(webinar(3, "Third"));
        let days = place(&month_grid(d(2025, 2, 1)), &events, Zone::UTC);

        let text = render_month(&days, d(2025, 2, 1));

        assert!(text.contains("February 2025"));
        assert!(text.contains("+1 more"));
        assert!(!text.contains("Third"));
    }

    #[test]
    fn upcoming_caps_unless_all() {
        let events: Vec<Event> = (1..=5).map(|i| webinar(i, &format!("Talk {}", i))).collect();
        let refs: Vec<&Event> = events.iter().collect();

        let capped = render_upcoming(d(2025, 2, 20), &refs, Some(3), Zone::UTC);
        assert!(capped.contains("Talk 3"));
        assert!(!capped.contains("Talk 4"));
        assert!(capped.contains("+2 more"));

        let all = render_upcoming(d(2025, 2, 20), &refs, None, Zone::UTC);
        assert!(all.contains("Talk 5"));
        assert!(!all.contains("more"));
    }

    #[test]
    fn empty_day_says_so() {
        let text = render_upcoming(d(2025, 2, 21), &[], Some(3), Zone::UTC);
        assert!(text.contains("No events"));
    }

    #[test]
    fn mini_calendar_skips_blank_rows() {
        let cells = agenda_core::grid::mini_month(d(2025, 2, 1));

        let text = render_mini_calendar(&cells, d(2025, 2, 1), d(2025, 2, 20), &[], Zone::UTC);

        // February 2025 spans five week rows; the sixth is blank.
        assert_eq!(text.lines().count(), 7);
        assert!(text.contains("28"));
    }

    #[test]
    fn mini_calendar_marks_busy_days() {
        let cells = agenda_core::grid::mini_month(d(2025, 2, 1));
        let events = vec![webinar(1, "Demo")];

        let text = render_mini_calendar(&cells, d(2025, 2, 1), d(2025, 2, 3), &events, Zone::UTC);

        assert!(text.contains(&"20 ".green().to_string()));
        assert!(!text.contains(&"21 ".green().to_string()));
        assert!(text.contains(&" 3 ".reversed().to_string()));
    }
}
