pub mod config;
pub mod new;
pub mod show;
pub mod upcoming;
pub mod update;
pub mod view;

use agenda_core::{
    AgendaConfig, CalendarView, EventForm, EventStore, EventType, FileStore, KeyValueStore,
};
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use clap::Args;

use crate::render::{Render, event_card};

/// Event fields shared by `new` and `update`. Unset flags leave the form as is.
#[derive(Args, Debug, Default)]
pub struct EventFields {
    /// appointment or webinar
    #[arg(long = "type")]
    pub event_type: Option<EventType>,

    #[arg(long)]
    pub title: Option<String>,

    /// Start time (HH:MM, or an RFC 3339 timestamp)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time (HH:MM, or an RFC 3339 timestamp)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Length of the event instead of an end time (e.g. "30m", "1h 30m")
    #[arg(long, conflicts_with = "end")]
    pub duration: Option<String>,

    /// Client name (appointments)
    #[arg(long)]
    pub client: Option<String>,

    /// Appointment without a video call
    #[arg(long, conflicts_with = "video")]
    pub no_video: bool,

    /// Appointment with a video call
    #[arg(long)]
    pub video: bool,

    /// Organizer (webinars)
    #[arg(long)]
    pub organizer: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

impl EventFields {
    /// Copy every given flag into the form.
    pub fn apply(&self, form: &mut EventForm) -> Result<()> {
        if let Some(event_type) = self.event_type {
            form.set_event_type(event_type);
        }
        if let Some(title) = &self.title {
            form.set_title(title.as_str());
        }
        if let Some(start) = &self.start {
            form.set_start(start)?;
        }
        if let Some(end) = &self.end {
            form.set_end(end)?;
        }
        if let Some(duration) = &self.duration {
            let end = form
                .start()
                .checked_add_signed(parse_duration(duration)?)
                .context("Duration too large")?;
            form.set_end(&end.to_rfc3339())?;
        }
        if let Some(client) = &self.client {
            form.set_client_name(client.as_str());
        }
        if self.video {
            form.set_video_call(true);
        }
        if self.no_video {
            form.set_video_call(false);
        }
        if let Some(organizer) = &self.organizer {
            form.set_organizer(organizer.as_str());
        }
        if let Some(description) = &self.description {
            form.set_description(description.as_str());
        }
        Ok(())
    }
}

/// Load the config and open the event store it points at.
pub fn open_view() -> Result<(AgendaConfig, CalendarView<FileStore>)> {
    let config = AgendaConfig::load()?;
    let zone = config.zone()?;

    let store = EventStore::open(FileStore::new(config.data_path()));
    let view = CalendarView::new(store, zone, zone.today());

    Ok((config, view))
}

/// Submit the open form and report the outcome.
pub fn save<S: KeyValueStore>(view: &mut CalendarView<S>) -> Result<()> {
    let saved = view.submit_form()?;

    for notice in view.take_notices() {
        println!("  {}", notice.render());
    }

    match saved {
        Some(event) => {
            println!();
            println!("{}", event_card(&event, view.zone()));
            Ok(())
        }
        None => anyhow::bail!("Event was not saved"),
    }
}

fn parse_duration(input: &str) -> Result<Duration> {
    let std_dur = humantime::parse_duration(input)
        .with_context(|| format!("Could not parse duration: \"{}\"", input))?;
    Duration::from_std(std_dur).context("Duration too large")
}

/// Parse a day given as YYYY-MM-DD or in words ("tomorrow", "next fri").
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        return Ok(date);
    }

    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;

    Ok(dt.date())
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map_or(word, |(_, full)| *full)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::{FormMode, Zone};
    use chrono::{Datelike, TimeZone, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn iso_dates_parse_directly() {
        assert_eq!(parse_date("2025-02-21").unwrap(), d(2025, 2, 21));
        assert_eq!(parse_date(" 2024-02-29 ").unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn words_go_through_fuzzydate() {
        let date = parse_date("march 20").unwrap();
        assert_eq!((date.month(), date.day()), (3, 20));

        let date = parse_date("sep 5").unwrap();
        assert_eq!((date.month(), date.day()), (9, 5));
    }

    #[test]
    fn garbage_date_is_an_error() {
        assert!(parse_date("not a date at all xyz").is_err());
    }

    #[test]
    fn expands_day_and_month_names() {
        assert_eq!(expand_abbreviations("Fri"), "friday");
        assert_eq!(expand_abbreviations("next tues"), "next tuesday");
        assert_eq!(expand_abbreviations("sept 5"), "september 5");
        assert_eq!(expand_abbreviations("tomorrow"), "tomorrow");
    }

    #[test]
    fn apply_sets_only_given_fields() {
        let mut form = EventForm::create(d(2025, 2, 21), Zone::UTC);
        let fields = EventFields {
            event_type: Some(EventType::Webinar),
            title: Some("Standup".to_string()),
            start: Some("09:00".to_string()),
            duration: Some("30m".to_string()),
            organizer: Some("Ops".to_string()),
            ..EventFields::default()
        };

        fields.apply(&mut form).unwrap();

        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.event_type(), EventType::Webinar);
        assert_eq!(form.title(), "Standup");
        assert_eq!(form.start(), Utc.with_ymd_and_hms(2025, 2, 21, 9, 0, 0).unwrap());
        assert_eq!(form.end(), Utc.with_ymd_and_hms(2025, 2, 21, 9, 30, 0).unwrap());
        assert!(form.has_video_call());
        assert_eq!(form.description(), "");
    }

    #[test]
    fn no_video_clears_the_flag() {
        let mut form = EventForm::create(d(2025, 2, 21), Zone::UTC);
        let fields = EventFields {
            no_video: true,
            ..EventFields::default()
        };

        fields.apply(&mut form).unwrap();

        assert!(!form.has_video_call());
    }

    #[test]
    fn huge_duration_is_an_error() {
        let mut form = EventForm::create(d(2025, 2, 21), Zone::UTC);
        let end_before = form.end();
        let fields = EventFields {
            duration: Some("1000000years".to_string()),
            ..EventFields::default()
        };

        let err = fields.apply(&mut form).unwrap_err();

        assert!(err.to_string().contains("Duration too large"));
        assert_eq!(form.end(), end_before);
    }

    #[test]
    fn bad_time_is_reported() {
        let mut form = EventForm::create(d(2025, 2, 21), Zone::UTC);
        let fields = EventFields {
            start: Some("quarter past".to_string()),
            ..EventFields::default()
        };

        assert!(fields.apply(&mut form).is_err());
    }
}
