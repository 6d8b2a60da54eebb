mod commands;
mod render;

use agenda_core::{EventId, ViewMode};
use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::EventFields;

/// Environment variable holding the log filter, e.g. `AGENDA_LOG=agenda_core=debug`.
const LOG_ENV: &str = "AGENDA_LOG";

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Browse and edit your appointments and webinars")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the calendar grid, the mini-calendar and the day's events
    Show {
        /// week, month or year (defaults to the configured view)
        #[arg(short, long)]
        view: Option<ViewMode>,

        /// Date to show (YYYY-MM-DD or e.g. "next friday")
        #[arg(short, long)]
        date: Option<String>,

        /// Scroll the mini-calendar by this many months (negative goes back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        mini: i32,
    },
    /// List the events of one day
    Upcoming {
        /// Day to list (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Show every event instead of the first few
        #[arg(long)]
        all: bool,
    },
    /// Show one event in full
    View { id: EventId },
    /// Create an event
    New {
        /// Day of the event (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Change an existing event
    Update {
        id: EventId,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Print config paths and settings
    Config,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { view, date, mini } => commands::show::run(view, date.as_deref(), mini),
        Commands::Upcoming { date, all } => commands::upcoming::run(date.as_deref(), all),
        Commands::View { id } => commands::view::run(id),
        Commands::New { date, fields } => commands::new::run(date.as_deref(), fields),
        Commands::Update { id, fields } => commands::update::run(id, fields),
        Commands::Config => commands::config::run(),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_view() {
        let cli = Cli::try_parse_from(["agenda", "show", "--view", "week", "--date", "2025-02-20"])
            .unwrap();

        match cli.command {
            Commands::Show { view, date, mini } => {
                assert_eq!(view, Some(ViewMode::Week));
                assert_eq!(date.as_deref(), Some("2025-02-20"));
                assert_eq!(mini, 0);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn parses_negative_mini_offset() {
        let cli = Cli::try_parse_from(["agenda", "show", "--mini", "-2"]).unwrap();

        match cli.command {
            Commands::Show { mini, .. } => assert_eq!(mini, -2),
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn parses_new_with_fields() {
        let cli = Cli::try_parse_from([
            "agenda",
            "new",
            "--type",
            "webinar",
            "--title",
            "Standup",
            "--date",
            "2025-02-21",
            "--start",
            "09:00",
            "--end",
            "09:30",
            "--organizer",
            "Ops",
        ])
        .unwrap();

        match cli.command {
            Commands::New { date, fields } => {
                assert_eq!(date.as_deref(), Some("2025-02-21"));
                assert_eq!(fields.event_type, Some(agenda_core::EventType::Webinar));
                assert_eq!(fields.title.as_deref(), Some("Standup"));
                assert_eq!(fields.organizer.as_deref(), Some("Ops"));
            }
            _ => panic!("expected new"),
        }
    }

    #[test]
    fn update_requires_numeric_id() {
        assert!(Cli::try_parse_from(["agenda", "update", "abc"]).is_err());

        let cli = Cli::try_parse_from(["agenda", "update", "7", "--no-video"]).unwrap();
        match cli.command {
            Commands::Update { id, fields } => {
                assert_eq!(id, EventId(7));
                assert!(fields.no_video);
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn end_and_duration_conflict() {
        let result = Cli::try_parse_from([
            "agenda", "new", "--end", "10:00", "--duration", "30m",
        ]);
        assert!(result.is_err());
    }
}
