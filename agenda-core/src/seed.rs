//! Events shown on first launch, and whenever stored events cannot be read.

use chrono::{DateTime, TimeZone, Utc};

use crate::event::{
    Appointment, DEFAULT_CLIENT_AVATAR, DEFAULT_WEBINAR_CATEGORY, Event, EventId, EventKind,
    Webinar,
};

fn seed_time(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 20, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn seed_events() -> Vec<Event> {
    vec![
        Event {
            id: EventId(1),
            title: "Hello, I'm LAi".to_string(),
            start: seed_time(9),
            end: seed_time(10),
            description: None,
            kind: EventKind::Appointment(Appointment {
                client_name: "Alex Stan".to_string(),
                has_video_call: true,
                client_avatar: Some(DEFAULT_CLIENT_AVATAR.to_string()),
            }),
        },
        Event {
            id: EventId(2),
            title: "This is my test".to_string(),
            start: seed_time(9),
            end: seed_time(10),
            description: Some(
                "Learn essential strategies for managing workplace trauma".to_string(),
            ),
            kind: EventKind::Webinar(Webinar {
                organizer: "Professional Development Institute".to_string(),
                category: DEFAULT_WEBINAR_CATEGORY.to_string(),
                thumbnail: None,
            }),
        },
    ]
}
