//! The calendar's time zone.
//!
//! Every day comparison and every "bare time on a date" conversion goes
//! through one [`Zone`], so an event can never land on different days in
//! different views.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{AgendaError, AgendaResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone(Tz);

impl Default for Zone {
    fn default() -> Self {
        Zone::UTC
    }
}

impl Zone {
    pub const UTC: Zone = Zone(Tz::UTC);

    pub fn new(tz: Tz) -> Self {
        Zone(tz)
    }

    /// Parse an IANA zone name such as `Europe/Paris` or `UTC`.
    pub fn parse(name: &str) -> AgendaResult<Self> {
        name.trim()
            .parse::<Tz>()
            .map(Zone)
            .map_err(|_| AgendaError::InvalidZone(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Calendar day on which `instant` falls in this zone.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.0).date_naive()
    }

    /// Wall-clock time of `instant` in this zone.
    pub fn time_of(&self, instant: DateTime<Utc>) -> NaiveTime {
        instant.with_timezone(&self.0).time()
    }

    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }

    /// Combine a local date and time into an instant.
    ///
    /// Ambiguous wall-clock times (DST fall-back) resolve to the earlier
    /// instant. Times inside a DST gap are moved forward by one hour.
    pub fn combine(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        let local = date.and_time(time);
        self.resolve(local)
            .or_else(|| self.resolve(local + TimeDelta::hours(1)))
            .unwrap_or_else(|| local.and_utc())
    }

    fn resolve(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.0
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
