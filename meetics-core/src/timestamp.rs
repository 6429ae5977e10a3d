//! Normalization of raw date strings into calendar timestamps.
//!
//! The field source emits timestamps in a local "space-separated" convention
//! (`YYYY-MM-DD HH:MM:SS`, sometimes with a microsecond suffix) that strict
//! ISO parsers reject. Rewriting the separator before parsing is the minimal
//! transform that makes parsing reliable without a full date grammar.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A normalized point in time: date and wall-clock seconds, no zone.
///
/// The zone is applied at render time via a `TZID` parameter, so the token
/// itself is always the floating 15-character `YYYYMMDDTHHMMSS` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarTimestamp(NaiveDateTime);

impl CalendarTimestamp {
    /// Render as the ICS datetime token, e.g. `20250320T153000`.
    pub fn to_ics(self) -> String {
        self.0.format("%Y%m%dT%H%M%S").to_string()
    }
}

impl From<NaiveDateTime> for CalendarTimestamp {
    fn from(dt: NaiveDateTime) -> Self {
        CalendarTimestamp(dt)
    }
}

/// Normalize a raw date string into a [`CalendarTimestamp`].
///
/// Accepted shapes, in precedence order:
/// 1. Already ISO-like (contains a literal `T`) — parsed as-is.
/// 2. `YYYY-MM-DD HH:MM:SS` — the space becomes `T`, then parsed.
/// 3. `YYYY-MM-DD HH:MM:SS.ffffff` — space becomes `T`, the fractional
///    suffix is stripped, then parsed.
///
/// Anything else goes to the parser unmodified. Returns `None` for input
/// that does not describe a valid calendar instant; never panics.
pub fn normalize(raw: &str) -> Option<CalendarTimestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let iso = if raw.contains('T') {
        raw.to_string()
    } else {
        let mut replaced = raw.replacen(' ', "T", 1);
        if let Some(dot) = replaced.find('.') {
            replaced.truncate(dot);
        }
        replaced
    };

    parse_instant(&iso).map(CalendarTimestamp)
}

fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            // Offset-bearing input: keep the wall-clock components, the zone
            // is supplied separately at render time.
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_local())
        })
}
