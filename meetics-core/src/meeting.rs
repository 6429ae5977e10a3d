//! The meeting aggregate consumed by the synthesizer.

use crate::timestamp::CalendarTimestamp;
use serde::{Deserialize, Serialize};

/// A meeting participant (also used for the organizer).
///
/// Attendee lists arrive as loosely-shaped JSON, so both keys are optional
/// in the source and default to empty strings. A record with an empty email
/// is dropped at render time: it cannot produce a valid `mailto:` target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Everything the synthesizer needs to render one invite.
///
/// Constructed once per invocation by [`crate::fields::extract`], consumed
/// exactly once, never mutated. Timestamps that failed normalization are
/// carried as `None`; the synthesizer decides which of them are required.
#[derive(Debug, Clone)]
pub struct MeetingDocument {
    pub uid: String,
    /// Raw subject. Escaped at render time; the filename is derived from
    /// the unescaped form.
    pub summary: String,
    pub location: String,
    pub description: String,
    pub organizer: Attendee,
    pub attendees: Vec<Attendee>,
    pub start: Option<CalendarTimestamp>,
    pub end: Option<CalendarTimestamp>,
    /// Informational only; not rendered and not required for synthesis.
    pub created: Option<CalendarTimestamp>,
    /// Last-write time, rendered as both DTSTAMP and LAST-MODIFIED.
    pub updated: Option<CalendarTimestamp>,
    pub sequence: i64,
    pub reminder_minutes: i64,
    pub tzid: String,
    pub utc_offset: String,
}

/// The final document text plus its derived filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub filename: String,
    pub content: String,
}
