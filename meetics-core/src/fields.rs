//! Raw field lookup and typed extraction.
//!
//! The field source is an opaque name→string lookup with no schema: any
//! field may be empty, absent, or malformed. Extraction turns that lookup
//! into a [`MeetingDocument`] in one pass, with every default and
//! validation rule centralized here instead of scattered through the
//! synthesis routine.

use crate::attendee;
use crate::meeting::{Attendee, MeetingDocument};
use crate::timestamp::{self, CalendarTimestamp};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

const DEFAULT_TZID: &str = "UTC";
const DEFAULT_UTC_OFFSET: &str = "+0000";
const DEFAULT_COUNT: i64 = 1;

/// An opaque key→string lookup of raw meeting fields.
#[derive(Debug, Clone, Default)]
pub struct RawFields(HashMap<String, String>);

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the lookup from a loosely-typed JSON object.
    ///
    /// Scalar values are coerced to their string form; null values are
    /// treated as absent. Non-object input yields an empty lookup.
    pub fn from_json(value: &Value) -> Self {
        let mut fields = HashMap::new();
        if let Value::Object(map) = value {
            for (key, val) in map {
                let coerced = match val {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    Value::Null => None,
                    // Arrays/objects arrive pre-serialized from the form
                    // layer, but tolerate structured values too.
                    other => Some(other.to_string()),
                };
                if let Some(coerced) = coerced {
                    fields.insert(key.clone(), coerced);
                }
            }
        }
        RawFields(fields)
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// A default substituted for an absent or garbled raw value.
///
/// Recoveries are data, not errors: the pipeline logs them and carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub field: &'static str,
    pub detail: String,
}

/// The extraction result: the document plus what had to be defaulted.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub document: MeetingDocument,
    pub recoveries: Vec<Recovery>,
}

/// Build a [`MeetingDocument`] from the raw lookup.
///
/// Never fails: free-text fields default to empty strings, counts to 1,
/// the timezone to UTC with a zero offset, and a missing meeting id to a
/// generated v4 UUID. Timestamps that fail normalization stay `None`; the
/// synthesizer decides which of them are fatal.
pub fn extract(fields: &RawFields) -> Extraction {
    let mut recoveries = Vec::new();

    let uid = match fields.get("meeting_id").map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            let generated = Uuid::new_v4().to_string();
            recoveries.push(Recovery {
                field: "meeting_id",
                detail: format!("missing, generated {generated}"),
            });
            generated
        }
    };

    let organizer = Attendee {
        name: text(fields, "user_name"),
        email: text(fields, "user_email"),
    };

    let attendee_raw = fields.get("attendee").unwrap_or("");
    let attendees = attendee::parse(attendee_raw);

    let document = MeetingDocument {
        uid,
        summary: text(fields, "subject"),
        location: text(fields, "room_location"),
        description: text(fields, "description"),
        organizer,
        attendees,
        start: date(fields, "start_date"),
        end: date(fields, "end_date"),
        created: date(fields, "create_date"),
        updated: date(fields, "write_date"),
        sequence: count(fields, "version", &mut recoveries),
        reminder_minutes: count(fields, "reminder", &mut recoveries),
        tzid: text_or(fields, "roomTZ", DEFAULT_TZID, &mut recoveries),
        utc_offset: text_or(fields, "tzOffset", DEFAULT_UTC_OFFSET, &mut recoveries),
    };

    Extraction {
        document,
        recoveries,
    }
}

fn text(fields: &RawFields, name: &str) -> String {
    fields.get(name).unwrap_or("").to_string()
}

fn text_or(
    fields: &RawFields,
    name: &'static str,
    default: &str,
    recoveries: &mut Vec<Recovery>,
) -> String {
    match fields.get(name) {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => {
            recoveries.push(Recovery {
                field: name,
                detail: format!("missing, using \"{default}\""),
            });
            default.to_string()
        }
    }
}

fn count(fields: &RawFields, name: &'static str, recoveries: &mut Vec<Recovery>) -> i64 {
    let raw = fields.get(name).unwrap_or("").trim();
    match raw.parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            recoveries.push(Recovery {
                field: name,
                detail: if raw.is_empty() {
                    format!("missing, using {DEFAULT_COUNT}")
                } else {
                    format!("\"{raw}\" is not an integer, using {DEFAULT_COUNT}")
                },
            });
            DEFAULT_COUNT
        }
    }
}

fn date(fields: &RawFields, name: &str) -> Option<CalendarTimestamp> {
    let raw = fields.get(name).unwrap_or("");
    let parsed = timestamp::normalize(raw);
    if parsed.is_none() && !raw.trim().is_empty() {
        warn!(field = name, raw, "Datetime field failed to normalize");
    }
    parsed
}
