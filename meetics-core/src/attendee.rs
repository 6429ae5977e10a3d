//! Parsing of raw attendee-list strings.

use crate::meeting::Attendee;
use tracing::warn;

/// Parse a raw attendee-list string into an ordered list of attendees.
///
/// The upstream source sometimes serializes the list with single-quoted
/// dictionary literals instead of strict JSON quoting, so a failed strict
/// parse is retried with every single quote swapped for a double quote.
/// A list that fails both attempts is logged and dropped — a malformed
/// attendee list must not abort the whole conversion.
///
/// Source order is preserved and duplicates are kept as-is.
pub fn parse(raw: &str) -> Vec<Attendee> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match try_parse(trimmed) {
        Ok(attendees) => attendees,
        Err(err) => {
            warn!(input = trimmed, %err, "Discarding unparseable attendee list");
            Vec::new()
        }
    }
}

fn try_parse(s: &str) -> Result<Vec<Attendee>, serde_json::Error> {
    serde_json::from_str(s).or_else(|_| serde_json::from_str(&s.replace('\'', "\"")))
}
