//! ICS invite generation.

use crate::error::{MeeticsError, MeeticsResult};
use crate::meeting::{Attendee, MeetingDocument, RenderedArtifact};

const PRODID: &str = "-//meetics//Meeting Invite//EN";
const FALLBACK_BASENAME: &str = "meeting";
const MAX_BASENAME_CHARS: usize = 120;

/// Synthesize the final invite document for a meeting.
///
/// Start, end and last-write timestamps must all have normalized; the
/// creation timestamp is informational and not required. The event block's
/// field order is fixed — receiving calendar clients are fussy about it.
pub fn synthesize(doc: &MeetingDocument) -> MeeticsResult<RenderedArtifact> {
    let start = doc.start.ok_or(MeeticsError::UnparseableDate("start_date"))?;
    let end = doc.end.ok_or(MeeticsError::UnparseableDate("end_date"))?;
    let updated = doc.updated.ok_or(MeeticsError::UnparseableDate("write_date"))?;

    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:REQUEST".to_string(),
        "BEGIN:VTIMEZONE".to_string(),
        format!("TZID:{}", doc.tzid),
        format!("X-LIC-LOCATION:{}", doc.tzid),
        "BEGIN:STANDARD".to_string(),
        "DTSTART:19700101T000000".to_string(),
        format!("TZOFFSETFROM:{}", doc.utc_offset),
        format!("TZOFFSETTO:{}", doc.utc_offset),
        format!("TZNAME:{}", doc.tzid),
        "END:STANDARD".to_string(),
        "END:VTIMEZONE".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", doc.uid),
        format!("SEQUENCE:{}", doc.sequence),
        format!("SUMMARY:{}", escape_text(&doc.summary)),
        format!("DTSTAMP:{}", updated.to_ics()),
        format!("LAST-MODIFIED:{}", updated.to_ics()),
        format!("DTSTART;TZID={}:{}", doc.tzid, start.to_ics()),
        format!("DTEND;TZID={}:{}", doc.tzid, end.to_ics()),
        format!("LOCATION:{}", escape_text(&doc.location)),
        format!("DESCRIPTION:{}", escape_text(&doc.description)),
        format!(
            "ORGANIZER;PARTSTAT=ACCEPTED;CN=\"{}\":mailto:{}",
            escape_text(&doc.organizer.name),
            doc.organizer.email
        ),
    ];
    lines.extend(attendee_lines(&doc.attendees));
    lines.extend([
        "BEGIN:VALARM".to_string(),
        format!("TRIGGER:-PT{}M", doc.reminder_minutes),
        "ACTION:DISPLAY".to_string(),
        "DESCRIPTION:Reminder".to_string(),
        "END:VALARM".to_string(),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ]);

    let mut content = lines.join("\r\n");
    content.push_str("\r\n");

    Ok(RenderedArtifact {
        filename: derive_filename(&doc.summary),
        content,
    })
}

/// Escape free text for interpolation into a property value.
///
/// Backslashes first, so the escapes introduced by the newline, comma and
/// semicolon rules are not themselves re-escaped.
fn escape_text(v: &str) -> String {
    v.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

/// One invitation line per attendee with a usable email address.
fn attendee_lines(attendees: &[Attendee]) -> Vec<String> {
    attendees
        .iter()
        .filter(|a| !a.email.is_empty())
        .map(|a| {
            format!(
                "ATTENDEE;ROLE=REQ-PARTICIPANT;RSVP=TRUE;CN=\"{}\":mailto:{}",
                escape_text(&a.name),
                a.email
            )
        })
        .collect()
}

/// Derive a download filename from the raw subject.
fn derive_filename(summary: &str) -> String {
    let base = if summary.is_empty() {
        FALLBACK_BASENAME
    } else {
        summary
    };
    let sanitized: String = base
        .chars()
        .map(|c| match c {
            '/' | '\\' | '?' | '%' | '*' | ':' | '|' | '"' | '<' | '>' => '_',
            other => other,
        })
        .take(MAX_BASENAME_CHARS)
        .collect();

    format!("{sanitized}.ics")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::normalize;

    fn make_test_document() -> MeetingDocument {
        MeetingDocument {
            uid: "meeting-42".to_string(),
            summary: "Planning".to_string(),
            location: "Room 4".to_string(),
            description: "Agenda attached".to_string(),
            organizer: Attendee {
                name: "Organizer".to_string(),
                email: "organizer@x.com".to_string(),
            },
            attendees: vec![],
            start: normalize("2024-03-20 15:00:00"),
            end: normalize("2024-03-20 16:00:00"),
            created: normalize("2024-03-01 09:00:00"),
            updated: normalize("2024-03-02 09:00:00"),
            sequence: 3,
            reminder_minutes: 15,
            tzid: "Asia/Singapore".to_string(),
            utc_offset: "+0800".to_string(),
        }
    }

    #[test]
    fn event_block_field_order_is_fixed() {
        let artifact = synthesize(&make_test_document()).unwrap();
        let expected = [
            "BEGIN:VCALENDAR",
            "VERSION:2.0",
            "PRODID:-//meetics//Meeting Invite//EN",
            "CALSCALE:GREGORIAN",
            "METHOD:REQUEST",
            "BEGIN:VTIMEZONE",
            "TZID:Asia/Singapore",
            "X-LIC-LOCATION:Asia/Singapore",
            "BEGIN:STANDARD",
            "DTSTART:19700101T000000",
            "TZOFFSETFROM:+0800",
            "TZOFFSETTO:+0800",
            "TZNAME:Asia/Singapore",
            "END:STANDARD",
            "END:VTIMEZONE",
            "BEGIN:VEVENT",
            "UID:meeting-42",
            "SEQUENCE:3",
            "SUMMARY:Planning",
            "DTSTAMP:20240302T090000",
            "LAST-MODIFIED:20240302T090000",
            "DTSTART;TZID=Asia/Singapore:20240320T150000",
            "DTEND;TZID=Asia/Singapore:20240320T160000",
            "LOCATION:Room 4",
            "DESCRIPTION:Agenda attached",
            "ORGANIZER;PARTSTAT=ACCEPTED;CN=\"Organizer\":mailto:organizer@x.com",
            "BEGIN:VALARM",
            "TRIGGER:-PT15M",
            "ACTION:DISPLAY",
            "DESCRIPTION:Reminder",
            "END:VALARM",
            "END:VEVENT",
            "END:VCALENDAR",
        ];
        let lines: Vec<&str> = artifact.content.lines().collect();
        assert_eq!(lines, expected);
        assert!(artifact.content.ends_with("END:VCALENDAR\r\n"));
        assert!(!artifact.content.contains("\r\n\r\n"), "no blank lines");
    }

    #[test]
    fn missing_required_dates_are_fatal() {
        for field in ["start_date", "end_date", "write_date"] {
            let mut doc = make_test_document();
            match field {
                "start_date" => doc.start = None,
                "end_date" => doc.end = None,
                _ => doc.updated = None,
            }
            let err = synthesize(&doc).unwrap_err();
            assert!(
                matches!(err, MeeticsError::UnparseableDate(f) if f == field),
                "wrong error for {field}: {err}"
            );
        }
    }

    #[test]
    fn missing_create_date_is_not_fatal() {
        let mut doc = make_test_document();
        doc.created = None;
        assert!(synthesize(&doc).is_ok());
    }

    #[test]
    fn escaping_applies_once_per_character_backslash_first() {
        assert_eq!(escape_text("a\\b"), "a\\\\b");
        assert_eq!(escape_text("a\nb"), "a\\nb");
        assert_eq!(escape_text("a,b"), "a\\,b");
        assert_eq!(escape_text("a;b"), "a\\;b");
        // A backslash alongside the other specials: the doubled backslash
        // must not swallow the escapes added afterwards.
        assert_eq!(escape_text("\\,;\n"), "\\\\\\,\\;\\n");
    }

    #[test]
    fn summary_with_specials_renders_one_escape_each() {
        let mut doc = make_test_document();
        doc.summary = "a\\b,c;d\ne".to_string();
        let artifact = synthesize(&doc).unwrap();
        let summary_line = artifact
            .content
            .lines()
            .find(|l| l.starts_with("SUMMARY:"))
            .unwrap();
        assert_eq!(summary_line, "SUMMARY:a\\\\b\\,c\\;d\\ne");
    }

    #[test]
    fn attendees_without_email_are_skipped() {
        let mut doc = make_test_document();
        doc.attendees = vec![
            Attendee {
                name: "Has Email".to_string(),
                email: "has@x.com".to_string(),
            },
            Attendee {
                name: "No Email".to_string(),
                email: String::new(),
            },
        ];
        let artifact = synthesize(&doc).unwrap();
        let attendee_lines: Vec<&str> = artifact
            .content
            .lines()
            .filter(|l| l.starts_with("ATTENDEE"))
            .collect();
        assert_eq!(
            attendee_lines,
            vec!["ATTENDEE;ROLE=REQ-PARTICIPANT;RSVP=TRUE;CN=\"Has Email\":mailto:has@x.com"]
        );
    }

    #[test]
    fn two_attendees_render_two_lines_in_order() {
        let attendees = vec![
            Attendee {
                name: "B".to_string(),
                email: "b@x.com".to_string(),
            },
            Attendee {
                name: "A".to_string(),
                email: "a@x.com".to_string(),
            },
        ];
        let lines = attendee_lines(&attendees);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("mailto:b@x.com"));
        assert!(lines[1].ends_with("mailto:a@x.com"));
        // Joined form: single separator, nothing trailing.
        assert_eq!(
            lines.join("\n"),
            format!("{}\n{}", lines[0], lines[1])
        );
    }

    #[test]
    fn filename_replaces_reserved_characters() {
        assert_eq!(derive_filename("Q4 Review/Plan?"), "Q4 Review_Plan_.ics");
        assert_eq!(derive_filename(r#"a\b:c|d"e<f>g%h*i"#), "a_b_c_d_e_f_g_h_i.ics");
    }

    #[test]
    fn filename_falls_back_and_truncates() {
        assert_eq!(derive_filename(""), "meeting.ics");
        let long = "x".repeat(200);
        let name = derive_filename(&long);
        assert_eq!(name.len(), 120 + ".ics".len());
    }
}
