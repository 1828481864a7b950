//! ICS file generation.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::constants::{CALENDAR_MIME_TYPE, PRODID, UTC_STAMP_FORMAT};
use crate::event::Event;

/// RFC 5545 §3.1: content lines should not exceed 75 octets.
const MAX_LINE_OCTETS: usize = 75;

/// A downloadable calendar artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFile {
    /// `<identity>.ics`
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl CalendarFile {
    pub fn for_event(event: &Event) -> Self {
        let file = CalendarFile {
            filename: format!("{}.ics", event.identity()),
            mime_type: CALENDAR_MIME_TYPE,
            content: build_calendar_file(event),
        };
        info!(filename = %file.filename, bytes = file.content.len(), "generated calendar file");
        file
    }
}

/// Generate the calendar file for `event`.
///
/// Instants are written in UTC. Text fields are escaped and long lines
/// folded, so the result can be handed to any calendar client as is.
pub fn build_calendar_file(event: &Event) -> String {
    let properties = [
        ("BEGIN", "VCALENDAR".to_string()),
        ("VERSION", "2.0".to_string()),
        ("PRODID", PRODID.to_string()),
        ("CALSCALE", "GREGORIAN".to_string()),
        ("METHOD", "PUBLISH".to_string()),
        ("BEGIN", "VEVENT".to_string()),
        ("DTSTART", utc_stamp(event.start_utc())),
        ("DTEND", utc_stamp(event.end_utc())),
        ("SUMMARY", escape_text(event.title())),
        ("DESCRIPTION", escape_text(event.description())),
        ("LOCATION", escape_text(event.location())),
        ("END", "VEVENT".to_string()),
        ("END", "VCALENDAR".to_string()),
    ];

    let mut output = String::new();
    for (name, value) in &properties {
        push_content_line(&mut output, &format!("{}:{}", name, value));
    }
    output
}

/// `YYYYMMDDTHHMMSSZ`
pub fn utc_stamp(instant: DateTime<Utc>) -> String {
    instant.format(UTC_STAMP_FORMAT).to_string()
}

/// Escape a TEXT value (RFC 5545 §3.3.11).
///
/// Every newline form becomes a literal `\n`. Other control characters
/// are not allowed in TEXT and are dropped.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                escaped.push_str("\\n");
            }
            '\n' => escaped.push_str("\\n"),
            c if c.is_control() && c != '\t' => {}
            c => escaped.push(c),
        }
    }

    escaped
}

/// Append `line` terminated by CRLF, folding it at 75 octets.
/// Continuation lines start with a single space and never split a character.
fn push_content_line(output: &mut String, line: &str) {
    let mut octets = 0;

    for c in line.chars() {
        let width = c.len_utf8();
        if octets + width > MAX_LINE_OCTETS {
            output.push_str("\r\n ");
            octets = 1;
        }
        output.push(c);
        octets += width;
    }

    output.push_str("\r\n");
}
