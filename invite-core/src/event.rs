//! The event being announced.
//!
//! An [`Event`] is built once at startup from validated [`EventDetails`] and
//! never changes afterwards. Every exporter reads it by reference.

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;

use crate::error::{InviteError, InviteResult};

/// Raw event fields, before validation.
#[derive(Debug, Clone)]
pub struct EventDetails {
    /// Filename-safe name for exported artifacts. Derived from the title when `None`.
    pub identity: Option<String>,
    pub title: String,
    /// Display names of the hosts, e.g. "Jacqueline & Braian"
    pub hosts: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    /// Zone used to render local dates for guests
    pub timezone: Tz,
}

/// A validated, immutable event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    identity: String,
    title: String,
    hosts: String,
    description: String,
    location: String,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    timezone: Tz,
}

impl Event {
    /// Validate `details` and build the event.
    ///
    /// Fails when the title is blank, when `start` is not strictly before `end`,
    /// or when the identity cannot be used as a file name.
    pub fn new(details: EventDetails) -> InviteResult<Self> {
        let title = details.title.trim().to_string();
        if title.is_empty() {
            return Err(InviteError::InvalidEvent("title must not be empty".into()));
        }

        if details.start >= details.end {
            return Err(InviteError::InvalidEvent(format!(
                "start ({}) must be before end ({})",
                details.start.to_rfc3339(),
                details.end.to_rfc3339()
            )));
        }

        let identity = match details.identity {
            Some(identity) => identity.trim().to_string(),
            None => slug::slugify(&title),
        };
        validate_identity(&identity)?;

        Ok(Event {
            identity,
            title,
            hosts: details.hosts.trim().to_string(),
            description: details.description,
            location: details.location,
            start: details.start,
            end: details.end,
            timezone: details.timezone,
        })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn hosts(&self) -> &str {
        &self.hosts
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Start instant with the offset it was defined in.
    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Start instant as a wall-clock reading in the event's timezone.
    pub fn local_start(&self) -> DateTime<Tz> {
        self.start.with_timezone(&self.timezone)
    }

    /// Individual host names ("Jacqueline & Braian" -> ["Jacqueline", "Braian"]).
    pub fn host_names(&self) -> Vec<&str> {
        self.hosts
            .split('&')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Hero date box, `DD.MM.YYYY` in the event's timezone.
    pub fn date_badge(&self) -> String {
        self.local_start().format("%d.%m.%Y").to_string()
    }
}

/// Identity ends up as `<identity>.ics`, so no path separators or leading dots.
fn validate_identity(identity: &str) -> InviteResult<()> {
    if identity.is_empty() {
        return Err(InviteError::InvalidEvent(
            "identity must not be empty".into(),
        ));
    }

    if identity.starts_with('.') {
        return Err(InviteError::InvalidEvent(format!(
            "identity '{}' must not start with '.'",
            identity
        )));
    }

    if let Some(bad) = identity
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(InviteError::InvalidEvent(format!(
            "identity '{}' contains '{}', only letters, digits, '-', '_' and '.' are allowed",
            identity, bad
        )));
    }

    Ok(())
}
