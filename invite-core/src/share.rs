//! Share message sent to guests through messaging apps.
//!
//! Dates are written for a single audience (es-AR) in the event's own timezone.

use chrono::Datelike;

use crate::event::Event;

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Invitation message with the RSVP form and the page link.
pub fn build_share_text(event: &Event, rsvp_url: &str, page_url: &str) -> String {
    format!(
        "💍 {title}\n\n{description}\n\n📅 {date} – {time}\n📍 {location}\n\nConfirmá tu asistencia: {rsvp}\n\n{page}",
        title = event.title(),
        description = event.description(),
        date = long_date(event),
        time = event.local_start().format("%H:%M"),
        location = event.location(),
        rsvp = rsvp_url,
        page = page_url,
    )
}

/// "21 de febrero de 2026"
fn long_date(event: &Event) -> String {
    let local = event.local_start();
    let month = MONTHS_ES[local.month0() as usize];
    format!("{:02} de {} de {}", local.day(), month, local.year())
}
