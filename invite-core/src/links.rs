//! Deep links into third-party services.

use crate::constants::{GOOGLE_CALENDAR_TEMPLATE_URL, WHATSAPP_SHARE_URL};
use crate::event::Event;
use crate::ics::utc_stamp;

/// Google Calendar "add event" link for `event`.
///
/// `text`, `details` and `location` are percent-encoded independently.
/// `dates` is `START/END` in UTC, the same stamps the calendar file uses.
pub fn build_calendar_link_url(event: &Event) -> String {
    let dates = format!(
        "{}/{}",
        utc_stamp(event.start_utc()),
        utc_stamp(event.end_utc())
    );

    format!(
        "{}&text={}&dates={}&details={}&location={}",
        GOOGLE_CALENDAR_TEMPLATE_URL,
        urlencoding::encode(event.title()),
        dates,
        urlencoding::encode(event.description()),
        urlencoding::encode(event.location()),
    )
}

/// WhatsApp link that opens a chat picker with `message` prefilled.
pub fn build_whatsapp_url(message: &str) -> String {
    format!("{}?text={}", WHATSAPP_SHARE_URL, urlencoding::encode(message))
}
