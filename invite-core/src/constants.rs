//! Fixed identifiers shared by the exporters.

/// PRODID written into every generated calendar file.
pub const PRODID: &str = "-//Cuatrouno//Invitacion Boda//ES";

/// MIME type of the calendar artifact.
pub const CALENDAR_MIME_TYPE: &str = "text/calendar;charset=utf-8";

/// Google Calendar "add event" action.
pub const GOOGLE_CALENDAR_TEMPLATE_URL: &str =
    "https://calendar.google.com/calendar/render?action=TEMPLATE";

/// WhatsApp share endpoint; the message goes in `text`.
pub const WHATSAPP_SHARE_URL: &str = "https://wa.me/";

/// UTC timestamp layout used by both the calendar file and the deep link.
pub const UTC_STAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";
