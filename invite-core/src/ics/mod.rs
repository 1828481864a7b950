//! Calendar file generation.
//!
//! Produces the `.ics` payload guests import into their calendar app.
//! Writing it anywhere is left to the caller.

mod generate;

pub use generate::{CalendarFile, build_calendar_file, escape_text, utc_stamp};
