//! Core logic for a one-page event invitation.
//!
//! - `countdown`: time remaining until the event, sampled from a clock
//! - `ics` and `links`: calendar file and "add to calendar" deep link
//! - `share`: invitation message for messaging apps
//! - `audio`: background music under autoplay restrictions

pub mod audio;
pub mod clock;
pub mod config;
pub mod constants;
pub mod countdown;
pub mod error;
pub mod event;
pub mod ics;
pub mod links;
pub mod share;
