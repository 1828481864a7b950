pub mod config;
pub mod countdown;
pub mod ics;
pub mod link;
pub mod music;
pub mod share;
