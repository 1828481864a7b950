//! Invitation configuration.
//!
//! Read from `~/.config/invite/config.toml` (or an explicit path). Every key is
//! optional; anything left out falls back to the built-in invitation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, File, FileFormat};
use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::audio::Track;
use crate::error::{InviteError, InviteResult};
use crate::event::{Event, EventDetails};

const DEFAULT_RSVP_URL: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLSeN676HNrBoiZBcpUEOIPDOuWXZvnEV74snclkI2Fn7DSKLCw/viewform";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InviteConfig {
    /// Third-party RSVP form guests are sent to
    pub rsvp_url: String,

    /// Public address of the invitation page, appended to share messages
    #[serde(skip_serializing_if = "String::is_empty")]
    pub page_url: String,

    pub event: EventConfig,
    pub countdown: CountdownConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    pub title: String,
    pub hosts: String,
    pub description: String,
    pub location: String,
    /// RFC 3339 instant with an explicit offset
    pub start: String,
    pub end: String,
    /// IANA zone name, e.g. "America/Argentina/Buenos_Aires"
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Milliseconds between countdown samples
    pub tick_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Background music file, `~` expanded
    pub source: String,

    /// Start without waiting for a key press
    pub autoplay: bool,

    /// Player binary; the first known player on `PATH` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
}

impl Default for EventConfig {
    fn default() -> Self {
        EventConfig {
            identity: Some("Boda-Jacqueline-Braian".to_string()),
            title: "Boda de Jacqueline & Braian".to_string(),
            hosts: "Jacqueline & Braian".to_string(),
            description: "Este día especial será aún más único con tu compañía.".to_string(),
            location: "Lugar a confirmar, Buenos Aires, Argentina".to_string(),
            start: "2026-02-21T17:00:00-03:00".to_string(),
            end: "2026-02-22T02:00:00-03:00".to_string(),
            timezone: "America/Argentina/Buenos_Aires".to_string(),
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        CountdownConfig { tick_ms: 1000 }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            source: "music.mp3".to_string(),
            autoplay: false,
            player: None,
        }
    }
}

impl InviteConfig {
    /// `~/.config/invite/config.toml`
    pub fn default_path() -> InviteResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| InviteError::Config("Could not determine config directory".into()))?
            .join("invite");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and a missing file means built-in defaults.
    pub fn load(path: Option<&str>) -> InviteResult<Self> {
        match path {
            Some(p) => {
                let path = PathBuf::from(shellexpand::tilde(p).into_owned());
                if !path.exists() {
                    return Err(InviteError::Config(format!(
                        "Config file not found at {}",
                        path.display()
                    )));
                }
                Self::from_file(&path)
            }
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    debug!(path = %path.display(), "no config file, using built-in invitation");
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> InviteResult<Self> {
        debug!(path = %path.display(), "loading config");

        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()
            .map_err(|e| InviteError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| InviteError::Config(e.to_string()))
    }

    /// Validate the `[event]` section into an [`Event`].
    pub fn event(&self) -> InviteResult<Event> {
        let timezone: Tz = self.event.timezone.parse().map_err(|e| {
            InviteError::Config(format!(
                "Unknown timezone '{}': {}",
                self.event.timezone, e
            ))
        })?;

        Event::new(EventDetails {
            identity: self.event.identity.clone(),
            title: self.event.title.clone(),
            hosts: self.event.hosts.clone(),
            description: self.event.description.clone(),
            location: self.event.location.clone(),
            start: parse_instant("start", &self.event.start)?,
            end: parse_instant("end", &self.event.end)?,
            timezone,
        })
    }

    pub fn tick_period(&self) -> InviteResult<Duration> {
        if self.countdown.tick_ms == 0 {
            return Err(InviteError::Config(
                "countdown.tick_ms must be greater than zero".into(),
            ));
        }
        Ok(Duration::from_millis(self.countdown.tick_ms))
    }

    /// The background track, with `~` in its source expanded.
    pub fn track(&self) -> Track {
        Track::new(&shellexpand::tilde(&self.audio.source))
    }

    /// Effective configuration as TOML.
    pub fn to_toml(&self) -> InviteResult<String> {
        toml::to_string_pretty(self).map_err(|e| InviteError::Config(e.to_string()))
    }
}

impl Default for InviteConfig {
    fn default() -> Self {
        InviteConfig {
            rsvp_url: DEFAULT_RSVP_URL.to_string(),
            page_url: String::new(),
            event: EventConfig::default(),
            countdown: CountdownConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

/// Instants must carry their own offset; a bare local time is ambiguous.
fn parse_instant(field: &str, value: &str) -> InviteResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|e| {
        InviteError::Config(format!(
            "event.{} '{}' is not an RFC 3339 instant with offset: {}",
            field, value, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_builds_reference_event() {
        let config = InviteConfig::default();
        let event = config.event().unwrap();

        assert_eq!(event.identity(), "Boda-Jacqueline-Braian");
        assert_eq!(event.start_utc().to_rfc3339(), "2026-02-21T20:00:00+00:00");
        assert_eq!(config.tick_period().unwrap(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_keys() {
        let file = write_config(
            r#"
page_url = "https://example.com/boda"

[event]
title = "Fiesta"
start = "2026-03-01T21:00:00-03:00"
end = "2026-03-02T04:00:00-03:00"
"#,
        );

        let config = InviteConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.page_url, "https://example.com/boda");
        assert_eq!(config.event.title, "Fiesta");
        assert_eq!(config.event.hosts, "Jacqueline & Braian");
        assert_eq!(config.countdown.tick_ms, 1000);

        let event = config.event().unwrap();
        assert_eq!(event.start_utc().to_rfc3339(), "2026-03-02T00:00:00+00:00");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = InviteConfig::load(Some("/nonexistent/invite/config.toml")).unwrap_err();
        assert!(matches!(err, InviteError::Config(_)), "got {:?}", err);
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let mut config = InviteConfig::default();
        config.event.timezone = "Mars/Olympus_Mons".to_string();

        let err = config.event().unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus_Mons"));
    }

    #[test]
    fn test_inverted_event_in_file_fails_fast() {
        let file = write_config(
            r#"
[event]
start = "2026-02-22T02:00:00-03:00"
end = "2026-02-21T17:00:00-03:00"
"#,
        );

        let config = InviteConfig::load(file.path().to_str()).unwrap();
        assert!(matches!(config.event(), Err(InviteError::InvalidEvent(_))));
    }

    #[test]
    fn test_instant_without_offset_is_rejected() {
        let mut config = InviteConfig::default();
        config.event.start = "2026-02-21T17:00:00".to_string();

        let err = config.event().unwrap_err();
        assert!(matches!(err, InviteError::Config(_)), "got {:?}", err);
    }

    #[test]
    fn test_zero_tick_is_rejected() {
        let mut config = InviteConfig::default();
        config.countdown.tick_ms = 0;
        assert!(config.tick_period().is_err());
    }

    #[test]
    fn test_audio_section_builds_looping_track() {
        let file = write_config(
            r#"
[audio]
source = "~/musica/vals.mp3"
autoplay = true
player = "mpv"
"#,
        );

        let config = InviteConfig::load(file.path().to_str()).unwrap();
        assert!(config.audio.autoplay);
        assert_eq!(config.audio.player.as_deref(), Some("mpv"));

        let track = config.track();
        assert!(track.looping);
        assert!(!track.source.starts_with('~'), "got {}", track.source);
        assert!(track.source.ends_with("musica/vals.mp3"), "got {}", track.source);
    }

    #[test]
    fn test_default_audio_waits_for_a_key() {
        let config = InviteConfig::default();
        assert!(!config.audio.autoplay);
        assert_eq!(config.audio.player, None);
        assert_eq!(config.track().source, "music.mp3");
    }

    #[test]
    fn test_to_toml_round_trips_through_load() {
        let config = InviteConfig::default();
        let file = write_config(&config.to_toml().unwrap());

        let loaded = InviteConfig::load(file.path().to_str()).unwrap();
        assert_eq!(loaded.event.title, config.event.title);
        assert_eq!(loaded.event.start, config.event.start);
        assert_eq!(loaded.rsvp_url, config.rsvp_url);
    }
}
