//! Background music under autoplay restrictions.
//!
//! The coordinator owns a single media resource. It tries to start playback on
//! its own; when the environment refuses, it waits for the first user gesture
//! and tries again. A manual toggle is available at any point.
//!
//! The environment is reached only through [`MediaBackend`], [`MediaResource`]
//! and [`GestureSignals`], so the whole state machine runs without a display.

mod coordinator;

pub use coordinator::AudioCoordinator;

use async_trait::async_trait;
use serde::Serialize;

/// Observable playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AudioPlaybackState {
    Uninitialized,
    AttemptingAutoplay,
    Playing,
    Paused,
    /// The environment refused playback without a user gesture.
    Blocked,
}

/// Result of asking the environment to start playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    Denied,
}

/// How eagerly the resource should be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Preload {
    None,
    Metadata,
    Auto,
}

/// The one track the coordinator plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub source: String,
    pub looping: bool,
    pub preload: Preload,
}

impl Track {
    /// Background track: loops forever, preloads eagerly.
    pub fn new(source: &str) -> Self {
        Track {
            source: source.to_string(),
            looping: true,
            preload: Preload::Auto,
        }
    }
}

/// Input classes that satisfy an autoplay restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gesture {
    PointerDown,
    KeyDown,
    Scroll,
}

impl Gesture {
    pub const ALL: [Gesture; 3] = [Gesture::PointerDown, Gesture::KeyDown, Gesture::Scroll];
}

/// Creates the media resource.
pub trait MediaBackend {
    type Resource: MediaResource;

    fn create(&self, track: &Track) -> Self::Resource;
}

/// A playable resource.
#[async_trait]
pub trait MediaResource: Send {
    /// Start playback. Resolves once the environment has accepted or refused.
    async fn play(&mut self) -> PlayOutcome;

    fn pause(&mut self);

    /// Free the underlying resource. Called at most once.
    fn release(&mut self);
}

/// Registration of gesture listeners with the environment.
///
/// The host forwards gestures to [`AudioCoordinator::on_gesture`] while
/// listeners are attached.
pub trait GestureSignals {
    fn attach(&mut self, gestures: &[Gesture]);

    fn detach(&mut self, gestures: &[Gesture]);
}
