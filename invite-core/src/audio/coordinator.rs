//! Autoplay state machine.

use tracing::{debug, trace};

use super::{
    AudioPlaybackState, Gesture, GestureSignals, MediaBackend, MediaResource, PlayOutcome, Track,
};

/// Owns the background track and its play state.
///
/// Every transition takes `&mut self`, so a second play attempt can never be
/// issued while one is still being awaited, and state is only committed once
/// the attempt has resolved.
pub struct AudioCoordinator<R: MediaResource, S: GestureSignals> {
    /// `None` once torn down
    resource: Option<R>,
    signals: S,
    state: AudioPlaybackState,
    /// Gesture listeners are currently attached
    listening: bool,
}

impl<R: MediaResource, S: GestureSignals> AudioCoordinator<R, S> {
    /// Create the resource and attempt autoplay.
    ///
    /// A refusal leaves the coordinator `Blocked` with gesture listeners
    /// attached. It is not an error.
    pub async fn initialize<B>(backend: &B, track: &Track, signals: S) -> Self
    where
        B: MediaBackend<Resource = R>,
    {
        let mut coordinator = AudioCoordinator {
            resource: None,
            signals,
            state: AudioPlaybackState::Uninitialized,
            listening: false,
        };

        coordinator.resource = Some(backend.create(track));
        coordinator.state = AudioPlaybackState::AttemptingAutoplay;
        debug!(source = %track.source, "attempting autoplay");

        match coordinator.attempt_play().await {
            PlayOutcome::Started => {
                coordinator.state = AudioPlaybackState::Playing;
                debug!("autoplay started");
            }
            PlayOutcome::Denied => {
                coordinator.state = AudioPlaybackState::Blocked;
                coordinator.start_listening();
                debug!("autoplay blocked, waiting for a user gesture");
            }
        }

        coordinator
    }

    pub fn state(&self) -> AudioPlaybackState {
        self.state
    }

    /// Playing/Paused projection for the toggle control.
    pub fn is_playing(&self) -> bool {
        self.state == AudioPlaybackState::Playing
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_released(&self) -> bool {
        self.resource.is_none()
    }

    /// Handle a user gesture forwarded by the host.
    ///
    /// Only the first successful gesture after a blocked autoplay starts the
    /// music; listeners are detached right after, so later gestures are ignored.
    pub async fn on_gesture(&mut self, gesture: Gesture) {
        if !self.listening || self.state != AudioPlaybackState::Blocked {
            trace!(?gesture, state = ?self.state, "gesture ignored");
            return;
        }

        match self.attempt_play().await {
            PlayOutcome::Started => {
                self.state = AudioPlaybackState::Playing;
                self.stop_listening();
                debug!(?gesture, "playback started on gesture");
            }
            PlayOutcome::Denied => {
                debug!(?gesture, "playback still denied, keep listening");
            }
        }
    }

    /// Manual play/pause.
    ///
    /// A denied play attempt leaves the state unchanged.
    pub async fn toggle(&mut self) {
        if self.resource.is_none() {
            return;
        }

        match self.state {
            AudioPlaybackState::Playing => {
                if let Some(resource) = self.resource.as_mut() {
                    resource.pause();
                }
                self.state = AudioPlaybackState::Paused;
                debug!("paused");
            }
            AudioPlaybackState::Paused | AudioPlaybackState::Blocked => {
                match self.attempt_play().await {
                    PlayOutcome::Started => {
                        self.state = AudioPlaybackState::Playing;
                        self.stop_listening();
                        debug!("resumed");
                    }
                    PlayOutcome::Denied => {
                        debug!(state = ?self.state, "play denied on toggle");
                    }
                }
            }
            AudioPlaybackState::Uninitialized | AudioPlaybackState::AttemptingAutoplay => {}
        }
    }

    /// Stop playback, detach listeners and release the resource.
    ///
    /// Safe to call more than once. Also runs on drop.
    pub fn teardown(&mut self) {
        self.stop_listening();

        if let Some(mut resource) = self.resource.take() {
            resource.pause();
            resource.release();
            if self.state == AudioPlaybackState::Playing {
                self.state = AudioPlaybackState::Paused;
            }
            debug!("audio released");
        }
    }

    async fn attempt_play(&mut self) -> PlayOutcome {
        match self.resource.as_mut() {
            Some(resource) => resource.play().await,
            None => PlayOutcome::Denied,
        }
    }

    fn start_listening(&mut self) {
        if !self.listening {
            self.signals.attach(&Gesture::ALL);
            self.listening = true;
        }
    }

    fn stop_listening(&mut self) {
        if self.listening {
            self.signals.detach(&Gesture::ALL);
            self.listening = false;
        }
    }
}

impl<R: MediaResource, S: GestureSignals> Drop for AudioCoordinator<R, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
