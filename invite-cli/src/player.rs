//! Terminal media backend.
//!
//! Music is played by an external player binary (`mpv` or `ffplay`) found on
//! `PATH`. The terminal has no browser autoplay policy, so one is imposed
//! here: playback is refused until the user has pressed a key, unless
//! `[audio] autoplay` is set.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use async_trait::async_trait;
use invite_core::audio::{Gesture, GestureSignals, MediaBackend, MediaResource, PlayOutcome, Track};
use tokio::process::{Child, Command};
use tracing::{debug, trace, warn};

/// Players tried in order when none is configured.
const KNOWN_PLAYERS: [&str; 2] = ["mpv", "ffplay"];

/// Locate the configured player, or the first known player on `PATH`.
pub fn find_player(configured: Option<&str>) -> Result<PathBuf> {
    if let Some(name) = configured {
        return which::which(name).with_context(|| format!("Player '{}' not found on PATH", name));
    }

    KNOWN_PLAYERS
        .iter()
        .find_map(|name| which::which(name).ok())
        .with_context(|| {
            format!(
                "No audio player found. Install one of: {}",
                KNOWN_PLAYERS.join(", ")
            )
        })
}

/// A player binary and the arguments that play one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl PlayerCommand {
    /// Arguments for a known player; anything else gets the source alone.
    pub fn for_program(program: PathBuf, track: &Track) -> Self {
        let name = program
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();

        let mut args: Vec<String> = match name.as_str() {
            "mpv" => {
                let mut args = vec!["--no-video".to_string(), "--no-terminal".to_string()];
                if track.looping {
                    args.push("--loop-file=inf".to_string());
                }
                args
            }
            "ffplay" => {
                let mut args = vec![
                    "-nodisp".to_string(),
                    "-loglevel".to_string(),
                    "quiet".to_string(),
                ];
                if track.looping {
                    args.extend(["-loop".to_string(), "0".to_string()]);
                }
                args
            }
            _ => Vec::new(),
        };
        args.push(track.source.clone());

        PlayerCommand { program, args }
    }
}

/// Set once the user has interacted with the terminal.
#[derive(Debug, Clone, Default)]
pub struct UserActivation(Arc<AtomicBool>);

impl UserActivation {
    pub fn new(active: bool) -> Self {
        UserActivation(Arc::new(AtomicBool::new(active)))
    }

    pub fn activate(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Spawns one player process per play attempt.
#[derive(Debug)]
pub struct ProcessBackend {
    program: PathBuf,
    activation: UserActivation,
}

impl ProcessBackend {
    pub fn new(program: PathBuf, activation: UserActivation) -> Self {
        ProcessBackend {
            program,
            activation,
        }
    }
}

impl MediaBackend for ProcessBackend {
    type Resource = PlayerProcess;

    fn create(&self, track: &Track) -> PlayerProcess {
        debug!(player = %self.program.display(), source = %track.source, "media resource created");
        PlayerProcess {
            player: PlayerCommand::for_program(self.program.clone(), track),
            activation: self.activation.clone(),
            child: None,
        }
    }
}

/// The running player, if any.
///
/// Pausing stops the process; resuming starts the track again from the top.
#[derive(Debug)]
pub struct PlayerProcess {
    player: PlayerCommand,
    activation: UserActivation,
    child: Option<Child>,
}

impl PlayerProcess {
    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.child.is_some()
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                warn!("Failed to stop player: {}", e);
            }
        }
    }
}

#[async_trait]
impl MediaResource for PlayerProcess {
    async fn play(&mut self) -> PlayOutcome {
        if let Some(child) = self.child.as_mut() {
            // A player that already exited is started again.
            if let Ok(None) = child.try_wait() {
                return PlayOutcome::Started;
            }
            self.child = None;
        }
        if !self.activation.is_active() {
            debug!("no user activation yet, refusing playback");
            return PlayOutcome::Denied;
        }

        let spawned = Command::new(&self.player.program)
            .args(&self.player.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();

        match spawned {
            Ok(child) => {
                self.child = Some(child);
                PlayOutcome::Started
            }
            Err(e) => {
                warn!("Failed to spawn {}: {}", self.player.program.display(), e);
                PlayOutcome::Denied
            }
        }
    }

    fn pause(&mut self) {
        self.stop();
    }

    fn release(&mut self) {
        self.stop();
    }
}

/// Key presses are the only gesture a terminal can observe.
#[derive(Debug, Clone, Default)]
pub struct TerminalGestures {
    keys: Arc<AtomicBool>,
}

impl TerminalGestures {
    /// Whether key presses should currently be forwarded as gestures.
    pub fn keys_attached(&self) -> bool {
        self.keys.load(Ordering::SeqCst)
    }
}

impl GestureSignals for TerminalGestures {
    fn attach(&mut self, gestures: &[Gesture]) {
        if gestures.contains(&Gesture::KeyDown) {
            self.keys.store(true, Ordering::SeqCst);
        }
        trace!(?gestures, "gesture listeners attached");
    }

    fn detach(&mut self, gestures: &[Gesture]) {
        if gestures.contains(&Gesture::KeyDown) {
            self.keys.store(false, Ordering::SeqCst);
        }
        trace!(?gestures, "gesture listeners detached");
    }
}

/// The player is a separate process; a missing file would only show up as silence.
pub fn ensure_source(track: &Track) -> Result<()> {
    if !Path::new(&track.source).is_file() {
        anyhow::bail!("Audio file not found at {}", track.source);
    }
    Ok(())
}
