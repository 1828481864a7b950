use std::future::Future;
use std::io::Write;

use anyhow::Result;
use invite_core::audio::{AudioCoordinator, Gesture, MediaResource};
use invite_core::config::InviteConfig;
use owo_colors::OwoColorize;
use tokio::sync::mpsc;

use crate::player::{self, ProcessBackend, TerminalGestures, UserActivation};
use crate::render::Render;

pub async fn run(config: &InviteConfig) -> Result<()> {
    let track = config.track();
    player::ensure_source(&track)?;
    let program = player::find_player(config.audio.player.as_deref())?;

    let activation = UserActivation::new(config.audio.autoplay);
    let backend = ProcessBackend::new(program, activation.clone());
    let listeners = TerminalGestures::default();

    let mut coordinator =
        AudioCoordinator::initialize(&backend, &track, listeners.clone()).await;

    println!("{}", format!("♪ {}", track.source).bold());
    println!("{}", "  Enter: play/pause   q + Enter: quit".dimmed());

    let mut keys = spawn_key_reader();
    let interrupted = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    let result = drive(
        &mut coordinator,
        &mut keys,
        &activation,
        &listeners,
        &mut std::io::stdout(),
        interrupted,
    )
    .await;

    coordinator.teardown();
    println!();
    result
}

/// Forward key presses until the user quits, stdin closes or `stop` resolves.
///
/// A key press counts as user activation. While gesture listeners are
/// attached it is delivered as a gesture; otherwise it toggles playback.
async fn drive<R, W>(
    coordinator: &mut AudioCoordinator<R, TerminalGestures>,
    keys: &mut mpsc::Receiver<String>,
    activation: &UserActivation,
    listeners: &TerminalGestures,
    out: &mut W,
    stop: impl Future<Output = ()>,
) -> Result<()>
where
    R: MediaResource,
    W: Write,
{
    tokio::pin!(stop);
    draw(out, coordinator)?;

    loop {
        tokio::select! {
            key = keys.recv() => {
                let Some(key) = key else { break };
                if key.trim().eq_ignore_ascii_case("q") {
                    break;
                }

                activation.activate();
                if listeners.keys_attached() {
                    coordinator.on_gesture(Gesture::KeyDown).await;
                } else {
                    coordinator.toggle().await;
                }
                draw(out, coordinator)?;
            }
            _ = &mut stop => break,
        }
    }

    Ok(())
}

fn draw<R, W>(out: &mut W, coordinator: &AudioCoordinator<R, TerminalGestures>) -> Result<()>
where
    R: MediaResource,
    W: Write,
{
    write!(out, "\r\x1b[2K  {}", coordinator.state().render())?;
    out.flush()?;
    Ok(())
}

/// Read stdin lines on a plain thread. Blocking reads would otherwise hold up
/// runtime shutdown.
fn spawn_key_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(8);
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use invite_core::audio::{AudioPlaybackState, Track};

    struct Session {
        coordinator: AudioCoordinator<player::PlayerProcess, TerminalGestures>,
        activation: UserActivation,
        listeners: TerminalGestures,
        keys: mpsc::Sender<String>,
        rx: mpsc::Receiver<String>,
    }

    /// A blocked session whose "player" is `sleep 30`.
    async fn blocked_session() -> Session {
        let activation = UserActivation::new(false);
        let backend = ProcessBackend::new(which::which("sleep").unwrap(), activation.clone());
        let listeners = TerminalGestures::default();
        let coordinator =
            AudioCoordinator::initialize(&backend, &Track::new("30"), listeners.clone()).await;
        let (keys, rx) = mpsc::channel(8);

        Session {
            coordinator,
            activation,
            listeners,
            keys,
            rx,
        }
    }

    async fn press(session: &mut Session, keys: &[&str]) -> String {
        for key in keys {
            session.keys.send(key.to_string()).await.unwrap();
        }
        session.keys.send("q".to_string()).await.unwrap();

        let mut out = Vec::new();
        drive(
            &mut session.coordinator,
            &mut session.rx,
            &session.activation,
            &session.listeners,
            &mut out,
            std::future::pending(),
        )
        .await
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_first_key_starts_music_second_pauses() {
        let mut session = blocked_session().await;
        assert_eq!(session.coordinator.state(), AudioPlaybackState::Blocked);
        assert!(session.listeners.keys_attached());

        press(&mut session, &[""]).await;
        assert_eq!(session.coordinator.state(), AudioPlaybackState::Playing);
        assert!(!session.listeners.keys_attached());

        press(&mut session, &[""]).await;
        assert_eq!(session.coordinator.state(), AudioPlaybackState::Paused);

        press(&mut session, &[""]).await;
        assert_eq!(session.coordinator.state(), AudioPlaybackState::Playing);

        session.coordinator.teardown();
        assert!(session.coordinator.is_released());
    }

    #[tokio::test]
    async fn test_quit_leaves_state_untouched() {
        let mut session = blocked_session().await;

        let frames = press(&mut session, &[]).await;
        assert_eq!(session.coordinator.state(), AudioPlaybackState::Blocked);
        assert!(!session.activation.is_active());
        assert!(frames.contains("Enter"), "got {:?}", frames);
    }

    #[tokio::test]
    async fn test_closed_input_ends_the_session() {
        let Session {
            mut coordinator,
            activation,
            listeners,
            keys,
            mut rx,
        } = blocked_session().await;
        drop(keys);

        let mut out = Vec::new();
        drive(
            &mut coordinator,
            &mut rx,
            &activation,
            &listeners,
            &mut out,
            std::future::pending(),
        )
        .await
        .unwrap();
        assert_eq!(coordinator.state(), AudioPlaybackState::Blocked);
    }

    #[tokio::test]
    async fn test_stop_signal_ends_the_session() {
        let mut session = blocked_session().await;

        let mut out = Vec::new();
        drive(
            &mut session.coordinator,
            &mut session.rx,
            &session.activation,
            &session.listeners,
            &mut out,
            std::future::ready(()),
        )
        .await
        .unwrap();
        assert_eq!(session.coordinator.state(), AudioPlaybackState::Blocked);
    }
}
