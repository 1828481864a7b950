use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use invite_core::clock::SystemClock;
use invite_core::countdown::{Countdown, CountdownEngine, Tick};
use invite_core::event::Event;
use tokio::sync::watch;

use crate::render::Render;

pub async fn run(event: &Event, period: Duration, once: bool) -> Result<()> {
    let engine = CountdownEngine::for_event(event, Arc::new(SystemClock));

    if once {
        println!("{}", engine.sample().render());
        return Ok(());
    }

    println!("{}", event.render());
    println!();

    let countdown = Countdown::start(engine, period);
    let mut ticks = countdown.subscribe();

    let interrupted = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    follow(&mut ticks, &mut std::io::stdout(), interrupted).await?;

    println!();
    countdown.stop().await;
    Ok(())
}

/// Redraw one line per tick until the target is reached or `stop` resolves.
///
/// `stop` is polled across iterations, so a signal that arrives between two
/// ticks is never lost.
async fn follow<W: Write>(
    ticks: &mut watch::Receiver<Tick>,
    out: &mut W,
    stop: impl Future<Output = ()>,
) -> Result<()> {
    tokio::pin!(stop);

    loop {
        tokio::select! {
            changed = ticks.changed() => {
                if changed.is_err() {
                    break;
                }
                let tick = *ticks.borrow_and_update();

                // Clear the line; the previous reading may have been longer.
                write!(out, "\r\x1b[2K   {}", tick.remaining.render())?;
                out.flush()?;

                if tick.remaining.reached {
                    break;
                }
            }
            _ = &mut stop => break,
        }
    }

    Ok(())
}
