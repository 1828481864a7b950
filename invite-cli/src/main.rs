mod commands;
mod player;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use invite_core::config::InviteConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "invite")]
#[command(about = "Countdown, calendar export, share links and music for an event invitation")]
struct Cli {
    /// Config file (defaults to ~/.config/invite/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the time left until the event starts
    Countdown {
        /// Print a single reading instead of ticking
        #[arg(long)]
        once: bool,
    },
    /// Write the .ics calendar file
    Ics {
        /// Directory to write into (defaults to the current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the Google Calendar "add event" link
    Link,
    /// Print the invitation message and its WhatsApp link
    Share {
        /// Invitation page URL appended to the message
        #[arg(long)]
        page_url: Option<String>,
    },
    /// Play the background music (Enter toggles, q quits)
    Music,
    /// Show config location and effective values
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config =
        InviteConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // An invalid event is a startup error, not something to limp along with.
    let event = config.event().context("Invalid event in configuration")?;

    match cli.command {
        Commands::Countdown { once } => {
            let period = config.tick_period()?;
            commands::countdown::run(&event, period, once).await
        }
        Commands::Ics { out } => commands::ics::run(&event, out),
        Commands::Link => commands::link::run(&event),
        Commands::Share { page_url } => commands::share::run(&event, &config, page_url),
        Commands::Music => commands::music::run(&config).await,
        Commands::Config => commands::config::run(&config, cli.config.as_deref()),
    }
}
