use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use invite_core::event::Event;
use invite_core::ics::CalendarFile;
use owo_colors::OwoColorize;

pub fn run(event: &Event, out: Option<PathBuf>) -> Result<()> {
    let dir = out.unwrap_or_else(|| PathBuf::from("."));
    let (path, file) = write_calendar(event, &dir)?;

    println!("{}", format!("  Saved: {}", path.display()).green());
    println!("  {}", file.mime_type.dimmed());

    Ok(())
}

/// Write `<identity>.ics` into `dir`, creating it if needed.
fn write_calendar(event: &Event, dir: &Path) -> Result<(PathBuf, CalendarFile)> {
    let file = CalendarFile::for_event(event);

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory at {}", dir.display()))?;

    let path = dir.join(&file.filename);
    std::fs::write(&path, &file.content)
        .with_context(|| format!("Failed to write calendar file at {}", path.display()))?;

    Ok((path, file))
}
