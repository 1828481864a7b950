use anyhow::Result;
use invite_core::event::Event;
use invite_core::links::build_calendar_link_url;

pub fn run(event: &Event) -> Result<()> {
    println!("{}", build_calendar_link_url(event));
    Ok(())
}
