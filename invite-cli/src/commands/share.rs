use anyhow::Result;
use invite_core::config::InviteConfig;
use invite_core::event::Event;
use invite_core::links::build_whatsapp_url;
use invite_core::share::build_share_text;
use owo_colors::OwoColorize;

pub fn run(event: &Event, config: &InviteConfig, page_url: Option<String>) -> Result<()> {
    let page_url = page_url.unwrap_or_else(|| config.page_url.clone());
    if page_url.is_empty() {
        tracing::warn!("no page_url configured, the message will not link back to the invitation");
    }

    let text = build_share_text(event, &config.rsvp_url, &page_url);

    println!("{}", text);
    println!();
    println!("{}", "WhatsApp:".bold());
    println!("{}", build_whatsapp_url(&text));

    Ok(())
}
