//! TUI rendering traits for invite types.
//!
//! Extension traits that add colored terminal rendering to invite-core
//! types using owo_colors.

use invite_core::audio::AudioPlaybackState;
use invite_core::countdown::RemainingDuration;
use invite_core::event::Event;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for RemainingDuration {
    fn render(&self) -> String {
        if self.reached {
            return "¡Llegó el día!".green().bold().to_string();
        }

        let units = [
            ("DÍAS", self.days.to_string()),
            ("HORAS", format!("{:02}", self.hours)),
            ("MIN", format!("{:02}", self.minutes)),
            ("SEG", format!("{:02}", self.seconds)),
        ];

        units
            .iter()
            .map(|(label, value)| format!("{} {}", value.bold(), label.dimmed()))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let names = self.host_names().join(" & ");
        let mut lines = vec![format!("💍 {}", self.title().bold())];

        if !names.is_empty() && names != self.title() {
            lines.push(format!("   {}", names));
        }
        lines.push(format!("   📅 {}", self.date_badge()).dimmed().to_string());
        lines.push(format!("   📍 {}", self.location()).dimmed().to_string());

        lines.join("\n")
    }
}

impl Render for AudioPlaybackState {
    fn render(&self) -> String {
        match self {
            AudioPlaybackState::Playing => "▶ Sonando".green().to_string(),
            AudioPlaybackState::Paused => "⏸ En pausa".yellow().to_string(),
            AudioPlaybackState::Blocked => "Presioná Enter para escuchar la música"
                .dimmed()
                .to_string(),
            AudioPlaybackState::Uninitialized | AudioPlaybackState::AttemptingAutoplay => {
                "…".dimmed().to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_remaining_shows_all_units() {
        let rendered = RemainingDuration::from_seconds(86_400 + 2 * 3_600 + 3 * 60 + 4).render();

        for label in ["DÍAS", "HORAS", "MIN", "SEG"] {
            assert!(rendered.contains(label), "missing {} in {}", label, rendered);
        }
        assert!(rendered.contains("02"));
        assert!(rendered.contains("04"));
    }

    #[test]
    fn test_render_reached() {
        assert!(RemainingDuration::REACHED.render().contains("Llegó el día"));
    }

    #[test]
    fn test_render_blocked_prompts_for_a_key() {
        assert!(AudioPlaybackState::Blocked.render().contains("Enter"));
        assert!(AudioPlaybackState::Playing.render().contains("Sonando"));
    }
}
