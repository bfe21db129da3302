//! Terminal rendering for calendar types.

use owo_colors::OwoColorize;
use spda_core::calendar::{CalendarEntry, CalendarView, DaySlot};
use spda_core::{Category, Event};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Category {
    fn render(&self) -> String {
        let label = format!("[{}]", self);
        match self {
            Category::Conference | Category::Education => label.blue().to_string(),
            Category::Meetup | Category::Exhibition => label.cyan().to_string(),
            Category::Concert | Category::Party => label.magenta().to_string(),
            Category::Sport | Category::Competition => label.green().to_string(),
            Category::Other => label.dimmed().to_string(),
        }
    }
}

impl Render for CalendarEntry {
    fn render(&self) -> String {
        let time = self.event.start.format("%H:%M").to_string();
        let mark = if self.is_signed_up {
            "✓".green().to_string()
        } else {
            " ".to_string()
        };

        let mut line = format!(
            "{} {} {} {}",
            mark,
            time.dimmed(),
            self.event.title,
            self.event.category.render()
        );
        if self.event.is_full() {
            line.push_str(&format!(" {}", "full".red()));
        }
        line
    }
}

impl Render for DaySlot {
    fn render(&self) -> String {
        let header = format!("{} {}", self.starts_at.format("%a"), self.day_number);
        let mut lines = vec![header.bold().to_string()];

        if self.entries.is_empty() {
            lines.push(format!("  {}", "No events".dimmed()));
        } else {
            lines.extend(self.entries.iter().map(|e| format!("  {}", e.render())));
        }

        lines.join("\n")
    }
}

impl Render for CalendarView {
    fn render(&self) -> String {
        let title = format!(
            "{} → {} (UTC)",
            self.window.after.format("%Y-%m-%d"),
            self.window.before.format("%Y-%m-%d")
        );

        let mut sections = vec![title.dimmed().to_string()];
        sections.extend(self.days.iter().map(|d| d.render()));
        sections.join("\n\n")
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("{} {}", self.title.bold(), self.category.render()),
            format!("{}  {}", "when".dimmed(), self.start.format("%a %b %-d %Y, %H:%M UTC")),
            format!("{} {}", "seats".dimmed(), self.seats_label()),
            format!("{} {}", "by".dimmed(), self.creator_email),
            format!(
                "{} {:.5}, {:.5}",
                "where".dimmed(),
                self.location.latitude,
                self.location.longitude
            ),
        ];

        if let Some(description) = &self.description {
            lines.push(String::new());
            lines.push(description.clone());
        }

        lines.push(String::new());
        lines.push(format!("{}", self.id.dimmed()));
        lines.join("\n")
    }
}

/// One line per event for search results.
pub fn render_event_line(event: &Event) -> String {
    format!(
        "{} {} {} {}",
        event.start.format("%Y-%m-%d %H:%M").dimmed(),
        event.title,
        event.category.render(),
        event.seats_label().dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use spda_core::Location;
    use spda_core::calendar::{Window, build_view};
    use std::collections::HashSet;

    fn event(title: &str) -> Event {
        Event {
            id: uuid::Uuid::nil(),
            title: title.to_string(),
            category: Category::Sport,
            start: Utc.with_ymd_and_hms(2025, 5, 16, 18, 30, 0).unwrap(),
            total_seats: 10,
            available_seats: 0,
            creator_email: "org@example.com".to_string(),
            location: Location::new(55.79, 49.12),
            has_unlimited_seats: false,
            description: Some("Bring shoes".to_string()),
        }
    }

    #[test]
    fn view_lists_every_day() {
        let window = Window::starting_at(Utc.with_ymd_and_hms(2025, 5, 15, 0, 0, 0).unwrap());
        let view = build_view(&window, vec![event("Five-a-side")], &HashSet::new());

        let out = view.render();
        assert!(out.contains("Five-a-side"));
        assert!(out.contains("18:30"));
        assert_eq!(out.matches("No events").count(), 6);
    }

    #[test]
    fn event_details_include_description_and_seats() {
        let out = event("Five-a-side").render();
        assert!(out.contains("Bring shoes"));
        assert!(out.contains("0/10 seats"));
    }
}
