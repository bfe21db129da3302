use anyhow::Result;
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use spda_core::Category;
use spda_core::client::EventFilter;

use crate::commands::Context;
use crate::render::render_event_line;
use crate::utils::tui::with_spinner;

/// Search options as given on the command line.
pub struct SearchArgs {
    pub category: Option<Category>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub creator: Option<String>,
    pub visitor: Option<String>,
    /// (latitude, longitude, radius)
    pub near: Option<(f64, f64, f64)>,
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
}

impl SearchArgs {
    pub fn into_filter(self) -> EventFilter {
        let mut filter = EventFilter {
            category: self.category,
            limit: self.limit,
            offset: self.offset,
            creator_email: self.creator,
            visitor_email: self.visitor,
            after: self.after,
            before: self.before,
            ..EventFilter::default()
        };

        if let Some((lat, lon, radius)) = self.near {
            filter = filter.near(lat, lon, radius);
        }

        filter
    }
}

pub async fn run(ctx: &Context, filter: EventFilter) -> Result<()> {
    let events = with_spinner("Searching", ctx.client.fetch_events(&filter)).await?;

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("{}", render_event_line(event));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_options_go_together() {
        let filter = SearchArgs {
            category: Some(Category::Party),
            limit: None,
            offset: None,
            creator: None,
            visitor: Some("ada@example.com".to_string()),
            near: Some((55.79, 49.12, 3.0)),
            after: None,
            before: None,
        }
        .into_filter();

        let keys: Vec<&str> = filter.query_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["type", "visitor_email", "lon", "lat", "radius"]);
    }
}
