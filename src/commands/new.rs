use anyhow::Result;
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use spda_core::event::NewEvent;
use spda_core::{Category, Location};

use crate::commands::Context;
use crate::render::Render;
use crate::utils::tui::with_spinner;

pub struct NewArgs {
    pub title: String,
    pub start: DateTime<Utc>,
    pub category: Category,
    pub seats: u32,
    pub unlimited: bool,
    pub lat: f64,
    pub lon: f64,
    pub description: Option<String>,
}

impl NewArgs {
    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            anyhow::bail!("Title cannot be empty");
        }
        // The backend rejects events without at least one seat, even unlimited ones
        if self.seats == 0 {
            anyhow::bail!("--seats must be at least 1");
        }
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lon) {
            anyhow::bail!("Location {}, {} is not on the map", self.lat, self.lon);
        }
        Ok(())
    }

    fn into_event(self, creator_email: String) -> NewEvent {
        NewEvent {
            title: self.title.trim().to_string(),
            category: self.category,
            start: self.start,
            total_seats: self.seats,
            creator_email,
            location: Location::new(self.lat, self.lon),
            has_unlimited_seats: self.unlimited,
            description: self.description.filter(|d| !d.trim().is_empty()),
        }
    }
}

pub async fn run(ctx: &Context, args: NewArgs, login: Option<&str>) -> Result<()> {
    args.validate()?;

    let user = ctx.sign_in(login).await?;
    let event = args.into_event(user.email);

    let created = with_spinner("Posting event", ctx.client.create_event(&event)).await?;

    println!("{}\n", "Event created".green());
    println!("{}", created.render());
    Ok(())
}
