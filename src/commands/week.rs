use anyhow::Result;
use chrono::{DateTime, Utc};
use dialoguer::Select;
use owo_colors::OwoColorize;
use spda_core::client::EventClient;
use spda_core::calendar::{CalendarWindow, RefreshOutcome};

use crate::commands::Context;
use crate::dates;
use crate::render::Render;
use crate::utils::tui::with_spinner;

const NEXT: usize = 0;
const PREVIOUS: usize = 1;

pub async fn run(
    ctx: &Context,
    from: Option<DateTime<Utc>>,
    login: Option<&str>,
    interactive: bool,
) -> Result<()> {
    if let Some(email) = login {
        let user = ctx.sign_in(Some(email)).await?;
        println!("Signed in as {}\n", user.full_name().bold());
    }

    let after = from.unwrap_or_else(dates::start_of_today);
    let calendar = CalendarWindow::new(ctx.client.clone(), ctx.session.reader(), after);

    with_spinner("Loading events", calendar.refresh()).await;
    print_calendar(&calendar);

    if !interactive {
        return Ok(());
    }

    loop {
        println!();
        let choice = Select::new()
            .with_prompt(prompt_label(calendar.focus()))
            .items(&["Next week", "Previous week", "Quit"])
            .default(NEXT)
            .interact()?;

        let outcome = match choice {
            NEXT => with_spinner("Loading events", calendar.shift_forward()).await,
            PREVIOUS => with_spinner("Loading events", calendar.shift_back()).await,
            _ => break,
        };

        if outcome != RefreshOutcome::Superseded {
            println!();
            print_calendar(&calendar);
        }
    }

    Ok(())
}

/// Names the week by its middle day, where the calendar reopens.
fn prompt_label(focus: DateTime<Utc>) -> String {
    format!("  Week around {}", focus.format("%a %-d %b"))
}

fn print_calendar(calendar: &CalendarWindow<EventClient>) {
    if let Some(err) = calendar.last_error() {
        println!(
            "{}",
            format!("Could not load events ({}). Showing the last loaded week.", err).yellow()
        );
        println!();
    }

    println!("{}", calendar.view().render());
}
