mod commands;
mod dates;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spda_core::Category;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::commands::Context;

#[derive(Parser)]
#[command(name = "spda")]
#[command(about = "Browse the weekly events calendar, sign up and post events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a week of events
    Week {
        /// First day of the week (e.g. 2025-05-15, "next mon", default: today)
        #[arg(long)]
        from: Option<String>,

        /// Sign in first to see which events you are signed up for
        #[arg(short, long)]
        login: Option<String>,

        /// Page through weeks interactively
        #[arg(short, long)]
        interactive: bool,
    },
    /// Show a single event
    Show { id: Uuid },
    /// Search events
    Events {
        #[arg(short, long)]
        category: Option<Category>,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        offset: Option<u32>,

        /// Only events created by this email
        #[arg(long)]
        creator: Option<String>,

        /// Only events this email signed up for
        #[arg(long)]
        visitor: Option<String>,

        #[arg(long, allow_hyphen_values = true, requires_all = ["lon", "radius"])]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true, requires_all = ["lat", "radius"])]
        lon: Option<f64>,

        /// Search radius around --lat/--lon
        #[arg(long, requires_all = ["lat", "lon"])]
        radius: Option<f64>,

        /// Starting at or after this date (e.g. 2025-05-15, "tomorrow", RFC 3339)
        #[arg(long)]
        after: Option<String>,

        /// Starting before this date (e.g. 2025-05-15, "tomorrow", RFC 3339)
        #[arg(long)]
        before: Option<String>,
    },
    /// Check your credentials
    Login { email: Option<String> },
    /// Create an account
    Register {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },
    /// Post a new event (requires signing in)
    New {
        title: String,

        /// Start time in UTC (e.g. "2025-03-20 15:00", "fri 6pm", or RFC 3339)
        #[arg(short, long)]
        start: String,

        #[arg(short, long, default_value = "other")]
        category: Category,

        /// Number of seats
        #[arg(long)]
        seats: u32,

        /// Let anyone sign up regardless of seats
        #[arg(long)]
        unlimited: bool,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(short, long)]
        description: Option<String>,

        /// Email to sign in with
        #[arg(short, long)]
        login: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("SPDA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context::load()?;

    match cli.command {
        Commands::Week {
            from,
            login,
            interactive,
        } => {
            let from = from.as_deref().map(dates::parse_date_start).transpose()?;
            commands::week::run(&ctx, from, login.as_deref(), interactive).await
        }
        Commands::Show { id } => commands::show::run(&ctx, id).await,
        Commands::Events {
            category,
            limit,
            offset,
            creator,
            visitor,
            lat,
            lon,
            radius,
            after,
            before,
        } => {
            let filter = commands::events::SearchArgs {
                category,
                limit,
                offset,
                creator,
                visitor,
                near: match (lat, lon, radius) {
                    (Some(lat), Some(lon), Some(radius)) => Some((lat, lon, radius)),
                    _ => None,
                },
                after: after.as_deref().map(dates::parse_date_start).transpose()?,
                before: before.as_deref().map(dates::parse_date_start).transpose()?,
            }
            .into_filter();
            commands::events::run(&ctx, filter).await
        }
        Commands::Login { email } => commands::login::run(&ctx, email.as_deref()).await,
        Commands::Register {
            name,
            last_name,
            email,
        } => commands::register::run(&ctx, name, last_name, email).await,
        Commands::New {
            title,
            start,
            category,
            seats,
            unlimited,
            lat,
            lon,
            description,
            login,
        } => {
            let args = commands::new::NewArgs {
                title,
                start: dates::parse_start(&start)?,
                category,
                seats,
                unlimited,
                lat,
                lon,
                description,
            };
            commands::new::run(&ctx, args, login.as_deref()).await
        }
    }
}
