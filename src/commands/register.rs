use anyhow::Result;
use owo_colors::OwoColorize;
use spda_core::auth;

use crate::commands::Context;
use crate::utils::tui::{prompt_password, prompt_text, with_spinner};

const MIN_PASSWORD_LEN: usize = 8;

pub async fn run(
    ctx: &Context,
    name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let name = name.map(Ok).unwrap_or_else(|| prompt_text("First name"))?;
    let last_name = last_name.map(Ok).unwrap_or_else(|| prompt_text("Last name"))?;
    let email = email.map(Ok).unwrap_or_else(|| prompt_text("Email"))?;

    let password = prompt_password("Password")?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        anyhow::bail!("Password must be at least {} characters", MIN_PASSWORD_LEN);
    }
    if prompt_password("Repeat password")? != password {
        anyhow::bail!("Passwords do not match");
    }

    let user = with_spinner(
        "Creating account",
        auth::sign_up(&ctx.client, &ctx.session, &name, &last_name, &email, &password),
    )
    .await?;

    println!("Welcome, {}!", user.full_name().bold());
    Ok(())
}
