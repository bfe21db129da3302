use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::Context;

pub async fn run(ctx: &Context, email: Option<&str>) -> Result<()> {
    let user = ctx.sign_in(email).await?;
    println!("Signed in as {} <{}>", user.full_name().bold(), user.email);
    Ok(())
}
