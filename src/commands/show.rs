use anyhow::Result;
use spda_core::SpdaError;
use uuid::Uuid;

use crate::commands::Context;
use crate::render::Render;
use crate::utils::tui::with_spinner;

pub async fn run(ctx: &Context, id: Uuid) -> Result<()> {
    match with_spinner("Loading event", ctx.client.fetch_event_by_id(id)).await {
        Ok(event) => {
            println!("{}", event.render());
            Ok(())
        }
        Err(SpdaError::NotFound(_)) => anyhow::bail!("No event with id {}", id),
        Err(err) => Err(err.into()),
    }
}
