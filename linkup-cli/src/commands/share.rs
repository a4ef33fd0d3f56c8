use anyhow::Result;
use linkup_core::share::{native_maps_url, share_url};
use owo_colors::OwoColorize;

use crate::context::Context;

pub async fn run(ctx: &Context, id: &str, open_browser: bool) -> Result<()> {
    let event = ctx.find_event(id).await?;
    let link = share_url(&ctx.config.share_base_url, &event.id);

    println!("{}", event.title.bold());
    println!("  {}", link.underline());
    if let Some(maps) = native_maps_url(&event) {
        println!("  {} {}", "Open in Maps:".dimmed(), maps);
    }

    if open_browser && open::that(&link).is_err() {
        println!("{}", "Could not open the browser, copy the link above.".yellow());
    }

    Ok(())
}
