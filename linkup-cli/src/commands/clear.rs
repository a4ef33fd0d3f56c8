use anyhow::Result;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::utils::tui::confirm;

pub fn run(ctx: &Context, yes: bool) -> Result<()> {
    if !confirm(
        "Clear all local events, friends, likes and RSVPs? This cannot be undone",
        yes,
    )? {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    ctx.store.clear()?;
    println!("{}", "All local data cleared".yellow());
    Ok(())
}
