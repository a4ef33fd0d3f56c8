use anyhow::Result;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::utils::tui::confirm;

/// Remove a local event. Events in the remote store cannot be deleted from here.
pub fn run(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    let sync = ctx.synchronizer();
    let Some(event) = sync.local_events().into_iter().find(|e| e.id == id) else {
        anyhow::bail!("No local event with id '{id}'. Only your own events can be deleted.");
    };

    if !confirm(&format!("Delete \"{}\"?", event.title), yes)? {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    sync.delete_local_event(id)?;
    println!("{}", format!("Deleted: {}", event.title).red());
    Ok(())
}
