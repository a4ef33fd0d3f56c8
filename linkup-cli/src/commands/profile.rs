use anyhow::Result;
use linkup_core::profile::{my_events, summarize};
use linkup_core::store::Rsvps;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::{EventRow, Render};

/// Statistics are computed from local data only.
pub fn run(ctx: &Context) -> Result<()> {
    let local = ctx.synchronizer().local_events();
    let summary = summarize(&local, &ctx.store.get::<Rsvps>());

    println!("{}", "Profile".bold());
    println!("{}", summary.render());

    println!();
    println!("{}", "My events".bold());
    let events = my_events(&local);
    if events.is_empty() {
        println!("{}", "  You haven't created any events yet".dimmed());
        return Ok(());
    }

    let overlay = ctx.overlay().snapshot();
    for event in &events {
        println!(
            "{}",
            EventRow {
                event,
                overlay: &overlay,
            }
            .render()
        );
    }
    Ok(())
}
