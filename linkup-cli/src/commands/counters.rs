//! Likes and RSVPs. Both are kept on this device only and added on top of the
//! event's stored counts.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::context::Context;

pub async fn like(ctx: &Context, id: &str) -> Result<()> {
    let event = ctx.find_event(id).await?;
    let shown = ctx.overlay().increment_like(&event.id, event.likes)?;
    println!("{} {} {}", "♥".red(), event.title, format!("({shown})").dimmed());
    Ok(())
}

pub async fn rsvp(ctx: &Context, id: &str) -> Result<()> {
    let event = ctx.find_event(id).await?;
    let shown = ctx.overlay().increment_rsvp(&event.id, event.rsvps)?;
    println!(
        "{} {} {}",
        "✓ Going:".green(),
        event.title,
        format!("({shown})").dimmed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkup_core::store::{Events, Likes, LocalStore, Rsvps};
    use linkup_core::Event;

    fn context_with_event() -> Context {
        let store = LocalStore::in_memory();
        let event = Event {
            likes: 2,
            ..Context::sample_event("local_1", "Picnic")
        };
        store.set::<Events>(&vec![event]).unwrap();
        Context::for_tests(store)
    }

    #[tokio::test]
    async fn like_and_rsvp_increment_overlay() {
        let ctx = context_with_event();
        like(&ctx, "local_1").await.unwrap();
        like(&ctx, "local_1").await.unwrap();
        rsvp(&ctx, "local_1").await.unwrap();

        assert_eq!(ctx.store.get::<Likes>().get("local_1"), Some(&2));
        assert_eq!(ctx.store.get::<Rsvps>().get("local_1"), Some(&1));
    }

    #[tokio::test]
    async fn unknown_event_is_an_error() {
        let ctx = context_with_event();
        assert!(like(&ctx, "missing").await.is_err());
        assert!(ctx.store.get::<Likes>().is_empty());
    }
}
