use anyhow::Result;
use chrono::Utc;
use linkup_core::friends::FriendBook;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::Render;

pub fn list(ctx: &Context) -> Result<()> {
    let friends = FriendBook::new(&ctx.store).list();

    if friends.is_empty() {
        println!("{}", "No friends yet. Add one with: linkup friends add @handle".dimmed());
        return Ok(());
    }

    for friend in &friends {
        println!("{}", friend.render());
    }
    Ok(())
}

pub fn add(ctx: &Context, handle: &str) -> Result<()> {
    let friend = FriendBook::new(&ctx.store).add(handle, Utc::now())?;
    println!("{}", format!("Added {}", friend.handle).green());
    Ok(())
}

pub fn remove(ctx: &Context, handle: &str) -> Result<()> {
    match FriendBook::new(&ctx.store).remove(handle)? {
        Some(friend) => println!("{}", format!("Removed {}", friend.handle).yellow()),
        None => println!("{}", format!("{} is not in your friends list", handle.trim()).dimmed()),
    }
    Ok(())
}
