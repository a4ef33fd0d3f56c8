use anyhow::Result;
use linkup_core::error::LinkupError;
use linkup_core::feed::{Feed, FeedQuery};
use linkup_core::map::{MapProvider, points_for, select_provider};
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::pluralize;

/// Container id handed to the map provider.
const MAP_CONTAINER: &str = "map";

/// Resolve the feed for `query` and place its events on the selected map.
pub async fn load_map(ctx: &Context, query: &FeedQuery) -> (Feed, Box<dyn MapProvider>) {
    let feed = ctx.feed(query).await;
    let mut map = select_provider(&ctx.config.map, MAP_CONTAINER);
    map.set_markers(points_for(&feed.events));
    (feed, map)
}

pub async fn run(
    ctx: &Context,
    query: &FeedQuery,
    focus: Option<&str>,
    open_browser: bool,
) -> Result<()> {
    let (feed, mut map) = load_map(ctx, query).await;

    let count = map.markers().len();
    println!(
        "{} {}",
        map.name().bold(),
        format!("· {count} {}", pluralize("event", count)).dimmed()
    );
    if count == 0 {
        println!("{}", "No events with a location yet".dimmed());
    }
    for point in map.markers() {
        println!("  📍 {} {}", point.title, point.subtitle.dimmed());
    }

    if let Some(id) = focus {
        let event = feed
            .find(id)
            .ok_or_else(|| LinkupError::EventNotFound(id.to_string()))?;
        let Some((lat, lng)) = event.coordinates() else {
            anyhow::bail!("\"{}\" has no location to show on the map", event.title);
        };
        map.focus(lat, lng, None);
        println!("{}", format!("Focused on {}", event.title).dimmed());
    }

    let url = map.view_url();
    println!();
    println!("{}", url.underline());

    if open_browser && open::that(&url).is_err() {
        println!("{}", "Could not open the browser, copy the link above.".yellow());
    }

    Ok(())
}
