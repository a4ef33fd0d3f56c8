use anyhow::Result;
use clap::Args;
use linkup_core::feed::{DateWindow, FeedQuery, SortOrder};
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::{EventRow, Render, pluralize};

/// Search, date window and sort, shared by every command that shows the feed.
#[derive(Args, Debug, Default)]
pub struct FeedArgs {
    /// Only events whose title or location contain this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Date window: today or week
    #[arg(short, long)]
    pub window: Option<DateWindow>,

    /// Sort order: hot, new or soonest
    #[arg(long, default_value_t = SortOrder::Soonest)]
    pub sort: SortOrder,
}

impl From<FeedArgs> for FeedQuery {
    fn from(args: FeedArgs) -> Self {
        FeedQuery {
            text: args.search,
            window: args.window,
            sort: args.sort,
        }
    }
}

pub async fn run(ctx: &Context, query: &FeedQuery) -> Result<()> {
    let feed = ctx.feed(query).await;

    let count = feed.events.len();
    println!(
        "{} {}",
        format!("{count} {} ·", pluralize("event", count)).dimmed(),
        feed.provenance.render()
    );

    if feed.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in &feed.events {
        println!();
        println!(
            "{}",
            EventRow {
                event,
                overlay: &feed.overlay,
            }
            .render()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_become_query() {
        let query = FeedQuery::from(FeedArgs {
            search: Some("beach".into()),
            window: Some(DateWindow::Week),
            sort: SortOrder::Hot,
        });
        assert_eq!(query.text.as_deref(), Some("beach"));
        assert_eq!(query.window, Some(DateWindow::Week));
        assert_eq!(query.sort, SortOrder::Hot);
    }
}
