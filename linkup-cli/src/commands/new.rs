use anyhow::Result;
use chrono::{Local, Utc};
use clap::Args;
use dialoguer::Input;
use linkup_core::EventDraft;
use linkup_core::feed::Placement;
use owo_colors::OwoColorize;

use crate::context::Context;

#[derive(Args, Debug, Default)]
pub struct NewArgs {
    /// Event title
    pub title: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Start time (HH:MM)
    #[arg(short, long)]
    pub time: Option<String>,

    /// Where it happens
    #[arg(short, long)]
    pub location: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Ticket price; omit for a free event
    #[arg(short, long)]
    pub price: Option<f64>,

    #[arg(long)]
    pub ticket_url: Option<String>,

    #[arg(long)]
    pub cover_url: Option<String>,

    /// Latitude, used with --lng to place the event on the map
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude, used with --lat
    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,
}

impl NewArgs {
    fn is_complete(&self) -> bool {
        self.title.is_some() && self.date.is_some() && self.time.is_some()
    }

    fn into_draft(self) -> EventDraft {
        EventDraft {
            title: self.title.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            time: self.time.unwrap_or_default(),
            location_text: self.location.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price: self.price,
            ticket_url: self.ticket_url.unwrap_or_default(),
            cover_url: self.cover_url.unwrap_or_default(),
            lat: self.lat,
            lng: self.lng,
        }
    }
}

pub async fn run(ctx: &Context, args: NewArgs) -> Result<()> {
    let interactive = !args.is_complete();
    let args = if interactive { prompt_missing(args)? } else { args };

    let event = args.into_draft().into_event(&Local, Utc::now())?;
    let title = event.title.clone();
    let placement = ctx.synchronizer().create_event(event).await?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {title}").green());
    let saved_to = match &placement {
        Placement::Remote { .. } => "shared event store",
        Placement::Local { .. } => "this device",
    };
    println!("{}", format!("  Saved to {saved_to} [{}]", placement.id()).dimmed());

    Ok(())
}

/// Quick-create: ask for the required fields that were not given on the
/// command line, plus location and price.
fn prompt_missing(mut args: NewArgs) -> Result<NewArgs> {
    if args.title.is_none() {
        args.title = Some(Input::<String>::new().with_prompt("  Title").interact_text()?);
    }

    if args.date.is_none() {
        let today = Local::now().format("%Y-%m-%d").to_string();
        args.date = Some(
            Input::<String>::new()
                .with_prompt("  Date (YYYY-MM-DD)")
                .default(today)
                .interact_text()?,
        );
    }

    if args.time.is_none() {
        args.time = Some(Input::<String>::new().with_prompt("  Time (HH:MM)").interact_text()?);
    }

    if args.location.is_none() {
        args.location = Some(optional_text("  Where? (skip)")?);
    }

    if args.price.is_none() {
        args.price = prompt_with_retry("  Price (free)", parse_price)?;
    }

    Ok(args)
}

fn optional_text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .default(String::new())
        .show_default(false)
        .interact_text()?)
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input = optional_text(prompt)?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Empty input means free.
fn parse_price(input: &str) -> Result<Option<f64>> {
    let input = input.trim().trim_start_matches('$');
    if input.is_empty() {
        return Ok(None);
    }
    let price: f64 = input
        .parse()
        .map_err(|_| anyhow::anyhow!("Price must be a non-negative number."))?;
    if !price.is_finite() || price < 0.0 {
        anyhow::bail!("Price must be a non-negative number.");
    }
    Ok(Some(price))
}
