mod commands;
mod context;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use linkup_core::error::LinkupError;
use linkup_core::feed::FeedQuery;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use crate::commands::feed::FeedArgs;
use crate::commands::new::NewArgs;
use crate::context::Context;

#[derive(Parser)]
#[command(name = "linkup")]
#[command(about = "Discover, create and share local events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the event feed
    Feed(FeedArgs),
    /// Create an event (prompts for anything required that is missing)
    New(NewArgs),
    /// Like an event
    Like { id: String },
    /// RSVP to an event
    Rsvp { id: String },
    /// Delete one of your local events
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Manage your friends list
    Friends {
        #[command(subcommand)]
        command: Option<FriendsCommand>,
    },
    /// Your events, RSVPs and estimated earnings
    Profile,
    /// Show events with coordinates on a map
    Map {
        #[command(flatten)]
        filter: FeedArgs,

        /// Center the map on this event
        #[arg(long)]
        focus: Option<String>,

        /// Open the map in the browser
        #[arg(long)]
        open: bool,
    },
    /// Print a shareable link for an event
    Share {
        id: String,

        /// Open the link in the browser
        #[arg(long)]
        open: bool,
    },
    /// Delete all local events, friends, likes and RSVPs
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum FriendsCommand {
    /// List friends (default)
    List,
    /// Add a friend by handle, e.g. @ahmed
    Add { handle: String },
    /// Remove a friend by handle
    Remove { handle: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        match e.downcast_ref::<LinkupError>() {
            Some(err) if err.is_validation() => eprintln!("{}", err.to_string().red()),
            _ => eprintln!("{} {e:#}", "Error:".red()),
        }
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    let ctx = Context::load()?;

    match command {
        Commands::Feed(args) => commands::feed::run(&ctx, &FeedQuery::from(args)).await,
        Commands::New(args) => commands::new::run(&ctx, args).await,
        Commands::Like { id } => commands::counters::like(&ctx, &id).await,
        Commands::Rsvp { id } => commands::counters::rsvp(&ctx, &id).await,
        Commands::Delete { id, yes } => commands::delete::run(&ctx, &id, yes),
        Commands::Friends { command } => match command.unwrap_or(FriendsCommand::List) {
            FriendsCommand::List => commands::friends::list(&ctx),
            FriendsCommand::Add { handle } => commands::friends::add(&ctx, &handle),
            FriendsCommand::Remove { handle } => commands::friends::remove(&ctx, &handle),
        },
        Commands::Profile => commands::profile::run(&ctx),
        Commands::Map {
            filter,
            focus,
            open,
        } => commands::map::run(&ctx, &FeedQuery::from(filter), focus.as_deref(), open).await,
        Commands::Share { id, open } => commands::share::run(&ctx, &id, open).await,
        Commands::Clear { yes } => commands::clear::run(&ctx, yes),
    }
}
