//! Bloom Haven CLI - quotes, catalog and review moderation from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Price a custom money bouquet
//! bh-cli quote --pieces 100 --note-value 500 --wrappers 3 --add-on flower --add-on bow
//!
//! # List catalog packages and their prices
//! bh-cli catalog --category money-tower
//!
//! # Moderate reviews (needs Supabase and moderator credentials)
//! bh-cli reviews list --filter pending
//! bh-cli reviews approve 42
//! bh-cli reviews reject 42 --yes
//! ```
//!
//! # Commands
//!
//! - `quote` - Price a custom bouquet configuration
//! - `catalog` - Show the package catalog
//! - `reviews` - List, approve and reject reviews

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use bloom_haven_core::ReviewFilter;
use bloom_haven_core::catalog::Category;
use bloom_haven_core::pricing::{AddOn, FoamType, NoteValue};

mod commands;

#[derive(Parser)]
#[command(name = "bh-cli")]
#[command(author, version, about = "Bloom Haven CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a custom money bouquet
    Quote {
        /// Number of notes (snapped to steps of 10 between 10 and 200)
        #[arg(short, long, default_value_t = 50)]
        pieces: u32,

        /// Note denomination (200, 500 or 1000)
        #[arg(short, long, default_value = "200")]
        note_value: NoteValue,

        /// Number of wrappers
        #[arg(short, long, default_value_t = 5)]
        wrappers: u32,

        /// Foam base (`half` or `full`)
        #[arg(short, long, default_value = "half")]
        foam: FoamType,

        /// Add-on to include; repeat for several. Without any, all add-ons
        /// are included unless `--no-add-ons` is given.
        #[arg(short, long = "add-on")]
        add_ons: Vec<AddOn>,

        /// Leave out every add-on
        #[arg(long, conflicts_with = "add_ons")]
        no_add_ons: bool,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the package catalog
    Catalog {
        /// Only this category (`money-bouquet`, `money-tower`, `decoration`)
        #[arg(short, long)]
        category: Option<Category>,

        /// Only packages matching this text
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Moderate reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewAction,
    },
}

#[derive(Subcommand)]
enum ReviewAction {
    /// List reviews with moderation stats
    List {
        /// `pending`, `approved` or `all`
        #[arg(short, long, default_value = "pending")]
        filter: ReviewFilter,
    },
    /// Approve a review so it is published
    Approve {
        /// Review ID
        id: i64,
    },
    /// Permanently delete a review
    Reject {
        /// Review ID
        id: i64,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Quote {
            pieces,
            note_value,
            wrappers,
            foam,
            add_ons,
            no_add_ons,
            json,
        } => {
            let config = commands::quote::config(
                pieces,
                note_value,
                wrappers,
                foam,
                &add_ons,
                no_add_ons,
            );
            commands::quote::print(&config, json)?;
        }
        Commands::Catalog { category, query } => commands::catalog::print(category, query),
        Commands::Reviews { action } => match action {
            ReviewAction::List { filter } => commands::reviews::list(filter).await?,
            ReviewAction::Approve { id } => commands::reviews::approve(id).await?,
            ReviewAction::Reject { id, yes } => commands::reviews::reject(id, yes).await?,
        },
    }
    Ok(())
}
