//! Waifu tracker CLI - database migrations and search tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! waifu-cli migrate
//!
//! # Run a character search against the live lookup service
//! waifu-cli search "Rei Saiga"
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `search` - Print ranked search results

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "waifu-cli")]
#[command(author, version, about = "Waifu tracker CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Search the character database and print the ranked results
    Search {
        /// Name, nickname or handle to look for
        name: String,

        /// Print the expanded queries before searching
        #[arg(short, long)]
        verbose: bool,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Search { name, verbose } => commands::search::run(&name, verbose).await?,
    }
    Ok(())
}
