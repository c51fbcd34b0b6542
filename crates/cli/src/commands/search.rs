//! Character search command.
//!
//! Runs the same pipeline as `GET /search/{name}` against the configured
//! lookup service and prints the ranked table.
//!
//! # Usage
//!
//! ```bash
//! waifu-cli search sinon
//! waifu-cli search "Rei Saiga" --verbose
//! ```

use waifu_tracker_core::ScoredCandidate;
use waifu_tracker_core::matching::SearchQuery;
use waifu_tracker_server::config::{ConfigError, TrackerConfig};
use waifu_tracker_server::lookup::{JikanClient, LookupError};
use waifu_tracker_server::search::search_characters;

/// Errors from the search command.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Lookup client error: {0}")]
    Lookup(#[from] LookupError),
}

fn format_row(rank: usize, candidate: &ScoredCandidate) -> String {
    let nicknames = if candidate.nicknames.is_empty() {
        String::new()
    } else {
        format!(" ({})", candidate.nicknames)
    };
    format!(
        "{rank:>2}. [{:>3}] {} #{}{nicknames}",
        candidate.score, candidate.name, candidate.id
    )
}

/// Search for `name` and print the results.
///
/// # Errors
///
/// Returns `SearchError` if configuration is invalid or the client cannot be built.
pub async fn run(name: &str, verbose: bool) -> Result<(), SearchError> {
    let config = TrackerConfig::from_env()?;
    let client = JikanClient::new(&config.jikan)?;

    #[allow(clippy::print_stdout)]
    {
        if verbose {
            for variant in SearchQuery::new(name).variants() {
                println!("query: {variant}");
            }
        }

        let results = search_characters(&client, name).await;
        if results.is_empty() {
            println!("No characters found for {name:?}");
        }
        for (i, candidate) in results.iter().enumerate() {
            println!("{}", format_row(i + 1, candidate));
        }
    }

    Ok(())
}
