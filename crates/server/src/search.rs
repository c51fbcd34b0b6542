//! Character search pipeline: expand, aggregate, rank.

use std::collections::HashMap;

use tracing::{info, instrument, warn};
use waifu_tracker_core::matching::{SearchQuery, rank_candidates};
use waifu_tracker_core::{CandidateCharacter, ScoredCandidate};

use crate::lookup::CharacterLookup;

/// Results requested per lookup page.
pub const PAGE_SIZE: u32 = 25;

/// Pages fetched per query variant.
pub const MAX_PAGES: u32 = 2;

/// Run every query variant against the lookup service and merge the results
/// by external id.
///
/// For each variant, pages `1..=MAX_PAGES` are fetched in order. Paging stops
/// for that variant on a rate-limited or empty page. A failed page is logged
/// and skipped. Candidates keep the position of their first sighting; the
/// value is that of the last sighting.
#[instrument(skip(lookup))]
pub async fn aggregate_candidates<L>(lookup: &L, variants: &[String]) -> Vec<CandidateCharacter>
where
    L: CharacterLookup + ?Sized,
{
    let mut order: Vec<CandidateCharacter> = Vec::new();
    let mut position: HashMap<i64, usize> = HashMap::new();

    for query in variants {
        for page in 1..=MAX_PAGES {
            let result = match lookup.search(query, page, PAGE_SIZE).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(query = %query, page, error = %e, "Character lookup failed, skipping page");
                    continue;
                }
            };

            if result.rate_limited {
                warn!(query = %query, page, "Character lookup rate limited");
                break;
            }
            if result.items.is_empty() {
                break;
            }

            for item in result.items {
                match position.get(&item.id) {
                    Some(&idx) => {
                        if let Some(slot) = order.get_mut(idx) {
                            *slot = item;
                        }
                    }
                    None => {
                        position.insert(item.id, order.len());
                        order.push(item);
                    }
                }
            }
        }
    }

    order
}

/// Search for characters matching `raw`, best matches first.
#[instrument(skip(lookup))]
pub async fn search_characters<L>(lookup: &L, raw: &str) -> Vec<ScoredCandidate>
where
    L: CharacterLookup + ?Sized,
{
    let query = SearchQuery::new(raw);
    info!(variants = ?query.variants(), "Expanded search");

    let candidates = aggregate_candidates(lookup, query.variants()).await;
    let candidate_count = candidates.len();
    let ranked = rank_candidates(query.normalized(), candidates);

    if let Some(top) = ranked.first() {
        info!(
            candidates = candidate_count,
            top = %top.name,
            score = top.score,
            "Search ranked"
        );
    } else {
        info!("Search found no candidates");
    }

    ranked
}
