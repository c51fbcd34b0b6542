//! Matching a free-text search against external character records.
//!
//! The pipeline is split in two pure halves around the network call made by
//! the server:
//!
//! 1. [`SearchQuery`] expands what the user typed into the query strings worth
//!    sending to the character database.
//! 2. [`rank_candidates`] scores whatever came back against the original
//!    search and keeps the best [`MAX_RESULTS`].

pub mod expand;
pub mod score;

pub use expand::{SEARCH_ALIASES, SearchQuery};
pub use score::{
    MAX_RESULTS, partial_ratio, rank_candidates, score_candidate, token_sort_ratio,
};
