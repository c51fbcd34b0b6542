//! External character lookup.
//!
//! The search pipeline only needs `search(query, page, limit)`; [`JikanClient`]
//! is the production implementation.

mod jikan;

pub use jikan::JikanClient;

use async_trait::async_trait;
use thiserror::Error;
use waifu_tracker_core::CandidateCharacter;

/// Errors from a single lookup call.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// One page of lookup results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupPage {
    pub items: Vec<CandidateCharacter>,
    /// The service refused the request for exceeding its rate limit.
    pub rate_limited: bool,
}

impl LookupPage {
    /// A page carrying results.
    #[must_use]
    pub const fn with_items(items: Vec<CandidateCharacter>) -> Self {
        Self {
            items,
            rate_limited: false,
        }
    }

    /// An empty page signalling rate limiting.
    #[must_use]
    pub const fn rate_limited() -> Self {
        Self {
            items: Vec::new(),
            rate_limited: true,
        }
    }
}

/// A source of candidate characters.
#[async_trait]
pub trait CharacterLookup: Send + Sync {
    /// Fetch one page of characters matching `query`. Pages start at 1.
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<LookupPage, LookupError>;
}
