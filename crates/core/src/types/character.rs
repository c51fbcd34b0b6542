//! Characters returned by the external character database.

use serde::{Deserialize, Serialize};

/// Number of nicknames shown on a scored search result.
pub const DISPLAYED_NICKNAMES: usize = 3;

/// A character candidate as returned by the lookup service.
///
/// Identity is the external `id`: when the same character is found through
/// several query variants, the last fetched value wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCharacter {
    /// External identifier (`mal_id` on Jikan).
    pub id: i64,
    /// Display name, usually "Given Family" or "Family, Given".
    pub name: String,
    /// Alternative names, possibly empty.
    #[serde(default)]
    pub nicknames: Vec<String>,
    /// Free-text biography.
    #[serde(default)]
    pub about: Option<String>,
    /// Portrait image URL.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A candidate with its similarity score against the user's search.
///
/// Serialized with the field names the frontend already understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(rename = "mal_id")]
    pub id: i64,
    pub name: String,
    /// Up to the first three nicknames joined by `", "`.
    pub nicknames: String,
    pub image: Option<String>,
    /// Biography text, empty when the source had none.
    pub about: String,
    /// Similarity in `0..=100`.
    pub score: u8,
}

impl ScoredCandidate {
    /// Attach a score to a candidate, flattening it for display.
    #[must_use]
    pub fn new(candidate: CandidateCharacter, score: u8) -> Self {
        let nicknames = candidate
            .nicknames
            .iter()
            .take(DISPLAYED_NICKNAMES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            id: candidate.id,
            name: candidate.name,
            nicknames,
            image: candidate.image_url,
            about: candidate.about.unwrap_or_default(),
            score: score.min(100),
        }
    }
}
