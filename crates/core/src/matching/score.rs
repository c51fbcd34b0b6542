//! Fuzzy scoring of search candidates.
//!
//! Each candidate gets three independent scores against the search and keeps
//! the best one:
//! - name: [`token_sort_ratio`] against the display name
//! - nickname: best [`token_sort_ratio`] against any nickname
//! - biography: [`partial_ratio`] against the biography text
//!
//! All scores are integers in `0..=100`.

use crate::types::{CandidateCharacter, ScoredCandidate};

/// Number of ranked results returned to the caller.
pub const MAX_RESULTS: usize = 10;

/// Length of the longest common subsequence, over chars.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    // row[j] holds the LCS of the `a` prefix seen so far and b[..j].
    let mut row = vec![0_usize; b.len() + 1];
    for &ca in a {
        let (mut diag, mut left) = (0, 0);
        for (cell, &cb) in row.iter_mut().skip(1).zip(b) {
            let up = *cell;
            *cell = if ca == cb { diag + 1 } else { up.max(left) };
            diag = up;
            left = *cell;
        }
    }
    row.last().copied().unwrap_or(0)
}

/// Normalized Indel similarity on a `0.0..=100.0` scale.
///
/// Only insertions and deletions count, so a substitution costs two edits:
/// `100 * 2 * lcs / (len_a + len_b)`. Two empty strings are identical.
#[allow(clippy::cast_precision_loss)]
fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(&a, &b) as f64 / total as f64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_score(similarity: f64) -> u8 {
    similarity.round().clamp(0.0, 100.0) as u8
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Similarity that ignores word order.
///
/// Both strings are split on whitespace, the words sorted and re-joined, and
/// the results compared.
///
/// ```
/// use waifu_tracker_core::matching::token_sort_ratio;
///
/// assert_eq!(token_sort_ratio("shino asada", "asada shino"), 100);
/// assert!(token_sort_ratio("shino asada", "asuna yuuki") < 50);
/// ```
#[must_use]
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    to_score(ratio(&sorted_tokens(a), &sorted_tokens(b)))
}

/// Similarity of the shorter string against its best-aligned window in the
/// longer one.
///
/// Returns 0 when either side is empty.
///
/// ```
/// use waifu_tracker_core::matching::partial_ratio;
///
/// assert_eq!(partial_ratio("sinon", "known in ggo as sinon, a sniper"), 100);
/// assert_eq!(partial_ratio("sinon", ""), 0);
/// ```
#[must_use]
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    let (short, long, short_len) = if a_len <= b_len {
        (a, b, a_len)
    } else {
        (b, a, b_len)
    };
    if short_len == 0 {
        return 0;
    }

    let long_chars: Vec<char> = long.chars().collect();
    let in_short = |c: &char| short.contains(*c);
    let mut best = 0.0_f64;

    // Windows hanging off the start of the longer string.
    for len in 1..short_len {
        if long_chars.get(len - 1).is_some_and(in_short) {
            let window: String = long_chars.iter().take(len).collect();
            best = best.max(ratio(short, &window));
        }
    }

    // Full-length windows. A window whose last char never appears in the
    // shorter string cannot beat the window one position to the left.
    for window in long_chars.windows(short_len) {
        if best >= 100.0 {
            break;
        }
        if window.last().is_some_and(in_short) {
            let window: String = window.iter().collect();
            best = best.max(ratio(short, &window));
        }
    }

    // Windows hanging off the end of the longer string.
    let long_len = long_chars.len();
    for len in (1..short_len).rev() {
        if best >= 100.0 {
            break;
        }
        let start = long_len - len;
        if long_chars.get(start).is_some_and(in_short) {
            let window: String = long_chars.iter().skip(start).collect();
            best = best.max(ratio(short, &window));
        }
    }

    to_score(best)
}

/// Score one candidate against a normalized (trimmed, lower-cased) search.
#[must_use]
pub fn score_candidate(normalized_query: &str, candidate: &CandidateCharacter) -> u8 {
    let name_score = token_sort_ratio(normalized_query, &candidate.name.to_lowercase());

    let nick_score = candidate
        .nicknames
        .iter()
        .map(|nick| token_sort_ratio(normalized_query, &nick.to_lowercase()))
        .max()
        .unwrap_or(0);

    let bio_score = candidate
        .about
        .as_deref()
        .map_or(0, |about| partial_ratio(normalized_query, &about.to_lowercase()));

    name_score.max(nick_score).max(bio_score)
}

/// Score every candidate and return the best [`MAX_RESULTS`], highest first.
///
/// The sort is stable: equal scores keep the order the candidates came in.
#[must_use]
pub fn rank_candidates(
    normalized_query: &str,
    candidates: impl IntoIterator<Item = CandidateCharacter>,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let score = score_candidate(normalized_query, &candidate);
            ScoredCandidate::new(candidate, score)
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_RESULTS);
    scored
}
