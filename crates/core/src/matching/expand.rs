//! Query expansion.
//!
//! The external database indexes names inconsistently: some characters are
//! stored as "Given Family", some as "Family, Given", and a few popular ones
//! are better known by an in-game handle than by their legal name. A search
//! is therefore sent as several variants and the results merged.

use serde::Serialize;

/// Handles that the character database does not know, mapped to the name it
/// does. Keys are lower-case; lookups use the trimmed, lower-cased search.
pub const SEARCH_ALIASES: &[(&str, &str)] = &[
    // Sword Art Online
    ("sinon", "Asada Shino"),
    ("kirito", "Kazuto Kirigaya"),
    ("llenn", "Karen Kohiruimaki"),
    ("pito", "Elza Kanzaki"),
    // Shangri-La Frontier
    ("rei saiga", "Psyger-0"),
    ("saiga rei", "Psyger-0"),
    ("amane towa", "arthur pencilgon"),
    ("kei uomi", "katzo"),
    ("rakurou hizutome", "sunraku"),
];

/// Look up the canonical name for an alias.
#[must_use]
pub fn resolve_alias(normalized: &str) -> Option<&'static str> {
    SEARCH_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|&(_, canonical)| canonical)
}

/// A user search and the query strings it expands to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    raw: String,
    normalized: String,
    variants: Vec<String>,
}

impl SearchQuery {
    /// Expand a raw search string.
    ///
    /// Variants are produced in this order, keeping only the first copy of
    /// each string:
    /// 1. the canonical name, if the search is a known alias
    /// 2. the raw search as typed
    /// 3. for two or more words, `"Last, Rest"` and `"Last Rest"`
    ///
    /// ```
    /// use waifu_tracker_core::matching::SearchQuery;
    ///
    /// let query = SearchQuery::new("Rei Saiga");
    /// assert_eq!(
    ///     query.variants(),
    ///     ["Psyger-0", "Rei Saiga", "Saiga, Rei", "Saiga Rei"]
    /// );
    /// ```
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        let mut variants: Vec<String> = Vec::with_capacity(4);
        let mut push = |candidate: String| {
            if !variants.contains(&candidate) {
                variants.push(candidate);
            }
        };

        if let Some(canonical) = resolve_alias(&normalized) {
            push(canonical.to_owned());
        }

        push(raw.to_owned());

        let parts: Vec<&str> = raw.split_whitespace().collect();
        if let Some((last, rest)) = parts.split_last()
            && !rest.is_empty()
        {
            let rest = rest.join(" ");
            push(format!("{last}, {rest}"));
            push(format!("{last} {rest}"));
        }

        Self {
            raw: raw.to_owned(),
            normalized,
            variants,
        }
    }

    /// The search exactly as the user typed it.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Trimmed, lower-cased search. Candidates are scored against this.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Query strings to send to the lookup service, in order.
    #[must_use]
    pub fn variants(&self) -> &[String] {
        &self.variants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_is_just_the_raw_search() {
        let query = SearchQuery::new("Asuna");
        assert_eq!(query.variants(), ["Asuna"]);
        assert_eq!(query.normalized(), "asuna");
    }

    #[test]
    fn test_two_words_add_surname_first_permutations() {
        let query = SearchQuery::new("Shino Asada");
        assert_eq!(
            query.variants(),
            ["Shino Asada", "Asada, Shino", "Asada Shino"]
        );
    }

    #[test]
    fn test_three_words_move_only_the_last() {
        let query = SearchQuery::new("Kirigaya Kazuto Jr");
        assert_eq!(
            query.variants(),
            [
                "Kirigaya Kazuto Jr",
                "Jr, Kirigaya Kazuto",
                "Jr Kirigaya Kazuto"
            ]
        );
    }

    #[test]
    fn test_alias_comes_first() {
        let query = SearchQuery::new("sinon");
        assert_eq!(query.variants().first().map(String::as_str), Some("Asada Shino"));
        assert_eq!(query.variants(), ["Asada Shino", "sinon"]);
    }

    #[test]
    fn test_alias_lookup_ignores_case_and_padding() {
        let query = SearchQuery::new("  Kirito ");
        assert_eq!(query.variants().first().map(String::as_str), Some("Kazuto Kirigaya"));
        // The raw search is kept untouched.
        assert_eq!(query.raw(), "  Kirito ");
        assert!(query.variants().iter().any(|v| v == "  Kirito "));
    }

    #[test]
    fn test_multi_word_alias() {
        let query = SearchQuery::new("Amane Towa");
        assert_eq!(
            query.variants(),
            ["arthur pencilgon", "Amane Towa", "Towa, Amane", "Towa Amane"]
        );
    }

    #[test]
    fn test_duplicates_removed_keeping_first() {
        // "a a" permutes to "a, a" and "a a"; the second is the raw search again.
        let query = SearchQuery::new("a a");
        assert_eq!(query.variants(), ["a a", "a, a"]);
    }

    #[test]
    fn test_no_duplicates_for_any_input() {
        for raw in ["sinon", "rei saiga", "Saiga Rei", "x y z", "llenn llenn"] {
            let query = SearchQuery::new(raw);
            let variants = query.variants();
            for (i, v) in variants.iter().enumerate() {
                assert!(
                    !variants.iter().skip(i + 1).any(|w| w == v),
                    "duplicate {v:?} in {variants:?}"
                );
            }
        }
    }

    #[test]
    fn test_resolve_alias() {
        assert_eq!(resolve_alias("pito"), Some("Elza Kanzaki"));
        assert_eq!(resolve_alias("Pito"), None);
        assert_eq!(resolve_alias("asuna"), None);
    }
}
