//! Fuzzy relevance scoring of catalog records against the requested book.
//!
//! Pure functions, no I/O. The score is only ever used to pick candidates
//! within one resolution; it is never persisted or shown to the user.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{BookQuery, CatalogRecord, ScoredRecord};

// Title contributes up to 70 points, author up to 30.
const TITLE_EXACT: f32 = 70.0;
const TITLE_SUBSTRING: f32 = 50.0;
const TITLE_OVERLAP_MAX: f32 = 40.0;
const AUTHOR_EXACT: f32 = 30.0;
const AUTHOR_SUBSTRING: f32 = 20.0;
const AUTHOR_OVERLAP_MAX: f32 = 15.0;

/// Match confidence of a found (title, author) pair against the requested
/// one, in [0, 100]. Deterministic; ties are resolved later only by catalog
/// order.
pub fn score(found_title: &str, found_author: &str, query_title: &str, query_author: &str) -> f32 {
    field_score(
        found_title,
        query_title,
        TITLE_EXACT,
        TITLE_SUBSTRING,
        TITLE_OVERLAP_MAX,
    ) + field_score(
        found_author,
        query_author,
        AUTHOR_EXACT,
        AUTHOR_SUBSTRING,
        AUTHOR_OVERLAP_MAX,
    )
}

/// Score all records against the query and sort best-first.
///
/// The sort is stable, so records with equal relevance keep their
/// catalog-returned order.
pub fn rank(records: Vec<CatalogRecord>, query: &BookQuery) -> Vec<ScoredRecord> {
    let mut scored: Vec<ScoredRecord> = records
        .into_iter()
        .map(|record| {
            let relevance = score(
                record.title_str(),
                record.creator_str(),
                query.search_title(),
                &query.author,
            );
            ScoredRecord { record, relevance }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
    });
    scored
}

/// Three-tier field score: exact normalized match, substring containment in
/// either direction, else token overlap scaled to `overlap_max`.
fn field_score(found: &str, wanted: &str, exact: f32, substring: f32, overlap_max: f32) -> f32 {
    let found = normalize(found);
    let wanted = normalize(wanted);

    if found.is_empty() || wanted.is_empty() {
        return 0.0;
    }
    if found == wanted {
        return exact;
    }
    if found.contains(&wanted) || wanted.contains(&found) {
        return substring;
    }
    token_overlap(&found, &wanted) * overlap_max
}

/// Lowercase, strip punctuation, collapse whitespace.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shared tokens divided by the larger token count; 0 when either side has
/// no tokens.
fn token_overlap(a: &str, b: &str) -> f32 {
    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();

    let larger = tokens_a.len().max(tokens_b.len());
    if larger == 0 {
        return 0.0;
    }

    let shared = tokens_a.intersection(&tokens_b).count();
    shared as f32 / larger as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordBuilder;

    #[test]
    fn test_identical_input_scores_100() {
        assert_eq!(score("Dune", "Frank Herbert", "Dune", "Frank Herbert"), 100.0);
    }

    #[test]
    fn test_punctuation_and_case_insensitive() {
        assert_eq!(
            score("dune!", "HERBERT, Frank", "Dune", "Herbert Frank"),
            100.0
        );
    }

    #[test]
    fn test_substring_containment_either_direction() {
        // Found title contains the query title
        let s = score("Dune: Deluxe Edition", "Frank Herbert", "Dune", "Frank Herbert");
        assert_eq!(s, TITLE_SUBSTRING + AUTHOR_EXACT);

        // Query title contains the found title
        let s = score("Dune", "Frank Herbert", "Dune Messiah", "Frank Herbert");
        assert_eq!(s, TITLE_SUBSTRING + AUTHOR_EXACT);
    }

    #[test]
    fn test_token_overlap_tier() {
        // "the stars my destination" vs "stars destination voyage":
        // shared {stars, destination} = 2, larger set = 4
        let s = field_score(
            "the stars my destination",
            "stars destination voyage",
            70.0,
            50.0,
            40.0,
        );
        assert_eq!(s, 0.5 * 40.0);
    }

    #[test]
    fn test_empty_fields_score_zero() {
        assert_eq!(score("Dune", "", "Dune", "Frank Herbert"), TITLE_EXACT);
        assert_eq!(score("", "", "Dune", "Frank Herbert"), 0.0);
        assert_eq!(score("", "", "", ""), 0.0);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        assert_eq!(score("Hamlet", "Shakespeare", "Dune", "Herbert"), 0.0);
    }

    #[test]
    fn test_rank_orders_best_first() {
        let query = BookQuery::new("Dune", "Frank Herbert");
        let records = vec![
            RecordBuilder::new("Dune Messiah", "Frank Herbert").build(),
            RecordBuilder::new("Dune", "Frank Herbert").build(),
        ];

        let ranked = rank(records, &query);
        assert_eq!(ranked[0].record.title_str(), "Dune");
        assert_eq!(ranked[0].relevance, 100.0);
        assert_eq!(ranked[1].record.title_str(), "Dune Messiah");
    }

    #[test]
    fn test_rank_ties_keep_catalog_order() {
        let query = BookQuery::new("Dune", "Frank Herbert");
        let records = vec![
            RecordBuilder::new("Dune", "Frank Herbert").record_id("first").build(),
            RecordBuilder::new("Dune", "Frank Herbert").record_id("second").build(),
        ];

        let ranked = rank(records, &query);
        assert_eq!(ranked[0].record.record_id.as_deref(), Some("first"));
        assert_eq!(ranked[1].record.record_id.as_deref(), Some("second"));
    }

    #[test]
    fn test_rank_uses_cleaned_title() {
        let query = BookQuery::new("Dune (Dune, #1)", "Frank Herbert").clean_title("Dune");
        let ranked = rank(vec![RecordBuilder::new("Dune", "Frank Herbert").build()], &query);
        assert_eq!(ranked[0].relevance, 100.0);
    }
}
