//! Per-library aggregation of classified records across media types.

use crate::directory::Library;
use crate::engine::classify;
use crate::models::{
    Availability, MediaType, MediaTypeFilter, MediaTypeResult, ScoredRecord,
};

/// Aggregated per-library availability: one row per enabled media type with
/// candidates, plus the single overall verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregated {
    pub media_types: Vec<MediaTypeResult>,
    pub overall_status: Availability,
    pub overall_text: String,
}

/// Select and classify the best candidate per enabled media type, then derive
/// the overall verdict.
///
/// Media types with no candidates are omitted entirely rather than shown as
/// unavailable. Ties on relevance keep the order `scored` came in, which is
/// catalog order within equal relevance.
pub fn aggregate(scored: &[ScoredRecord], filter: MediaTypeFilter, library: &Library) -> Aggregated {
    let mut picks: Vec<(f32, MediaTypeResult)> = Vec::new();

    for media_type in &MediaType::DISPLAYED {
        if !filter.allows(media_type) {
            continue;
        }
        if let Some(best) = select_best(scored, media_type) {
            picks.push((best.relevance, media_type_result(best, media_type, library)));
        }
    }

    let (overall_status, overall_text) = overall(&picks);
    Aggregated {
        media_types: picks.into_iter().map(|(_, result)| result).collect(),
        overall_status,
        overall_text,
    }
}

/// Highest-relevance candidate of one media type; earliest wins on ties.
fn select_best<'a>(scored: &'a [ScoredRecord], media_type: &MediaType) -> Option<&'a ScoredRecord> {
    let mut best: Option<&ScoredRecord> = None;
    for candidate in scored {
        if candidate.record.media_type_id.as_ref() != Some(media_type) {
            continue;
        }
        match best {
            Some(current) if candidate.relevance <= current.relevance => {}
            _ => best = Some(candidate),
        }
    }
    best
}

fn media_type_result(
    best: &ScoredRecord,
    media_type: &MediaType,
    library: &Library,
) -> MediaTypeResult {
    let classification = classify::classify(&best.record);
    MediaTypeResult {
        media_type: media_type.clone(),
        display_name: media_type.display_name().to_string(),
        icon: media_type.icon().to_string(),
        status: classification.status,
        status_text: classification.text,
        wait_detail: classification.wait_detail,
        url: catalog_url(library, &best.record.record_id),
        record: best.record.clone(),
    }
}

/// Deep link into the library's catalog for one edition.
fn catalog_url(library: &Library, record_id: &Option<String>) -> Option<String> {
    record_id.as_ref().map(|id| {
        format!(
            "https://libbyapp.com/library/{}/everything/page-1/{}",
            library.id, id
        )
    })
}

/// Overall verdict: the best non-empty status group wins.
///
/// With several media types in the winning group the text stays generic;
/// with exactly one it names the media type. For wait and unknown groups the
/// highest-relevance row (stable on ties) is surfaced as the representative,
/// while every row remains individually listed.
fn overall(picks: &[(f32, MediaTypeResult)]) -> (Availability, String) {
    for status in Availability::PRECEDENCE {
        let group: Vec<&(f32, MediaTypeResult)> =
            picks.iter().filter(|(_, m)| m.status == status).collect();
        if group.is_empty() {
            continue;
        }

        let text = match status {
            Availability::Available => {
                if group.len() > 1 {
                    "Available now".to_string()
                } else {
                    format!("{} available now", group[0].1.display_name)
                }
            }
            Availability::Wait => {
                let best = representative(&group);
                format!("{} - {}", best.display_name, best.status_text)
            }
            Availability::Unknown => {
                let best = representative(&group);
                format!("{} - Check availability", best.display_name)
            }
            Availability::Unavailable => "Not available".to_string(),
        };
        return (status, text);
    }

    (Availability::Unavailable, "Not available".to_string())
}

/// Highest-relevance entry of a non-empty group; earliest wins on ties.
fn representative<'a>(group: &[&'a (f32, MediaTypeResult)]) -> &'a MediaTypeResult {
    let mut best = group[0];
    for candidate in &group[1..] {
        if candidate.0 > best.0 {
            best = candidate;
        }
    }
    &best.1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::relevance;
    use crate::models::{BookQuery, RecordBuilder};

    fn library() -> Library {
        Library::new("bpl", "Brooklyn Public Library")
    }

    fn ranked(records: Vec<crate::models::CatalogRecord>) -> Vec<ScoredRecord> {
        relevance::rank(records, &BookQuery::new("Dune", "Frank Herbert"))
    }

    #[test]
    fn test_available_ebook_beats_waitlisted_audiobook() {
        let scored = ranked(vec![
            RecordBuilder::new("Dune", "Frank Herbert")
                .media_type(MediaType::Audiobook)
                .holds_count(5)
                .owned_copies(2)
                .build(),
            RecordBuilder::new("Dune", "Frank Herbert")
                .media_type(MediaType::Ebook)
                .is_available(true)
                .build(),
        ]);

        let agg = aggregate(&scored, MediaTypeFilter::default(), &library());
        assert_eq!(agg.overall_status, Availability::Available);
        assert_eq!(agg.overall_text, "eBook available now");
        // Both rows are still individually listed, eBook first
        assert_eq!(agg.media_types.len(), 2);
        assert_eq!(agg.media_types[0].media_type, MediaType::Ebook);
        assert_eq!(agg.media_types[1].status, Availability::Wait);
    }

    #[test]
    fn test_both_available_is_generic_text() {
        let scored = ranked(vec![
            RecordBuilder::new("Dune", "Frank Herbert")
                .media_type(MediaType::Ebook)
                .is_available(true)
                .build(),
            RecordBuilder::new("Dune", "Frank Herbert")
                .media_type(MediaType::Audiobook)
                .available_copies(2)
                .build(),
        ]);

        let agg = aggregate(&scored, MediaTypeFilter::default(), &library());
        assert_eq!(agg.overall_status, Availability::Available);
        assert_eq!(agg.overall_text, "Available now");
    }

    #[test]
    fn test_wait_surfaces_best_detail() {
        let scored = ranked(vec![
            RecordBuilder::new("Dune", "Frank Herbert")
                .media_type(MediaType::Ebook)
                .holds_count(5)
                .owned_copies(2)
                .build(),
            // Lower relevance, so not the representative
            RecordBuilder::new("Dune Messiah", "Frank Herbert")
                .media_type(MediaType::Audiobook)
                .holds_count(1)
                .owned_copies(1)
                .build(),
        ]);

        let agg = aggregate(&scored, MediaTypeFilter::default(), &library());
        assert_eq!(agg.overall_status, Availability::Wait);
        assert_eq!(agg.overall_text, "eBook - 5 weeks wait");
        assert_eq!(agg.media_types.len(), 2);
    }

    #[test]
    fn test_media_type_without_candidates_is_omitted() {
        let scored = ranked(vec![RecordBuilder::new("Dune", "Frank Herbert")
            .media_type(MediaType::Ebook)
            .is_available(true)
            .build()]);

        let agg = aggregate(&scored, MediaTypeFilter::default(), &library());
        assert_eq!(agg.media_types.len(), 1);
        assert_eq!(agg.media_types[0].media_type, MediaType::Ebook);
    }

    #[test]
    fn test_filter_disables_media_type() {
        let scored = ranked(vec![
            RecordBuilder::new("Dune", "Frank Herbert")
                .media_type(MediaType::Ebook)
                .is_available(true)
                .build(),
            RecordBuilder::new("Dune", "Frank Herbert")
                .media_type(MediaType::Audiobook)
                .is_available(true)
                .build(),
        ]);

        let agg = aggregate(&scored, MediaTypeFilter::AUDIOBOOKS, &library());
        assert_eq!(agg.media_types.len(), 1);
        assert_eq!(agg.media_types[0].media_type, MediaType::Audiobook);
        assert_eq!(agg.overall_text, "Audiobook available now");
    }

    #[test]
    fn test_unrecognized_media_types_are_ignored() {
        let scored = ranked(vec![RecordBuilder::new("Dune", "Frank Herbert")
            .media_type(MediaType::Other("magazine".to_string()))
            .is_available(true)
            .build()]);

        let agg = aggregate(&scored, MediaTypeFilter::default(), &library());
        assert!(agg.media_types.is_empty());
        assert_eq!(agg.overall_status, Availability::Unavailable);
        assert_eq!(agg.overall_text, "Not available");
    }

    #[test]
    fn test_best_candidate_per_type_wins() {
        let scored = ranked(vec![
            // Weaker match, available
            RecordBuilder::new("Dune Messiah", "Frank Herbert")
                .media_type(MediaType::Ebook)
                .is_available(true)
                .build(),
            // Stronger match, waitlisted: this one must be selected
            RecordBuilder::new("Dune", "Frank Herbert")
                .media_type(MediaType::Ebook)
                .holds_count(2)
                .owned_copies(1)
                .build(),
        ]);

        let agg = aggregate(&scored, MediaTypeFilter::default(), &library());
        assert_eq!(agg.media_types.len(), 1);
        assert_eq!(agg.media_types[0].status, Availability::Wait);
        assert_eq!(agg.media_types[0].record.title_str(), "Dune");
    }

    #[test]
    fn test_catalog_url_needs_record_id() {
        let scored = ranked(vec![RecordBuilder::new("Dune", "Frank Herbert")
            .media_type(MediaType::Ebook)
            .record_id("9041")
            .is_available(true)
            .build()]);

        let agg = aggregate(&scored, MediaTypeFilter::default(), &library());
        assert_eq!(
            agg.media_types[0].url.as_deref(),
            Some("https://libbyapp.com/library/bpl/everything/page-1/9041")
        );
    }

    #[test]
    fn test_empty_candidates_are_unavailable() {
        let agg = aggregate(&[], MediaTypeFilter::default(), &library());
        assert!(agg.media_types.is_empty());
        assert_eq!(agg.overall_status, Availability::Unavailable);
    }
}
