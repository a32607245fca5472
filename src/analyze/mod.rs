// src/analyze/mod.rs
//! Statistical matching pipeline: per-query features, similarity signals, the
//! ordered modifier chain and the TF-IDF shortlist.

pub mod modifiers;
pub mod scoring;
pub mod shortlist;
pub mod similarity;

use std::sync::Arc;

use crate::lexicon::{
    ADMIN_MANAGER_CUES, ARTS_MEDIA_CUES, ATTRACTIONS_CUES, BUILDING_PAINT_CUES,
    CONSTRUCTION_LABOUR_CUES, DRAFTER_CUES, ELECTRICIAN_CUES, GAMING_CUES, HOSPITALITY_CUES,
    MARKETING_CUES, SPORTS_CUES, SUBORDINATE_PHRASE, VEHICLE_CUES, WELLNESS_CUES,
};
use crate::query::{parse_group_hint, ClassificationQuery, GroupHint};
use crate::text::{TextCache, TextFeatures};

pub use scoring::{score_entry, CandidateScore};
pub use shortlist::ShortlistIndex;

/// Query-side cue flags, evaluated once per query over the combined text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryCues {
    pub vehicle: bool,
    pub building_paint: bool,
    pub arts_media: bool,
    pub hospitality: bool,
    pub gaming: bool,
    pub sports: bool,
    pub marketing: bool,
    pub construction_labour: bool,
    pub electrician: bool,
    pub drafter: bool,
    pub admin_manager: bool,
    pub attractions: bool,
    pub wellness: bool,
    pub subordinate: bool,
    pub manufacturing: bool,
    pub food_beverage: bool,
    pub client_facing: bool,
}

impl QueryCues {
    fn detect(norm: &str) -> Self {
        let has_any = |needles: &[&str]| needles.iter().any(|n| norm.contains(n));
        Self {
            vehicle: VEHICLE_CUES.is_match(norm),
            building_paint: BUILDING_PAINT_CUES.is_match(norm),
            arts_media: ARTS_MEDIA_CUES.is_match(norm),
            hospitality: HOSPITALITY_CUES.is_match(norm),
            gaming: GAMING_CUES.is_match(norm) || norm.contains("casino"),
            sports: SPORTS_CUES.is_match(norm),
            marketing: MARKETING_CUES.is_match(norm),
            construction_labour: CONSTRUCTION_LABOUR_CUES.is_match(norm)
                || norm.contains("construction worker"),
            electrician: ELECTRICIAN_CUES.is_match(norm),
            drafter: DRAFTER_CUES.is_match(norm),
            admin_manager: ADMIN_MANAGER_CUES.is_match(norm),
            attractions: ATTRACTIONS_CUES.is_match(norm) || norm.contains("park"),
            wellness: WELLNESS_CUES.is_match(norm),
            subordinate: SUBORDINATE_PHRASE.is_match(norm),
            manufacturing: has_any(&["manufactur", "production", "factory", "plant", "line"]),
            food_beverage: has_any(&["restaurant", "food", "beverage", "kitchen", "cafe"]),
            client_facing: has_any(&["client", "represent"]),
        }
    }
}

/// Everything the scorer needs about one query, computed once.
#[derive(Debug, Clone)]
pub struct QueryFeatures {
    pub title: Arc<TextFeatures>,
    pub duties: Arc<TextFeatures>,
    /// `title + " " + duties`
    pub combined: Arc<TextFeatures>,
    pub industry: Option<Arc<TextFeatures>>,
    pub group_hint: Option<GroupHint>,
    pub cues: QueryCues,
}

impl QueryFeatures {
    pub fn build(query: &ClassificationQuery, cache: &TextCache) -> Self {
        let title_raw = query.title_text.trim();
        let duties_raw = query.duties_text.trim();
        let combined_raw = format!("{title_raw} {duties_raw}");

        let title = cache.features(title_raw);
        let duties = cache.features(duties_raw);
        let combined = cache.features(combined_raw.trim());
        let industry = query
            .industry_context_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| cache.features(s));
        let group_hint = query.group_hint_text.as_deref().and_then(parse_group_hint);
        let cues = QueryCues::detect(&combined.normalized);

        Self {
            title,
            duties,
            combined,
            industry,
            group_hint,
            cues,
        }
    }

    /// Neither title nor duties carry any letters.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.duties.is_empty()
    }

    pub fn title_has(&self, token: &str) -> bool {
        self.title.token_set.contains(token)
    }

    pub fn mentions(&self, token: &str) -> bool {
        self.combined.token_set.contains(token)
    }

    /// Substring test on the normalized combined text.
    pub fn text_contains(&self, needle: &str) -> bool {
        self.combined.normalized.contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_split_title_duties_and_combined() {
        let q = ClassificationQuery::new("Spray Painter", "paint car panels and bumpers")
            .with_group_hint("7. Craftsmen");
        let f = QueryFeatures::build(&q, &TextCache::default());
        assert_eq!(f.title.normalized, "spray painter");
        assert_eq!(f.combined.normalized, "spray painter paint car panels and bumpers");
        assert!(f.cues.vehicle);
        assert!(!f.cues.hospitality);
        assert_eq!(f.group_hint, Some(GroupHint::Major('7')));
        assert!(f.industry.is_none());
    }

    #[test]
    fn blank_query() {
        let f = QueryFeatures::build(&ClassificationQuery::new(" ", "123 !!"), &TextCache::default());
        assert!(f.is_blank());
    }
}
