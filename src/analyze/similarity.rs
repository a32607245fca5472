// src/analyze/similarity.rs
//! Raw similarity signals between a query and one catalogue entry.
//!
//! All values are in [0,1] except the action-boosted description value, which
//! may exceed 1 by at most the configured action cap.

use std::collections::HashSet;

use crate::analyze::QueryFeatures;
use crate::config::ScoringWeights;
use crate::lexicon::{count_in, ACTION_VERBS, GENERIC_TITLE_WORDS};
use crate::taxonomy::TaxonomyEntry;

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(b).count();
    let union = a.len() + b.len() - inter;
    inter as f32 / union as f32
}

/// |A ∩ B| / min(|A|, |B|)
fn min_overlap(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
    let denom = a.len().min(b.len());
    if denom == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f32 / denom as f32
}

/// Best Jaccard between the query title and any title variant of the entry,
/// generic qualifiers ("senior", "officer", ...) stripped on both sides.
pub fn title_similarity(query: &QueryFeatures, entry: &TaxonomyEntry) -> f32 {
    let q: HashSet<String> = query
        .title
        .token_set
        .iter()
        .filter(|t| !GENERIC_TITLE_WORDS.contains(t.as_str()))
        .cloned()
        .collect();
    if q.is_empty() {
        return 0.0;
    }
    entry
        .variant_tokens
        .iter()
        .map(|v| jaccard(&q, v))
        .fold(0.0, f32::max)
}

/// Components of the description match, kept for the explanation string.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DescriptionScore {
    pub ratio: f32,
    pub set_overlap: f32,
    pub jaccard: f32,
    pub bigram: f32,
    pub action_hits: usize,
    pub value: f32,
}

pub fn description_similarity(
    query: &QueryFeatures,
    entry: &TaxonomyEntry,
    w: &ScoringWeights,
) -> DescriptionScore {
    let q = &query.combined;
    let b = &entry.blob;

    let ratio = if q.normalized.is_empty() || b.normalized.is_empty() {
        0.0
    } else {
        strsim::normalized_levenshtein(&q.normalized, &b.normalized) as f32
    };
    let set_overlap = min_overlap(&q.token_set, &b.token_set);
    let jac = jaccard(&q.token_set, &b.token_set);
    let bigram = min_overlap(&q.bigrams, &b.bigrams);

    let shared: HashSet<String> = q.token_set.intersection(&b.token_set).cloned().collect();
    let action_hits = count_in(&shared, &ACTION_VERBS);

    let mut value = w.ratio * ratio + w.set_overlap * set_overlap + w.jaccard * jac + w.bigram * bigram;
    if action_hits > 0 {
        value *= 1.0 + (w.action_per_hit * action_hits as f32).min(w.action_cap);
    }

    DescriptionScore {
        ratio,
        set_overlap,
        jaccard: jac,
        bigram,
        action_hits,
        value,
    }
}

/// Jaccard of what is left after removing `generic` vocabulary from both
/// sides; zero when either side has nothing left.
pub fn residual_overlap(
    a: &HashSet<String>,
    b: &HashSet<String>,
    generic: &HashSet<&'static str>,
) -> f32 {
    let strip = |s: &HashSet<String>| -> HashSet<String> {
        s.iter()
            .filter(|t| !generic.contains(t.as_str()))
            .cloned()
            .collect()
    };
    jaccard(&strip(a), &strip(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::SUPERVISORY;
    use crate::query::ClassificationQuery;
    use crate::taxonomy::Taxonomy;
    use crate::text::{token_set, TextCache};

    fn catalogue() -> Taxonomy {
        Taxonomy::from_csv_str(
            "code,title,definition,examples\n\
             51321,Spray painter (vehicle)/Vehicle painter,Spray paint car bodies and panels in a spray booth,Car spray painter\n\
             24111,Accountant,Prepare financial statements and audit accounts,Chartered accountant\n",
        )
        .unwrap()
    }

    fn q(title: &str, duties: &str) -> QueryFeatures {
        QueryFeatures::build(&ClassificationQuery::new(title, duties), &TextCache::with_capacity(0))
    }

    #[test]
    fn title_similarity_takes_best_variant_and_ignores_qualifiers() {
        let t = catalogue();
        let e = t.get("51321").unwrap();
        let s = title_similarity(&q("Senior Vehicle Painter", ""), e);
        assert!((s - 1.0).abs() < 1e-6, "{s}");
        assert_eq!(title_similarity(&q("Senior Officer", ""), e), 0.0);
    }

    #[test]
    fn description_rewards_shared_actions() {
        let t = catalogue();
        let e = t.get("51321").unwrap();
        let w = ScoringWeights::default();
        let d = description_similarity(&q("Painter", "spray paint car panels"), e, &w);
        assert!(d.action_hits >= 1, "{d:?}");
        assert!(d.value > d.ratio * w.ratio, "{d:?}");

        let other = description_similarity(&q("Painter", "spray paint car panels"), t.get("24111").unwrap(), &w);
        assert!(d.value > other.value);
    }

    #[test]
    fn residual_overlap_ignores_generic_words() {
        let a = token_set("finance manager budgeting");
        let b = token_set("manager of operations");
        assert_eq!(residual_overlap(&a, &b, &SUPERVISORY), 0.0);

        let c = token_set("manager budgeting forecasting");
        let r = residual_overlap(&a, &c, &SUPERVISORY);
        assert!(r > 0.0 && r < 1.0, "{r}");
    }
}
