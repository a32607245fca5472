// src/analyze/scoring.rs
//! Weighted score of one catalogue entry for one query.
//!
//! base = w_title*title + w_desc*description, optionally re-blended with a
//! residual-context score for manager and engineer queries, then multiplied
//! through [`PIPELINE`].

use serde::Serialize;
use std::fmt::Write as _;

use super::modifiers::{ScoreContext, PIPELINE};
use super::similarity::residual_overlap;
use super::QueryFeatures;
use crate::config::ScoringWeights;
use crate::lexicon::{GENERIC_ENGINEERING, SUPERVISORY};
use crate::taxonomy::TaxonomyEntry;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateScore {
    pub code: String,
    pub title: String,
    pub score: f32,
    pub explanation: String,
}

fn mentions_any(q: &QueryFeatures, words: &[&str]) -> bool {
    words.iter().any(|w| q.mentions(w))
}

pub fn score_entry(query: &QueryFeatures, entry: &TaxonomyEntry, w: &ScoringWeights) -> CandidateScore {
    let cx = ScoreContext::new(query, entry, w);
    let desc = cx.description;

    let mut base = w.title * cx.title_score + w.description * desc.value;
    let blend = w.context_blend;

    let mut manager_ctx = None;
    if mentions_any(query, &["manager", "managers"]) {
        let ctx = residual_overlap(&query.combined.token_set, &entry.context_tokens, &SUPERVISORY);
        base = (1.0 - blend) * base + blend * ctx;
        manager_ctx = Some(ctx);
    }
    let mut engineer_ctx = None;
    if mentions_any(query, &["engineer", "engineers"]) {
        let ctx = residual_overlap(&query.combined.token_set, &entry.context_tokens, &GENERIC_ENGINEERING);
        base = (1.0 - blend) * base + blend * ctx;
        engineer_ctx = Some(ctx);
    }

    let mut explanation = format!(
        "title={:.2} desc={:.2} (ratio={:.2} set={:.2} jac={:.2} bi={:.2}) base={:.3}",
        cx.title_score, desc.value, desc.ratio, desc.set_overlap, desc.jaccard, desc.bigram, base
    );
    if let Some(m) = manager_ctx {
        let _ = write!(explanation, " mgr_ctx={m:.2}");
    }
    if let Some(e) = engineer_ctx {
        let _ = write!(explanation, " eng_ctx={e:.2}");
    }
    let _ = write!(explanation, " acts={} |", desc.action_hits);

    let mut score = base;
    for m in PIPELINE {
        let factor = (m.apply)(&cx);
        score *= factor;
        let _ = write!(explanation, " {}={:.2}", m.name, factor);
    }

    CandidateScore {
        code: entry.code.clone(),
        title: entry.title.clone(),
        score,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ClassificationQuery;
    use crate::taxonomy::Taxonomy;
    use crate::text::TextCache;

    fn tax() -> Taxonomy {
        Taxonomy::from_csv_str(
            "code,title,definition\n\
             93100,Construction labourer,Clears work sites and removes debris at construction sites\n\
             24111,Accountant,Prepares financial statements and audits accounts\n",
        )
        .unwrap()
    }

    fn q(title: &str, duties: &str) -> QueryFeatures {
        QueryFeatures::build(&ClassificationQuery::new(title, duties), &TextCache::with_capacity(0))
    }

    #[test]
    fn explanation_itemizes_every_modifier() {
        let t = tax();
        let s = score_entry(&q("Labourer", "remove debris"), t.get("93100").unwrap(), &ScoringWeights::default());
        assert!(s.explanation.starts_with("title="), "{}", s.explanation);
        for m in PIPELINE {
            assert!(s.explanation.contains(&format!(" {}=", m.name)), "missing {}", m.name);
        }
        assert!(!s.explanation.contains("mgr_ctx"));
    }

    #[test]
    fn relevant_entry_outscores_unrelated_one() {
        let t = tax();
        let w = ScoringWeights::default();
        let query = q("Construction worker", "clear debris at work sites");
        let good = score_entry(&query, t.get("93100").unwrap(), &w);
        let bad = score_entry(&query, t.get("24111").unwrap(), &w);
        assert!(good.score > bad.score, "{} vs {}", good.explanation, bad.explanation);
        assert!(good.score > 0.0);
    }

    #[test]
    fn manager_queries_reblend_with_residual_context() {
        let t = tax();
        let s = score_entry(
            &q("Finance manager", "oversee financial statements"),
            t.get("24111").unwrap(),
            &ScoringWeights::default(),
        );
        assert!(s.explanation.contains("mgr_ctx="), "{}", s.explanation);
    }
}
