// src/engine.rs
//! # Coding engine
//! Runs one survey record through the priority cascade and returns a code,
//! a confidence and an explanation of how it was reached.
//!
//! Order: blank input, curated override, rule table, exact title, reserved
//! codes, then the weighted statistical path with parent fallback and forced
//! assignment. The engine is immutable after construction except for its text
//! cache, so one instance can serve many threads.

use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::Write as _;
use tracing::{debug, info};

use crate::analyze::{score_entry, CandidateScore, QueryFeatures, ShortlistIndex};
use crate::config::MatcherConfig;
use crate::error::ConfigurationError;
use crate::lexicon::{DIPLOMATIC, FOREIGN_ARMED_FORCES, NATIONAL_ARMED_FORCES};
use crate::overrides::OverrideTable;
use crate::query::ClassificationQuery;
use crate::rules::RuleSet;
use crate::taxonomy::{self, reserved_title, Taxonomy};
use crate::text::TextCache;

/// Candidates kept on a result for review.
pub const TOP_CANDIDATES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strategy {
    #[serde(rename = "Curated Override")]
    CuratedOverride,
    #[serde(rename = "Baked-in Rule")]
    Rule,
    #[serde(rename = "Exact Title Match")]
    ExactTitle,
    #[serde(rename = "No Input")]
    NoInput,
    #[serde(rename = "Reserved Code")]
    ReservedCode,
    #[serde(rename = "Title + Duties (Combined)")]
    Combined,
    #[serde(rename = "Parent Fallback")]
    ParentFallback,
    #[serde(rename = "Forced Assignment")]
    ForcedAssignment,
}

impl Strategy {
    pub fn label(self) -> &'static str {
        match self {
            Self::CuratedOverride => "Curated Override",
            Self::Rule => "Baked-in Rule",
            Self::ExactTitle => "Exact Title Match",
            Self::NoInput => "No Input",
            Self::ReservedCode => "Reserved Code",
            Self::Combined => "Title + Duties (Combined)",
            Self::ParentFallback => "Parent Fallback",
            Self::ForcedAssignment => "Forced Assignment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub code: String,
    pub title: String,
    pub confidence: f32,
    pub explanation: String,
    pub strategy: Strategy,
    /// Best-scoring leaves, statistical path only.
    pub top_candidates: Vec<CandidateScore>,
}

impl ClassificationResult {
    fn fixed(code: &str, title: &str, confidence: f32, strategy: Strategy, explanation: String) -> Self {
        Self {
            code: code.to_string(),
            title: title.to_string(),
            confidence,
            explanation,
            strategy,
            top_candidates: Vec::new(),
        }
    }

    fn reserved(code: &str, confidence: f32, strategy: Strategy, explanation: String) -> Self {
        Self::fixed(code, reserved_title(code).unwrap_or_default(), confidence, strategy, explanation)
    }
}

/// Short stable identifier for a record; raw survey text never reaches the logs.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn by_score_desc(a: &CandidateScore, b: &CandidateScore) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}

#[derive(Debug)]
pub struct CodingEngine {
    taxonomy: Taxonomy,
    overrides: OverrideTable,
    rules: RuleSet,
    shortlist: Option<ShortlistIndex>,
    leaves: Vec<usize>,
    config: MatcherConfig,
    cache: TextCache,
}

impl CodingEngine {
    /// Engine with the built-in rule table.
    pub fn new(
        taxonomy: Taxonomy,
        overrides: OverrideTable,
        config: MatcherConfig,
    ) -> Result<Self, ConfigurationError> {
        let rules = RuleSet::builtin()?;
        Ok(Self::with_rules(taxonomy, overrides, rules, config))
    }

    pub fn with_rules(
        taxonomy: Taxonomy,
        overrides: OverrideTable,
        rules: RuleSet,
        config: MatcherConfig,
    ) -> Self {
        overrides.audit(&taxonomy);
        let leaves = taxonomy.leaf_indices();
        let shortlist = (config.shortlist_enabled && leaves.len() > config.shortlist_size)
            .then(|| ShortlistIndex::build(&taxonomy, config.shortlist_min_df));
        info!(
            target: "occupation",
            leaves = leaves.len(),
            rules = rules.len(),
            overrides = overrides.len(),
            shortlist = shortlist.is_some(),
            min_score = config.min_score,
            "coding engine ready"
        );
        Self {
            cache: TextCache::with_capacity(config.cache_capacity),
            taxonomy,
            overrides,
            rules,
            shortlist,
            leaves,
            config,
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Always returns a result; unmatched input ends in `X1000` or the best
    /// available candidate depending on `forced_assignment`.
    pub fn classify(&self, query: &ClassificationQuery) -> ClassificationResult {
        let features = QueryFeatures::build(query, &self.cache);
        let result = self.cascade(&features);

        debug!(
            target: "occupation",
            record = %anon_hash(&format!("{}\n{}", query.title_text, query.duties_text)),
            code = %result.code,
            strategy = result.strategy.label(),
            confidence = result.confidence,
            qualification_present = !query.qualification_text.trim().is_empty(),
            income_present = query.income.is_some(),
            "classified"
        );
        crate::metrics::record(&result);
        result
    }

    /// Parallel over records; output order matches input order.
    pub fn classify_batch(&self, queries: &[ClassificationQuery]) -> Vec<ClassificationResult> {
        queries.par_iter().map(|q| self.classify(q)).collect()
    }

    /// Scores one catalogue entry for a query, whatever the cascade would pick.
    pub fn score_code(&self, query: &ClassificationQuery, code: &str) -> Option<CandidateScore> {
        let entry = self.taxonomy.get(code)?;
        let features = QueryFeatures::build(query, &self.cache);
        Some(score_entry(&features, entry, &self.config.weights))
    }

    fn cascade(&self, q: &QueryFeatures) -> ClassificationResult {
        // Blank input matches no override or rule, so X2000 is decided before both.
        if q.is_blank() {
            return ClassificationResult::reserved(
                taxonomy::NOT_REPORTED,
                1.0,
                Strategy::NoInput,
                "title and duties are empty".to_string(),
            );
        }

        if let Some(hit) = self.overrides.resolve(q, &self.taxonomy) {
            return ClassificationResult::fixed(
                &hit.code,
                &hit.title,
                1.0,
                Strategy::CuratedOverride,
                hit.check.describe(),
            );
        }

        if let Some(m) = self.rules.evaluate(&q.title.normalized, &q.combined.normalized) {
            return ClassificationResult::fixed(
                &m.code,
                &m.title,
                self.config.rule_confidence,
                Strategy::Rule,
                format!("rule {}", m.rule_id),
            );
        }

        if let Some(entry) = self.taxonomy.exact_leaf(&q.title.normalized) {
            return ClassificationResult::fixed(
                &entry.code,
                &entry.title,
                1.0,
                Strategy::ExactTitle,
                format!("title matches catalogue title variant of {}", entry.code),
            );
        }

        if let Some(result) = reserved_code(q) {
            return result;
        }

        self.statistical(q)
    }

    fn candidate_indices(&self, q: &QueryFeatures) -> Vec<usize> {
        self.shortlist
            .as_ref()
            .and_then(|idx| idx.top_k(q, self.config.shortlist_size))
            .unwrap_or_else(|| self.leaves.clone())
    }

    fn statistical(&self, q: &QueryFeatures) -> ClassificationResult {
        let w = &self.config.weights;
        let mut scored: Vec<CandidateScore> = self
            .candidate_indices(q)
            .into_iter()
            .filter_map(|i| self.taxonomy.entry(i))
            .map(|e| score_entry(q, e, w))
            .collect();
        // stable: equal scores keep catalogue order
        scored.sort_by(by_score_desc);
        scored.truncate(TOP_CANDIDATES);

        let Some(best) = scored.first().cloned() else {
            return ClassificationResult::reserved(
                taxonomy::UNIDENTIFIABLE,
                0.0,
                Strategy::ForcedAssignment,
                "catalogue has no leaf entries".to_string(),
            );
        };

        let min_score = self.config.min_score;
        if best.score >= min_score {
            return ClassificationResult {
                code: best.code,
                title: best.title,
                confidence: best.score,
                explanation: best.explanation,
                strategy: Strategy::Combined,
                top_candidates: scored,
            };
        }

        if let Some(parent) = self.best_parent(q, &scored) {
            if parent.score >= min_score {
                return ClassificationResult {
                    code: parent.code,
                    title: parent.title,
                    confidence: parent.score,
                    explanation: format!("parent of {}: {}", best.code, parent.explanation),
                    strategy: Strategy::ParentFallback,
                    top_candidates: scored,
                };
            }
        }

        if self.config.forced_assignment {
            let mut result = ClassificationResult::reserved(
                taxonomy::UNIDENTIFIABLE,
                best.score,
                Strategy::ForcedAssignment,
                format!(
                    "best score {:.3} ({}) below threshold {:.3}",
                    best.score, best.code, min_score
                ),
            );
            result.top_candidates = scored;
            return result;
        }

        ClassificationResult {
            code: best.code,
            title: best.title,
            confidence: best.score,
            explanation: best.explanation,
            strategy: Strategy::Combined,
            top_candidates: scored,
        }
    }

    fn best_parent(&self, q: &QueryFeatures, leaves: &[CandidateScore]) -> Option<CandidateScore> {
        let mut seen = HashSet::new();
        let mut parents: Vec<CandidateScore> = leaves
            .iter()
            .filter_map(|c| self.taxonomy.parent_of(&c.code))
            .filter(|p| seen.insert(p.code.clone()))
            .map(|p| score_entry(q, p, &self.config.weights))
            .collect();
        parents.sort_by(by_score_desc);
        parents.into_iter().next()
    }
}

fn reserved_code(q: &QueryFeatures) -> Option<ClassificationResult> {
    let text = &q.combined.normalized;
    let (code, cue) = if NATIONAL_ARMED_FORCES.is_match(text) {
        (taxonomy::NATIONAL_ARMED_FORCES, "national armed forces")
    } else if FOREIGN_ARMED_FORCES.is_match(text) {
        (taxonomy::FOREIGN_ARMED_FORCES, "foreign armed forces")
    } else if DIPLOMATIC.is_match(text) {
        (taxonomy::FOREIGN_DIPLOMATIC, "diplomatic")
    } else {
        return None;
    };
    Some(ClassificationResult::reserved(
        code,
        1.0,
        Strategy::ReservedCode,
        format!("{cue} cue"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
code,title,definition,examples
5132,Baristas,,
51321,Barista,Prepares and serves espresso coffee drinks at a cafe counter,Espresso artisan
24111,Accountant (General),Prepares financial statements and audits company accounts,
";

    fn engine(config: MatcherConfig) -> CodingEngine {
        let t = Taxonomy::from_csv_str(CSV).unwrap();
        CodingEngine::new(t, OverrideTable::new(), config).unwrap()
    }

    #[test]
    fn anon_hash_is_short_and_stable() {
        let h = anon_hash("Cashier\nscan items");
        assert_eq!(h.len(), 12);
        assert_eq!(h, anon_hash("Cashier\nscan items"));
        assert_ne!(h, anon_hash("Cashier\nscan item"));
    }

    #[test]
    fn blank_record_is_not_reported() {
        let r = engine(MatcherConfig::default()).classify(&ClassificationQuery::new("  ", ""));
        assert_eq!(r.code, "X2000");
        assert_eq!(r.strategy, Strategy::NoInput);
        assert_eq!(r.confidence, 1.0);
    }

    #[test]
    fn exact_title_beats_statistics() {
        let r = engine(MatcherConfig::default()).classify(&ClassificationQuery::new("Espresso Artisan", ""));
        assert_eq!(r.code, "51321");
        assert_eq!(r.strategy, Strategy::ExactTitle);
    }

    #[test]
    fn statistical_path_reports_top_candidates() {
        let r = engine(MatcherConfig::default())
            .classify(&ClassificationQuery::new("Coffee crew", "prepares espresso drinks at the counter"));
        assert_eq!(r.strategy, Strategy::Combined);
        assert_eq!(r.code, "51321");
        assert!(!r.top_candidates.is_empty() && r.top_candidates.len() <= TOP_CANDIDATES);
        assert!(r.top_candidates.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn forced_when_nothing_reaches_threshold() {
        let cfg = MatcherConfig {
            min_score: 1.0,
            ..MatcherConfig::default()
        };
        let e = engine(cfg);
        let q = ClassificationQuery::new("Coffee crew", "espresso");
        let r = e.classify(&q);
        // nothing reaches 1.0, so the record is forced
        assert_eq!(r.code, "X1000");
        assert_eq!(r.strategy, Strategy::ForcedAssignment);
        assert!(r.confidence < 1.0);
        assert!(e.score_code(&q, "5132").is_some());
        assert!(e.score_code(&q, "99999").is_none());
    }

    #[test]
    fn strategy_labels_serialize() {
        let json = serde_json::to_string(&Strategy::Combined).unwrap();
        assert_eq!(json, "\"Title + Duties (Combined)\"");
        assert_eq!(Strategy::Rule.label(), "Baked-in Rule");
    }
}
