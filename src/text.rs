// src/text.rs
//! Text normalization, tokenization and the per-engine memo cache.
//!
//! Everything downstream (rules, title lookup, scoring) works on the output of
//! [`normalize`], so the function must stay idempotent: feeding normalized text
//! back in returns it unchanged.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::lexicon::{self, SectorSet};

/// Survey boilerplate plus English function words. Seniority fillers are
/// included on purpose: "senior accountant" should look like "accountant".
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "responsible",
        "responsibilities",
        "duty",
        "duties",
        "works",
        "work",
        "working",
        "perform",
        "performing",
        "including",
        "include",
        "includes",
        "ensure",
        "ensuring",
        "handle",
        "handling",
        "related",
        "etc",
        "various",
        "tasks",
        "high",
        "quality",
        "according",
        "specifications",
        "required",
        "standards",
        "time",
        "company",
        "superiors",
        "based",
        "prepare",
        "preparing",
        "progress",
        "senior",
        "junior",
        "lead",
        "sr",
        "jr",
        // function words
        "a",
        "an",
        "and",
        "the",
        "of",
        "to",
        "for",
        "in",
        "on",
        "at",
        "by",
        "with",
        "from",
        "or",
        "as",
        "is",
        "are",
        "be",
    ]
    .into_iter()
    .collect()
});

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Lowercase, turn `_ / , - ( ) &` into spaces, drop everything that is not an
/// ASCII letter or whitespace, collapse whitespace.
pub fn normalize(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for ch in text.chars().flat_map(char::to_lowercase) {
        match ch {
            '_' | '/' | ',' | '-' | '(' | ')' | '&' => cleaned.push(' '),
            'a'..='z' => cleaned.push(ch),
            c if c.is_whitespace() => cleaned.push(' '),
            _ => {}
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize, split, and drop stopwords and pure-digit tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|w| !w.is_empty() && !is_stopword(w) && !w.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Adjacent token pairs joined with `_`.
pub fn bigrams(tokens: &[String]) -> HashSet<String> {
    tokens
        .windows(2)
        .map(|w| format!("{}_{}", w[0], w[1]))
        .collect()
}

/// Everything derived from one piece of text that the matcher needs.
#[derive(Debug, Clone, Default)]
pub struct TextFeatures {
    pub normalized: String,
    pub tokens: Vec<String>,
    pub token_set: HashSet<String>,
    pub bigrams: HashSet<String>,
    pub sectors: SectorSet,
}

impl TextFeatures {
    pub fn from_text(text: &str) -> Self {
        let normalized = normalize(text);
        let tokens = tokenize(&normalized);
        let token_set: HashSet<String> = tokens.iter().cloned().collect();
        let bigrams = bigrams(&tokens);
        let sectors = lexicon::sector_cues_in(&normalized, &token_set);
        Self {
            normalized,
            tokens,
            token_set,
            bigrams,
            sectors,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

pub const DEFAULT_CACHE_CAPACITY: usize = 100_000;

/// Bounded memo of [`TextFeatures`] keyed by raw input.
///
/// Survey batches repeat the same titles constantly, so the engine owns one of
/// these. When full it is cleared wholesale. Two threads racing on the same key
/// may both compute; the second insert is dropped.
#[derive(Debug)]
pub struct TextCache {
    entries: RwLock<HashMap<String, Arc<TextFeatures>>>,
    capacity: usize,
}

impl Default for TextCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl TextCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    pub fn features(&self, text: &str) -> Arc<TextFeatures> {
        if self.capacity == 0 {
            return Arc::new(TextFeatures::from_text(text));
        }
        if let Some(hit) = self.entries.read().get(text) {
            return Arc::clone(hit);
        }
        let computed = Arc::new(TextFeatures::from_text(text));
        let mut map = self.entries.write();
        if map.len() >= self.capacity {
            map.clear();
        }
        Arc::clone(map.entry(text.to_string()).or_insert(computed))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_separators_and_junk() {
        assert_eq!(normalize("  Sales/Marketing-Exec (F&B) "), "sales marketing exec f b");
        assert_eq!(normalize("O'Brien's  A.C. tech #2"), "obriens ac tech");
        assert_eq!(normalize("Café Manager"), "caf manager");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_is_idempotent_on_examples() {
        for s in ["Lorry  Driver", "HR/Admin", "Chief-Executive_Officer", "ÜBER 123"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn tokenize_drops_stopwords() {
        let toks = tokenize("Responsible for the senior accounts and payroll duties");
        assert_eq!(toks, vec!["accounts".to_string(), "payroll".to_string()]);
    }

    #[test]
    fn bigrams_join_adjacent_tokens() {
        let toks = tokenize("lorry driver delivery");
        let bi = bigrams(&toks);
        assert!(bi.contains("lorry_driver"));
        assert!(bi.contains("driver_delivery"));
        assert_eq!(bi.len(), 2);
    }

    #[test]
    fn features_carry_sector_cues() {
        let f = TextFeatures::from_text("Warehouse forklift operator");
        assert!(f.sectors.contains("logistics"), "{:?}", f.sectors);
    }

    #[test]
    fn cache_returns_shared_entry_and_stays_bounded() {
        let cache = TextCache::with_capacity(2);
        let a1 = cache.features("Lorry driver");
        let a2 = cache.features("Lorry driver");
        assert!(Arc::ptr_eq(&a1, &a2));
        cache.features("Cook");
        cache.features("Baker");
        assert!(cache.len() <= 2);
    }

    #[test]
    fn zero_capacity_cache_never_stores() {
        let cache = TextCache::with_capacity(0);
        cache.features("Cook");
        assert!(cache.is_empty());
    }
}
