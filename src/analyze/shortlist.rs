// src/analyze/shortlist.rs
//! TF-IDF candidate shortlist over leaf entries.
//!
//! Terms are unigrams plus adjacent-token bigrams of each leaf's title and
//! description. Weights are raw term frequency times the smoothed idf
//! `ln((1+n)/(1+df)) + 1`, l2-normalized per document. Scoring walks an
//! inverted index, so only documents sharing a term with the query are touched.

use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

use crate::analyze::QueryFeatures;
use crate::taxonomy::Taxonomy;
use crate::text::tokenize;

#[derive(Debug, Default)]
pub struct ShortlistIndex {
    terms: HashMap<String, usize>,
    idf: Vec<f32>,
    /// term id -> (taxonomy entry index, normalized weight)
    postings: Vec<Vec<(usize, f32)>>,
    documents: usize,
}

fn term_counts(tokens: &[String]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for t in tokens {
        *counts.entry(t.clone()).or_default() += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{}_{}", pair[0], pair[1])).or_default() += 1;
    }
    counts
}

fn l2_normalize(weights: &mut [(usize, f32)]) {
    let norm = weights.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, w) in weights.iter_mut() {
            *w /= norm;
        }
    }
}

impl ShortlistIndex {
    /// Terms seen in fewer than `min_df` leaves are dropped.
    pub fn build(taxonomy: &Taxonomy, min_df: usize) -> Self {
        let leaves = taxonomy.leaf_indices();
        let docs: Vec<(usize, HashMap<String, usize>)> = leaves
            .iter()
            .filter_map(|&i| taxonomy.entry(i).map(|e| (i, term_counts(&tokenize(&e.context_norm)))))
            .collect();

        let mut df: HashMap<&str, usize> = HashMap::new();
        for (_, counts) in &docs {
            for term in counts.keys() {
                *df.entry(term.as_str()).or_default() += 1;
            }
        }

        let n = docs.len() as f32;
        let mut terms = HashMap::new();
        let mut idf = Vec::new();
        let mut kept: Vec<&str> = df
            .iter()
            .filter(|(_, d)| **d >= min_df.max(1))
            .map(|(t, _)| *t)
            .collect();
        kept.sort_unstable();
        for t in kept {
            let d = df[t] as f32;
            terms.insert(t.to_string(), idf.len());
            idf.push(((1.0 + n) / (1.0 + d)).ln() + 1.0);
        }

        let mut postings: Vec<Vec<(usize, f32)>> = vec![Vec::new(); idf.len()];
        for (entry_idx, counts) in &docs {
            let mut vec: Vec<(usize, f32)> = counts
                .iter()
                .filter_map(|(t, &tf)| terms.get(t).map(|&id| (id, tf as f32 * idf[id])))
                .collect();
            l2_normalize(&mut vec);
            for (id, w) in vec {
                postings[id].push((*entry_idx, w));
            }
        }

        debug!(target: "occupation", documents = docs.len(), terms = idf.len(), "shortlist index built");
        Self {
            terms,
            idf,
            postings,
            documents: docs.len(),
        }
    }

    pub fn term_count(&self) -> usize {
        self.idf.len()
    }

    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// Up to `k` taxonomy entry indices by descending cosine similarity, ties
    /// in catalogue order. `None` when the query shares no indexed term.
    pub fn top_k(&self, query: &QueryFeatures, k: usize) -> Option<Vec<usize>> {
        if k == 0 || self.idf.is_empty() {
            return None;
        }
        let tokens = &query.combined.tokens;
        let mut qvec: Vec<(usize, f32)> = term_counts(tokens)
            .into_iter()
            .filter_map(|(t, tf)| self.terms.get(&t).map(|&id| (id, tf as f32 * self.idf[id])))
            .collect();
        if qvec.is_empty() {
            return None;
        }
        l2_normalize(&mut qvec);

        let mut scores: HashMap<usize, f32> = HashMap::new();
        for (id, qw) in qvec {
            for &(doc, dw) in &self.postings[id] {
                *scores.entry(doc).or_default() += qw * dw;
            }
        }
        let mut ranked: Vec<(usize, f32)> = scores.into_iter().filter(|(_, s)| *s > 0.0).collect();
        if ranked.is_empty() {
            return None;
        }
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));
        ranked.truncate(k);
        Some(ranked.into_iter().map(|(i, _)| i).collect())
    }
}
