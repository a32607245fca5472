// src/overrides.rs
//! Hand-vetted title → code overrides, with a context check for managerial and
//! engineering titles so that a vetted "finance director" mapping is not applied
//! to someone who actually runs a factory floor.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use crate::analyze::similarity::residual_overlap;
use crate::analyze::QueryFeatures;
use crate::error::ConfigurationError;
use crate::lexicon::{any_in, GENERIC_ENGINEERING, SUPERVISORY};
use crate::taxonomy::{CatalogueTable, Taxonomy};
use crate::text::normalize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OverrideEntry {
    pub code: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OverrideRecord {
    original_title: String,
    code: String,
    title: String,
}

/// Accepted override plus the context check that let it through.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideHit {
    pub code: String,
    pub title: String,
    pub check: OverrideCheck,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverrideCheck {
    /// Title carries no managerial or engineering vocabulary.
    Unconditional,
    /// Override code is not in the catalogue, nothing to compare against.
    Uncatalogued,
    Managerial(f32),
    Engineering(f32),
}

impl OverrideCheck {
    pub fn describe(&self) -> String {
        match self {
            Self::Unconditional => "curated override".to_string(),
            Self::Uncatalogued => "curated override (code not in catalogue)".to_string(),
            Self::Managerial(s) => format!("curated override (manager context {:.2})", s),
            Self::Engineering(s) => format!("curated override (engineer context {:.2})", s),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    map: HashMap<String, OverrideEntry>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later inserts for the same normalized title replace earlier ones.
    pub fn insert(&mut self, original_title: &str, code: &str, title: &str) {
        let key = normalize(original_title);
        let code = code.trim();
        if key.is_empty() || code.is_empty() {
            return;
        }
        self.map.insert(
            key,
            OverrideEntry {
                code: code.to_string(),
                title: title.trim().to_string(),
            },
        );
    }

    /// `[{"original_title": ..., "code": ..., "title": ...}, ...]`
    pub fn from_json_str(s: &str) -> Result<Self, ConfigurationError> {
        let records: Vec<OverrideRecord> = serde_json::from_str(s)?;
        let mut table = Self::new();
        for r in records {
            table.insert(&r.original_title, &r.code, &r.title);
        }
        Ok(table)
    }

    /// Spreadsheet layout: a column naming the original title, a code column and
    /// a column with the mapped title.
    pub fn from_table(table: &CatalogueTable) -> Result<Self, ConfigurationError> {
        let keys: Vec<String> = table.headers.iter().map(|h| h.to_lowercase()).collect();
        let original_col = keys
            .iter()
            .position(|k| k.contains("original") && k.contains("title"))
            .ok_or_else(|| ConfigurationError::Overrides("no original-title column".into()))?;
        let code_col = keys
            .iter()
            .position(|k| k.contains("code"))
            .ok_or_else(|| ConfigurationError::Overrides("no code column".into()))?;
        let title_col = (0..keys.len())
            .find(|&i| i != original_col && keys[i].contains("title") && !keys[i].contains("original"))
            .ok_or_else(|| ConfigurationError::Overrides("no mapped-title column".into()))?;

        let mut out = Self::new();
        for row in &table.rows {
            out.insert(
                &table.cell(row, original_col),
                &table.cell(row, code_col),
                &table.cell(row, title_col),
            );
        }
        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, normalized_title: &str) -> Option<&OverrideEntry> {
        self.map.get(normalized_title)
    }

    /// Logs overrides whose code the catalogue does not know.
    pub fn audit(&self, taxonomy: &Taxonomy) -> usize {
        let unknown: Vec<&str> = self
            .map
            .values()
            .filter(|e| taxonomy.get(&e.code).is_none())
            .map(|e| e.code.as_str())
            .collect();
        for code in &unknown {
            warn!(target: "occupation", %code, "override code not present in catalogue");
        }
        info!(
            target: "occupation",
            overrides = self.map.len(),
            unknown = unknown.len(),
            "override table loaded"
        );
        unknown.len()
    }

    /// Looks up the query title and runs the context check.
    pub fn resolve(&self, query: &QueryFeatures, taxonomy: &Taxonomy) -> Option<OverrideHit> {
        let entry = self.map.get(&query.title.normalized)?;
        let title_tokens = &query.title.token_set;

        let check = match taxonomy.get(&entry.code) {
            None => OverrideCheck::Uncatalogued,
            Some(candidate) => {
                if any_in(title_tokens, &SUPERVISORY) {
                    OverrideCheck::Managerial(residual_overlap(
                        &query.combined.token_set,
                        &candidate.blob.token_set,
                        &SUPERVISORY,
                    ))
                } else if has_engineer(title_tokens) {
                    OverrideCheck::Engineering(residual_overlap(
                        &query.combined.token_set,
                        &candidate.blob.token_set,
                        &GENERIC_ENGINEERING,
                    ))
                } else {
                    OverrideCheck::Unconditional
                }
            }
        };

        let accepted = match check {
            OverrideCheck::Managerial(s) | OverrideCheck::Engineering(s) => s > 0.0,
            OverrideCheck::Unconditional | OverrideCheck::Uncatalogued => true,
        };
        accepted.then(|| OverrideHit {
            code: entry.code.clone(),
            title: entry.title.clone(),
            check,
        })
    }
}

fn has_engineer(tokens: &HashSet<String>) -> bool {
    tokens.contains("engineer") || tokens.contains("engineers")
}
