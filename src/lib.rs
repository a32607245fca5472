// src/lib.rs
// Public library surface for the CLI and integration tests.

pub mod analyze;
pub mod config;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod overrides;
pub mod query;
pub mod rules;
pub mod taxonomy;
pub mod text;

// ---- Re-exports for stable public API ----
pub use crate::config::{MatcherConfig, ScoringWeights};
pub use crate::engine::{ClassificationResult, CodingEngine, Strategy};
pub use crate::error::ConfigurationError;
pub use crate::overrides::OverrideTable;
pub use crate::query::ClassificationQuery;
pub use crate::rules::{RuleSet, RuleSpec};
pub use crate::taxonomy::Taxonomy;
