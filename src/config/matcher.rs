// src/config/matcher.rs
//! Matcher configuration: acceptance threshold, cascade switches, shortlist size
//! and every blend weight and multiplier the scorer uses.
//!
//! TOML shape (all keys optional):
//! ```toml
//! min_score = 0.05
//! forced_assignment = true
//! rule_confidence = 0.66
//! shortlist_size = 150
//!
//! [weights]
//! title = 0.40
//! description = 0.60
//! group_match = 1.12
//! ```

use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ConfigurationError;

pub const DEFAULT_MATCHER_CONFIG_PATH: &str = "config/matcher.toml";
pub const DEFAULT_MIN_SCORE: f32 = 0.05;

pub const ENV_MATCHER_CONFIG_PATH: &str = "OCCUPATION_CONFIG_PATH";
pub const ENV_MIN_SCORE: &str = "OCCUPATION_MIN_SCORE";

fn default_min_score() -> f32 {
    DEFAULT_MIN_SCORE
}
fn default_true() -> bool {
    true
}
fn default_rule_confidence() -> f32 {
    0.66
}
fn default_shortlist_size() -> usize {
    150
}
fn default_shortlist_min_df() -> usize {
    2
}
fn default_cache_capacity() -> usize {
    crate::text::DEFAULT_CACHE_CAPACITY
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Acceptance threshold for the statistical path, 0..1.
    #[serde(default = "default_min_score")]
    pub min_score: f32,
    /// Substitute the unidentifiable code when nothing clears the threshold.
    #[serde(default = "default_true")]
    pub forced_assignment: bool,
    #[serde(default = "default_rule_confidence")]
    pub rule_confidence: f32,
    #[serde(default = "default_true")]
    pub shortlist_enabled: bool,
    #[serde(default = "default_shortlist_size")]
    pub shortlist_size: usize,
    #[serde(default = "default_shortlist_min_df")]
    pub shortlist_min_df: usize,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    pub weights: ScoringWeights,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            forced_assignment: true,
            rule_confidence: default_rule_confidence(),
            shortlist_enabled: true,
            shortlist_size: default_shortlist_size(),
            shortlist_min_df: default_shortlist_min_df(),
            cache_capacity: default_cache_capacity(),
            weights: ScoringWeights::default(),
        }
    }
}

/// Blend weights and multipliers. Penalties are below 1, boosts above.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub title: f32,
    pub description: f32,

    pub ratio: f32,
    pub set_overlap: f32,
    pub jaccard: f32,
    pub bigram: f32,
    pub action_per_hit: f32,
    pub action_cap: f32,
    /// Share of the residual-context score when re-blending managers/engineers.
    pub context_blend: f32,

    pub seniority_same_sector: f32,
    pub seniority_other_sector: f32,
    pub title_seniority_conflict: f32,
    pub coherence_penalty: f32,
    pub title_duty_conflict: f32,
    pub title_sector_heavy: f32,
    pub title_sector_other: f32,
    pub cluster_boost: f32,

    pub group_match: f32,
    pub group_mismatch: f32,

    pub industry_moderate_ratio: f32,
    pub industry_moderate: f32,
    pub industry_strong_ratio: f32,
    pub industry_strong: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            title: 0.40,
            description: 0.60,
            ratio: 0.15,
            set_overlap: 0.40,
            jaccard: 0.20,
            bigram: 0.25,
            action_per_hit: 0.20,
            action_cap: 0.45,
            context_blend: 0.5,
            seniority_same_sector: 0.90,
            seniority_other_sector: 0.65,
            title_seniority_conflict: 0.40,
            coherence_penalty: 0.78,
            title_duty_conflict: 0.85,
            title_sector_heavy: 0.45,
            title_sector_other: 0.70,
            cluster_boost: 1.35,
            group_match: 1.12,
            group_mismatch: 0.55,
            industry_moderate_ratio: 0.40,
            industry_moderate: 1.20,
            industry_strong_ratio: 0.75,
            industry_strong: 1.40,
        }
    }
}

// parse optional float env and clamp to <0.0..=1.0>
fn parse_min_score_env(raw: Option<String>) -> Option<f32> {
    raw.and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

impl MatcherConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigurationError> {
        let mut cfg: MatcherConfig = toml::from_str(s)?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Reads a TOML file. Unlike [`MatcherConfig::load`], a missing file is an error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigurationError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Uses `OCCUPATION_CONFIG_PATH` or `config/matcher.toml`. A missing default
    /// file yields defaults; `OCCUPATION_MIN_SCORE` overrides the threshold.
    pub fn load() -> Result<Self, ConfigurationError> {
        let explicit = std::env::var(ENV_MATCHER_CONFIG_PATH).ok().map(PathBuf::from);
        let path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MATCHER_CONFIG_PATH));

        let mut cfg = match fs::read_to_string(&path) {
            Ok(content) => Self::from_toml_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound && explicit.is_none() => {
                info!(target: "occupation", path = %path.display(), "no matcher config, using defaults");
                Self::default()
            }
            Err(e) => return Err(ConfigurationError::io(path, e)),
        };

        cfg.apply_env();
        Ok(cfg)
    }

    pub fn apply_env(&mut self) {
        if let Some(t) = parse_min_score_env(std::env::var(ENV_MIN_SCORE).ok()) {
            self.min_score = t;
        }
    }

    fn sanitize(&mut self) {
        if !self.min_score.is_finite() || !(0.0..=1.0).contains(&self.min_score) {
            self.min_score = DEFAULT_MIN_SCORE;
        }
        if !self.rule_confidence.is_finite() || !(0.0..=1.0).contains(&self.rule_confidence) {
            self.rule_confidence = default_rule_confidence();
        }
        if self.shortlist_size == 0 {
            self.shortlist_size = default_shortlist_size();
        }
        self.shortlist_min_df = self.shortlist_min_df.max(1);

        let w = &mut self.weights;
        let d = ScoringWeights::default();
        if w.title < 0.0 || w.description < 0.0 || w.title + w.description <= 0.0 {
            w.title = d.title;
            w.description = d.description;
        }
        if !(0.0..=1.0).contains(&w.context_blend) {
            w.context_blend = d.context_blend;
        }
        if w.industry_moderate_ratio > w.industry_strong_ratio {
            std::mem::swap(&mut w.industry_moderate_ratio, &mut w.industry_strong_ratio);
        }
        // multipliers must stay positive so one bad value cannot zero every score
        for m in [
            &mut w.seniority_same_sector,
            &mut w.seniority_other_sector,
            &mut w.title_seniority_conflict,
            &mut w.coherence_penalty,
            &mut w.title_duty_conflict,
            &mut w.title_sector_heavy,
            &mut w.title_sector_other,
            &mut w.cluster_boost,
            &mut w.group_match,
            &mut w.group_mismatch,
            &mut w.industry_moderate,
            &mut w.industry_strong,
        ] {
            if !m.is_finite() || *m <= 0.0 {
                *m = 1.0;
            }
        }
        // industry match only ever boosts
        w.industry_moderate = w.industry_moderate.max(1.0);
        if w.industry_strong < w.industry_moderate {
            w.industry_strong = w.industry_moderate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = MatcherConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, MatcherConfig::default());
        assert!((cfg.min_score - 0.05).abs() < 1e-6);
        assert!(cfg.forced_assignment);
    }

    #[test]
    fn partial_weights_keep_other_defaults() {
        let cfg = MatcherConfig::from_toml_str(
            r#"
min_score = 0.2
[weights]
group_match = 1.3
"#,
        )
        .unwrap();
        assert!((cfg.min_score - 0.2).abs() < 1e-6);
        assert!((cfg.weights.group_match - 1.3).abs() < 1e-6);
        assert!((cfg.weights.group_mismatch - 0.55).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_values_are_sanitized() {
        let cfg = MatcherConfig::from_toml_str(
            r#"
min_score = 7.0
shortlist_size = 0
[weights]
group_mismatch = -1.0
industry_moderate_ratio = 0.9
industry_strong_ratio = 0.3
"#,
        )
        .unwrap();
        assert!((cfg.min_score - DEFAULT_MIN_SCORE).abs() < 1e-6);
        assert_eq!(cfg.shortlist_size, 150);
        assert!((cfg.weights.group_mismatch - 1.0).abs() < 1e-6);
        assert!(cfg.weights.industry_moderate_ratio < cfg.weights.industry_strong_ratio);
    }

    #[test]
    fn malformed_toml_is_a_configuration_error() {
        let err = MatcherConfig::from_toml_str("min_score = [").unwrap_err();
        assert!(matches!(err, ConfigurationError::Toml(_)));
    }

    #[test]
    fn min_score_env_parsing_clamps() {
        assert_eq!(parse_min_score_env(Some(" 0.3 ".into())), Some(0.3));
        assert_eq!(parse_min_score_env(Some("5".into())), Some(1.0));
        assert_eq!(parse_min_score_env(Some("abc".into())), None);
        assert_eq!(parse_min_score_env(None), None);
    }
}
