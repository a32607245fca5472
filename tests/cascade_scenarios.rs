// tests/cascade_scenarios.rs
//
// End-to-end records through the full priority cascade.

mod common;

use occupation_coder::{
    ClassificationQuery, CodingEngine, MatcherConfig, OverrideTable, Strategy, Taxonomy,
};

#[test]
fn electrician_hits_the_rule_table() {
    let r = common::engine().classify(&ClassificationQuery::new(
        "Electrician",
        "wiring and switchboard installation",
    ));
    assert_eq!(r.code, "74110");
    assert_eq!(r.strategy, Strategy::Rule);
    assert!((r.confidence - 0.66).abs() < 1e-6);
    assert!(r.explanation.contains("rule_electrician"), "{}", r.explanation);
}

#[test]
fn rule_confidence_is_configurable() {
    let cfg = MatcherConfig {
        rule_confidence: 0.8,
        ..MatcherConfig::default()
    };
    let r = common::engine_with(cfg).classify(&ClassificationQuery::new("Electrician", ""));
    assert_eq!(r.strategy, Strategy::Rule);
    assert!((r.confidence - 0.8).abs() < 1e-6);
}

#[test]
fn empty_record_is_no_input() {
    let r = common::engine().classify(&ClassificationQuery::new("", ""));
    assert_eq!(r.code, "X2000");
    assert_eq!(r.confidence, 1.0);
    assert_eq!(r.strategy, Strategy::NoInput);

    // punctuation only normalizes to nothing
    let r = common::engine().classify(&ClassificationQuery::new(" -- ", "(/)"));
    assert_eq!(r.code, "X2000");
}

#[test]
fn embedded_firmware_prefers_embedded_engineer_over_civil() {
    let engine = common::engine();
    let q = ClassificationQuery::new("Software Engineer", "develop embedded firmware for IoT devices");

    let embedded = engine.score_code(&q, "21526").unwrap();
    let civil = engine.score_code(&q, "21421").unwrap();
    assert!(
        embedded.score > civil.score,
        "embedded {} vs civil {}",
        embedded.explanation,
        civil.explanation
    );
    assert!(civil.explanation.contains("eng_discipline=0.10"), "{}", civil.explanation);

    let r = engine.classify(&q);
    assert_ne!(r.code, "21421");
    let pos = |code: &str| r.top_candidates.iter().position(|c| c.code == code);
    if let (Some(e), Some(c)) = (pos("21526"), pos("21421")) {
        assert!(e < c);
    }
}

#[test]
fn finance_director_override_needs_finance_context() {
    let engine = common::engine();

    let accepted = engine.classify(&ClassificationQuery::new(
        "Finance Director",
        "P&L, forecasting, budgeting",
    ));
    assert_eq!(accepted.code, "12111");
    assert_eq!(accepted.strategy, Strategy::CuratedOverride);
    assert_eq!(accepted.confidence, 1.0);

    let rejected = engine.classify(&ClassificationQuery::new(
        "Finance Director",
        "manages the factory floor and machine operators",
    ));
    assert_ne!(rejected.strategy, Strategy::CuratedOverride);
}

#[test]
fn exact_title_gives_full_confidence_on_a_leaf() {
    let engine = common::engine();
    let r = engine.classify(&ClassificationQuery::new("Wireman", ""));
    assert_eq!(r.strategy, Strategy::ExactTitle);
    assert_eq!(r.code, "74110");
    assert_eq!(r.confidence, 1.0);
    assert!(engine.taxonomy().get(&r.code).is_some_and(|e| e.is_leaf));
}

#[test]
fn group_titles_are_not_exact_matches() {
    // "Civil engineers" is the unit-group title, not a leaf
    let r = common::engine().classify(&ClassificationQuery::new("Civil engineers", ""));
    assert_ne!(r.strategy, Strategy::ExactTitle);
}

#[test]
fn armed_forces_and_diplomats_get_reserved_codes() {
    let engine = common::engine();
    let r = engine.classify(&ClassificationQuery::new("Army officer", "serves in the SAF infantry"));
    assert_eq!(r.code, "X3000");
    assert_eq!(r.strategy, Strategy::ReservedCode);
    assert_eq!(r.confidence, 1.0);

    let r = engine.classify(&ClassificationQuery::new("Soldier", "serves with the US army overseas"));
    assert_eq!(r.code, "X4000");
    assert_eq!(r.strategy, Strategy::ReservedCode);

    let r = engine.classify(&ClassificationQuery::new("Ambassador", "heads the embassy abroad"));
    assert_eq!(r.code, "X5000");
}

#[test]
fn weak_leaf_falls_back_to_parent_group() {
    let taxonomy = Taxonomy::from_csv_str(
        "SSOC 2024,SSOC 2024 Title,Detailed Definitions,Examples of Job Classified Under this Code
9999,Widget makers,Makes plastic and metal widgets in a workshop,
99991,Gizmo assembler,Assembles electronic gizmos on a production line,
",
    )
    .unwrap();
    let cfg = MatcherConfig {
        min_score: 0.3,
        ..MatcherConfig::default()
    };
    let engine = CodingEngine::new(taxonomy, OverrideTable::new(), cfg).unwrap();

    let r = engine.classify(&ClassificationQuery::new(
        "Widget maker",
        "makes plastic widgets in a workshop",
    ));
    assert_eq!(r.strategy, Strategy::ParentFallback, "{}", r.explanation);
    assert_eq!(r.code, "9999");
    assert!(r.confidence >= 0.3);
    // the leaf that missed the threshold is still reported
    assert_eq!(r.top_candidates[0].code, "99991");
    assert!(r.top_candidates[0].score < 0.3);
    assert!(r.explanation.starts_with("parent of 99991"), "{}", r.explanation);
}

#[test]
fn gibberish_is_forced_to_unidentifiable() {
    let r = common::engine().classify(&ClassificationQuery::new("Qwxz", "blorf zzyx"));
    assert_eq!(r.code, "X1000");
    assert_eq!(r.strategy, Strategy::ForcedAssignment);
    assert!(r.confidence < 0.05);
    assert!(!r.top_candidates.is_empty());
}

#[test]
fn without_forcing_the_best_leaf_is_returned() {
    let cfg = MatcherConfig {
        forced_assignment: false,
        ..MatcherConfig::default()
    };
    let engine = common::engine_with(cfg);
    let r = engine.classify(&ClassificationQuery::new("Qwxz", "blorf zzyx"));
    assert_ne!(r.code, "X1000");
    assert!(engine.taxonomy().get(&r.code).is_some_and(|e| e.is_leaf));
    assert_eq!(r.strategy, Strategy::Combined);
}

#[test]
fn duties_drive_the_statistical_path() {
    let r = common::engine().classify(&ClassificationQuery::new(
        "Crew",
        "serves espresso coffee drinks at the cafe counter",
    ));
    assert_eq!(r.strategy, Strategy::Combined);
    assert_eq!(r.code, "51321");
    assert!(r.top_candidates.len() <= 5);
    assert_eq!(r.top_candidates[0].code, r.code);
}

#[test]
fn result_serializes_with_strategy_label() {
    let r = common::engine().classify(&ClassificationQuery::new("", ""));
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["strategy"], "No Input");
    assert_eq!(v["code"], "X2000");
    assert!(v["top_candidates"].as_array().unwrap().is_empty());
}
