// tests/rule_order.rs
//
// Rule tables are ordered: on overlap the earlier rule wins, whatever its
// specificity.

mod common;

use occupation_coder::rules::RuleSpec;
use occupation_coder::{ClassificationQuery, CodingEngine, MatcherConfig, RuleSet, Strategy};

fn spec(id: &str, pattern: &str, code: &str, title: &str) -> RuleSpec {
    RuleSpec {
        id: id.to_string(),
        pattern: pattern.to_string(),
        code: code.to_string(),
        title: title.to_string(),
        context: None,
        title_only: true,
    }
}

#[test]
fn earlier_rule_wins_on_overlap() {
    let rules = RuleSet::from_specs(&[
        spec("broad_clerk", r"\bclerk\b", "41101", "General office clerk"),
        spec("store_clerk", r"\bstore clerk\b", "43212", "Storekeeper"),
    ])
    .unwrap();
    let m = rules.evaluate("store clerk", "store clerk").unwrap();
    assert_eq!(m.rule_id, "broad_clerk");

    let reversed = RuleSet::from_specs(&[
        spec("store_clerk", r"\bstore clerk\b", "43212", "Storekeeper"),
        spec("broad_clerk", r"\bclerk\b", "41101", "General office clerk"),
    ])
    .unwrap();
    assert_eq!(reversed.evaluate("store clerk", "store clerk").unwrap().code, "43212");
}

#[test]
fn engine_uses_custom_rule_order() {
    let rules = RuleSet::from_json_str(
        r#"[
            {"id": "cleaner_first", "pattern": "\\bcleaner\\b", "code": "91131",
             "title": "Office/Commercial/Industrial establishment indoor cleaner"},
            {"id": "office_second", "pattern": "\\boffice\\b", "code": "41101",
             "title": "General office clerk"}
        ]"#,
    )
    .unwrap();
    let engine = CodingEngine::with_rules(
        common::taxonomy(),
        common::overrides(),
        rules,
        MatcherConfig::default(),
    );
    let r = engine.classify(&ClassificationQuery::new("Office cleaner", ""));
    assert_eq!(r.strategy, Strategy::Rule);
    assert_eq!(r.code, "91131");
    assert!(r.explanation.contains("cleaner_first"));
}

#[test]
fn builtin_table_prefers_specific_language_teacher() {
    let rules = RuleSet::builtin().unwrap();
    let m = rules.evaluate("mandarin teacher", "mandarin teacher").unwrap();
    assert_eq!(m.rule_id, "rule_specific_language_teacher");
    assert_eq!(m.code, "36201");
}

#[test]
fn context_rules_read_the_duties() {
    let rules = RuleSet::from_specs(&[RuleSpec {
        context: Some(r"\bcar\b".to_string()),
        ..spec("car_mechanic", r"\bmechanic\b", "72310", "Automotive mechanic")
    }])
    .unwrap();
    assert!(rules.evaluate("mechanic", "mechanic fix aircon").is_none());
    assert_eq!(rules.evaluate("mechanic", "mechanic fix car brakes").unwrap().code, "72310");
}

#[test]
fn blank_record_is_decided_before_rules() {
    // "^" matches even empty text
    let rules = RuleSet::from_specs(&[spec("catch_all", "^", "41101", "General office clerk")]).unwrap();
    let engine = CodingEngine::with_rules(
        common::taxonomy(),
        common::overrides(),
        rules,
        MatcherConfig::default(),
    );
    let r = engine.classify(&ClassificationQuery::new("  ", "(/)"));
    assert_eq!(r.code, "X2000");
    assert_eq!(r.strategy, Strategy::NoInput);

    let r = engine.classify(&ClassificationQuery::new("Qwxz", ""));
    assert_eq!(r.strategy, Strategy::Rule);
    assert_eq!(r.code, "41101");
}
