// tests/batch.rs
mod common;

use occupation_coder::{ClassificationQuery, CodingEngine, MatcherConfig};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn engine_is_shareable_across_threads() {
    assert_send_sync::<CodingEngine>();
}

#[test]
fn batch_preserves_input_order() {
    let engine = common::engine();
    let queries: Vec<ClassificationQuery> = [
        ("Electrician", "wiring"),
        ("", ""),
        ("Wireman", ""),
        ("Crew", "serves espresso coffee drinks at the cafe counter"),
        ("Finance Director", "forecasting and budgeting"),
        ("Qwxz", "blorf"),
    ]
    .iter()
    .cycle()
    .take(60)
    .map(|(t, d)| ClassificationQuery::new(*t, *d))
    .collect();

    let batch = engine.classify_batch(&queries);
    assert_eq!(batch.len(), queries.len());
    for (q, r) in queries.iter().zip(&batch) {
        assert_eq!(r, &engine.classify(q), "{:?}", q.title_text);
    }
}

#[test]
fn shortlist_path_agrees_on_clear_winners() {
    // a tiny shortlist size forces the TF-IDF index on even for this catalogue
    let cfg = MatcherConfig {
        shortlist_size: 3,
        shortlist_min_df: 1,
        ..MatcherConfig::default()
    };
    let with_index = common::engine_with(cfg);
    let q = ClassificationQuery::new("Crew", "serves espresso coffee drinks at the cafe counter");
    let r = with_index.classify(&q);
    assert_eq!(r.code, "51321");
    assert!(r.top_candidates.len() <= 3);
}

#[test]
fn records_deserialize_leniently() {
    let q: ClassificationQuery = serde_json::from_str(
        r#"{"title_text": "Barista", "duties_text": 12, "income": "2,500", "group_hint_text": null}"#,
    )
    .unwrap();
    assert_eq!(q.duties_text, "");
    assert_eq!(q.income, Some(2500.0));
    assert!(q.group_hint_text.is_none());
    assert!(q.industry_context_text.is_none());
}
