use super::*;

use chrono::{TimeZone, Utc};
use shared::domain::{PillarId, SessionId};

fn sample_result() -> DiagnosticResult {
    DiagnosticResult {
        session_id: SessionId("s1".into()),
        company_name: "Acme".into(),
        analysis: "Pipeline coverage is too thin for the stated target.".into(),
        primary_constraint: "Pipeline".into(),
        real_constraint: "Lead qualification".into(),
        actionable_insights: vec!["Do X".into()],
        confidence_score: 0.82,
        pillars_fired: vec![PillarId(1), PillarId(3)],
        violations_detected: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn empty_store_reads_none() {
    let store = ResultHandoffStore::new();
    assert!(store.is_empty());
    assert_eq!(store.get(), None);
}

#[test]
fn put_then_get_returns_the_exact_result() {
    let mut store = ResultHandoffStore::new();
    store.put(&sample_result()).unwrap();
    assert!(!store.is_empty());
    assert_eq!(store.get(), Some(sample_result()));
}

#[test]
fn reads_do_not_clear_the_slot() {
    let mut store = ResultHandoffStore::new();
    store.put(&sample_result()).unwrap();
    assert_eq!(store.get(), Some(sample_result()));
    assert_eq!(store.get(), Some(sample_result()));
}

#[test]
fn put_overwrites_the_previous_result() {
    let mut store = ResultHandoffStore::new();
    store.put(&sample_result()).unwrap();

    let mut next = sample_result();
    next.session_id = SessionId("s2".into());
    next.company_name = "Globex".into();
    store.put(&next).unwrap();

    assert_eq!(store.get(), Some(next));
}
