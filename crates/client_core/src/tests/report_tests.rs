use super::*;

use chrono::TimeZone;
use shared::domain::SessionId;

fn sample_result() -> DiagnosticResult {
    DiagnosticResult {
        session_id: SessionId("s1".into()),
        company_name: "Acme".into(),
        analysis: "Pipeline coverage is too thin for the stated target.".into(),
        primary_constraint: "Pipeline".into(),
        real_constraint: "Lead qualification".into(),
        actionable_insights: vec!["Do X".into(), "Do Y".into()],
        confidence_score: 0.82,
        pillars_fired: vec![PillarId(1), PillarId(3)],
        violations_detected: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn confidence_is_rendered_as_a_rounded_percentage() {
    assert_eq!(confidence_percent(0.82), "82%");
    assert_eq!(confidence_percent(0.825), "83%");
    assert_eq!(confidence_percent(1.0), "100%");
    assert_eq!(confidence_percent(0.0), "0%");
}

#[test]
fn pillars_are_comma_joined_in_order() {
    assert_eq!(pillar_list(&[PillarId(1), PillarId(3)]), "1, 3");
    assert_eq!(pillar_list(&[PillarId(4)]), "4");
    assert_eq!(pillar_list(&[]), "");
}

#[test]
fn completed_on_uses_the_date_portion() {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
    assert_eq!(completed_on(&created_at), "2024-01-01");
}

#[test]
fn empty_violations_suppress_the_section() {
    let rendered = render_text_report(&sample_result());
    assert!(!rendered.contains("non-negotiables"));
}

#[test]
fn violations_are_listed_when_present() {
    let mut result = sample_result();
    result.violations_detected = vec!["Discounting without approval".into()];
    let rendered = render_text_report(&result);
    assert!(rendered.contains("Operating non-negotiables violated:"));
    assert!(rendered.contains("! Discounting without approval"));
}

#[test]
fn insights_are_numbered_in_order() {
    let rendered = render_text_report(&sample_result());
    let first = rendered.find("1. Do X").unwrap();
    let second = rendered.find("2. Do Y").unwrap();
    assert!(first < second);
}

#[test]
fn report_carries_confidence_and_pillars_lines() {
    let rendered = render_text_report(&sample_result());
    assert!(rendered.contains("Analysis confidence: 82%"));
    assert!(rendered.contains("Pillars analyzed: 1, 3"));
    assert!(rendered.contains("Primary constraint detected: Pipeline"));
    assert!(rendered.contains("Root cause: Lead qualification"));
}
