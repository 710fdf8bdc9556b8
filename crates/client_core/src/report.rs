use chrono::{DateTime, Utc};
use shared::{domain::PillarId, protocol::DiagnosticResult};

/// Confidence score rendered as a rounded percentage: 0.82 becomes "82%".
pub fn confidence_percent(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

/// Pillar identifiers rendered as a comma-joined list: [1, 3] becomes "1, 3".
pub fn pillar_list(pillars: &[PillarId]) -> String {
    pillars
        .iter()
        .map(PillarId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Date portion of the result timestamp, for the "completed on" line.
pub fn completed_on(created_at: &DateTime<Utc>) -> String {
    created_at.format("%Y-%m-%d").to_string()
}

/// Plain-text projection of the full report. The CLI prints this verbatim;
/// the GUI results view mirrors it section for section. The violations
/// section appears only when violations were detected.
pub fn render_text_report(result: &DiagnosticResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", result.company_name));
    out.push_str(&format!(
        "Diagnostic completed on {}\n\n",
        completed_on(&result.created_at)
    ));
    out.push_str(&format!(
        "Analysis confidence: {}\n",
        confidence_percent(result.confidence_score)
    ));
    out.push_str(&format!(
        "Pillars analyzed: {}\n\n",
        pillar_list(&result.pillars_fired)
    ));
    out.push_str(&format!(
        "Primary constraint detected: {}\n",
        result.primary_constraint
    ));
    out.push_str(&format!("Root cause: {}\n", result.real_constraint));
    if !result.violations_detected.is_empty() {
        out.push_str("\nOperating non-negotiables violated:\n");
        for violation in &result.violations_detected {
            out.push_str(&format!("  ! {violation}\n"));
        }
    }
    out.push_str("\nActionable insights:\n");
    for (index, insight) in result.actionable_insights.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", index + 1, insight));
    }
    out.push_str(&format!("\nComplete analysis:\n{}\n", result.analysis));
    out
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
