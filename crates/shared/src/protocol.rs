use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{PillarId, SessionId};

/// Company sales metrics as the diagnostic service expects them on the wire.
/// The free-text problem description travels separately as `userQuery`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyMetrics {
    pub company_name: String,
    pub industry: String,
    #[serde(rename = "currentARR")]
    pub current_arr: f64,
    #[serde(rename = "targetARR")]
    pub target_arr: f64,
    pub sales_team_size: u32,
    pub average_deal_size: f64,
    pub sales_cycle_length: u32,
    pub win_rate: f64,
}

/// Body of the diagnostic POST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticSubmission {
    pub user_query: String,
    pub metrics: CompanyMetrics,
}

/// Completed analysis returned by the diagnostic service.
///
/// `violations_detected` may be absent on the wire; it deserializes to an
/// empty list in that case, and rendering suppresses the section entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticResult {
    pub session_id: SessionId,
    pub company_name: String,
    pub analysis: String,
    pub primary_constraint: String,
    pub real_constraint: String,
    pub actionable_insights: Vec<String>,
    pub confidence_score: f64,
    pub pillars_fired: Vec<PillarId>,
    #[serde(default)]
    pub violations_detected: Vec<String>,
    pub created_at: DateTime<Utc>,
}
