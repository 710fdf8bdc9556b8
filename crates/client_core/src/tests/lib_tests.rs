use super::*;

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::{TimeZone, Utc};
use shared::domain::{PillarId, SessionId};
use tokio::net::TcpListener;

use crate::draft::{IntakeDraft, IntakeField};

#[derive(Clone)]
struct MockDiagnosticService {
    status: StatusCode,
    body: String,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl MockDiagnosticService {
    fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn received_bodies(&self) -> Vec<serde_json::Value> {
        self.received.lock().unwrap().clone()
    }
}

async fn handle_diagnostic(
    State(service): State<MockDiagnosticService>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, String) {
    service.received.lock().unwrap().push(body);
    (service.status, service.body.clone())
}

async fn handle_diagnostic_slowly(
    State(service): State<MockDiagnosticService>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, String) {
    service.received.lock().unwrap().push(body);
    tokio::time::sleep(Duration::from_secs(5)).await;
    (service.status, service.body.clone())
}

async fn spawn_diagnostic_service(service: MockDiagnosticService, slow: bool) -> String {
    let handler = if slow {
        post(handle_diagnostic_slowly)
    } else {
        post(handle_diagnostic)
    };
    let app = Router::new()
        .route("/api/diagnostic", handler)
        .with_state(service);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/diagnostic")
}

fn settings_for(url: String) -> Settings {
    Settings {
        diagnostic_url: url,
        request_timeout_secs: 2,
    }
}

fn valid_draft() -> IntakeDraft {
    let mut draft = IntakeDraft::default();
    draft.set(IntakeField::CompanyName, "Acme Corp");
    draft.set(IntakeField::Industry, "B2B SaaS");
    draft.set(IntakeField::CurrentArr, "8000000");
    draft.set(IntakeField::TargetArr, "15000000");
    draft.set(IntakeField::SalesTeamSize, "12");
    draft.set(IntakeField::AverageDealSize, "45000");
    draft.set(IntakeField::SalesCycleLength, "120");
    draft.set(IntakeField::WinRate, "22");
    draft.set(IntakeField::Context, "Stuck at $8M ARR for 9 months.");
    draft
}

fn sample_result_body() -> String {
    serde_json::json!({
        "sessionId": "s1",
        "companyName": "Acme",
        "analysis": "Pipeline coverage is too thin for the stated target.",
        "primaryConstraint": "Pipeline",
        "realConstraint": "Lead qualification",
        "actionableInsights": ["Do X"],
        "confidenceScore": 0.82,
        "pillarsFired": [1, 3],
        "violationsDetected": [],
        "createdAt": "2024-01-01T00:00:00Z"
    })
    .to_string()
}

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

#[tokio::test]
async fn submission_body_carries_user_query_and_exactly_the_metric_fields() {
    let service = MockDiagnosticService::new(StatusCode::OK, sample_result_body());
    let url = spawn_diagnostic_service(service.clone(), false).await;
    let client = DiagnosticClient::new(&settings_for(url)).unwrap();

    let submission = valid_draft().validate().unwrap().into_submission();
    client.run_diagnostic(&submission).await.unwrap();

    let received = service.received_bodies();
    assert_eq!(received.len(), 1);
    let body = &received[0];
    assert_eq!(body["userQuery"], "Stuck at $8M ARR for 9 months.");

    let metrics = body["metrics"].as_object().unwrap();
    let mut keys: Vec<&str> = metrics.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "averageDealSize",
            "companyName",
            "currentARR",
            "industry",
            "salesCycleLength",
            "salesTeamSize",
            "targetARR",
            "winRate",
        ]
    );
    assert_eq!(metrics["companyName"], "Acme Corp");
    assert_eq!(metrics["currentARR"], 8_000_000.0);
    assert_eq!(metrics["salesTeamSize"], 12);
}

#[tokio::test]
async fn success_parses_the_result_shape() {
    let service = MockDiagnosticService::new(StatusCode::OK, sample_result_body());
    let url = spawn_diagnostic_service(service, false).await;
    let client = DiagnosticClient::new(&settings_for(url)).unwrap();

    let submission = valid_draft().validate().unwrap().into_submission();
    let result = client.run_diagnostic(&submission).await.unwrap();
    assert_eq!(result, sample_result());
}

#[tokio::test]
async fn non_success_status_fails_uniformly_and_retry_is_independent() {
    let service = MockDiagnosticService::new(StatusCode::INTERNAL_SERVER_ERROR, "");
    let url = spawn_diagnostic_service(service.clone(), false).await;
    let client = DiagnosticClient::new(&settings_for(url)).unwrap();

    let submission = valid_draft().validate().unwrap().into_submission();
    let first = client.run_diagnostic(&submission).await;
    assert!(matches!(first, Err(DiagnosticError::Status { .. })));

    // A retry with the same payload is a new, independent request.
    let second = client.run_diagnostic(&submission).await;
    assert!(matches!(second, Err(DiagnosticError::Status { .. })));
    assert_eq!(service.received_bodies().len(), 2);
}

#[tokio::test]
async fn structured_error_envelope_is_captured_as_detail() {
    let envelope = serde_json::json!({
        "code": "rate_limited",
        "message": "too many diagnostics"
    })
    .to_string();
    let service = MockDiagnosticService::new(StatusCode::TOO_MANY_REQUESTS, envelope);
    let url = spawn_diagnostic_service(service, false).await;
    let client = DiagnosticClient::new(&settings_for(url)).unwrap();

    let submission = valid_draft().validate().unwrap().into_submission();
    match client.run_diagnostic(&submission).await {
        Err(DiagnosticError::Status { status, detail }) => {
            assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
            assert_eq!(detail.unwrap().message, "too many diagnostics");
        }
        other => panic!("expected status failure, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_deserialization_failure() {
    let service = MockDiagnosticService::new(StatusCode::OK, "{\"unexpected\":true}");
    let url = spawn_diagnostic_service(service, false).await;
    let client = DiagnosticClient::new(&settings_for(url)).unwrap();

    let submission = valid_draft().validate().unwrap().into_submission();
    let err = client.run_diagnostic(&submission).await.unwrap_err();
    assert!(matches!(err, DiagnosticError::Deserialize(_)));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        DiagnosticClient::new(&settings_for(format!("http://{addr}/api/diagnostic"))).unwrap();
    let submission = valid_draft().validate().unwrap().into_submission();
    let err = client.run_diagnostic(&submission).await.unwrap_err();
    assert!(matches!(err, DiagnosticError::Transport(_)));
}

#[tokio::test]
async fn slow_service_times_out_as_a_transport_failure() {
    let service = MockDiagnosticService::new(StatusCode::OK, sample_result_body());
    let url = spawn_diagnostic_service(service, true).await;
    let client = DiagnosticClient::new(&Settings {
        diagnostic_url: url,
        request_timeout_secs: 1,
    })
    .unwrap();

    let submission = valid_draft().validate().unwrap().into_submission();
    match client.run_diagnostic(&submission).await {
        Err(DiagnosticError::Transport(err)) => assert!(err.is_timeout()),
        other => panic!("expected transport timeout, got {other:?}"),
    }
}

#[test]
fn absent_violations_deserialize_to_an_empty_list() {
    let body = serde_json::json!({
        "sessionId": "s1",
        "companyName": "Acme",
        "analysis": "a",
        "primaryConstraint": "b",
        "realConstraint": "c",
        "actionableInsights": ["d"],
        "confidenceScore": 0.5,
        "pillarsFired": [2],
        "createdAt": "2024-01-01T00:00:00Z"
    })
    .to_string();
    let result: DiagnosticResult = serde_json::from_str(&body).unwrap();
    assert!(result.violations_detected.is_empty());
}

#[test]
fn unparseable_created_at_fails_deserialization() {
    let body = serde_json::json!({
        "sessionId": "s1",
        "companyName": "Acme",
        "analysis": "a",
        "primaryConstraint": "b",
        "realConstraint": "c",
        "actionableInsights": ["d"],
        "confidenceScore": 0.5,
        "pillarsFired": [2],
        "violationsDetected": [],
        "createdAt": "yesterday"
    })
    .to_string();
    assert!(serde_json::from_str::<DiagnosticResult>(&body).is_err());
}
