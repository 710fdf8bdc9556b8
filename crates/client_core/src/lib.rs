use reqwest::{Client, StatusCode};
use shared::{
    error::ApiError,
    protocol::{DiagnosticResult, DiagnosticSubmission},
};
use thiserror::Error;
use tracing::{info, warn};

pub mod draft;
pub mod handoff;
pub mod report;
pub mod settings;

pub use draft::{DiagnosticRequest, IntakeDraft, IntakeField, ValidationError};
pub use handoff::{HandoffError, ResultHandoffStore};
pub use settings::{load_settings, Settings};

/// Uniform user-facing copy for any failed submission attempt. Transport
/// failures, non-success statuses, and malformed bodies all converge here;
/// the draft is preserved and the user may simply retry.
pub const SUBMIT_FAILURE_MESSAGE: &str = "Failed to generate diagnostic. Please try again.";

#[derive(Debug, Error)]
pub enum DiagnosticError {
    #[error("failed to construct HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("failed to reach diagnostic service: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("diagnostic service returned {status}")]
    Status {
        status: StatusCode,
        detail: Option<ApiError>,
    },
    #[error("diagnostic response did not match the expected result shape: {0}")]
    Deserialize(#[source] reqwest::Error),
}

/// HTTP client for the remote diagnostic service. One POST per submission;
/// there are no other endpoints.
pub struct DiagnosticClient {
    http: Client,
    diagnostic_url: String,
}

impl DiagnosticClient {
    pub fn new(settings: &Settings) -> Result<Self, DiagnosticError> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(DiagnosticError::ClientBuild)?;
        Ok(Self {
            http,
            diagnostic_url: settings.diagnostic_url.clone(),
        })
    }

    /// Runs one diagnostic round trip. Any non-success status is a uniform
    /// failure; no partial result is ever produced, and nothing is retried
    /// implicitly.
    pub async fn run_diagnostic(
        &self,
        submission: &DiagnosticSubmission,
    ) -> Result<DiagnosticResult, DiagnosticError> {
        info!(
            company = %submission.metrics.company_name,
            "submitting diagnostic request"
        );
        let response = self
            .http
            .post(&self.diagnostic_url)
            .json(submission)
            .send()
            .await
            .map_err(DiagnosticError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.json::<ApiError>().await.ok();
            warn!(%status, ?detail, "diagnostic service rejected the submission");
            return Err(DiagnosticError::Status { status, detail });
        }

        let result = response.json::<DiagnosticResult>().await.map_err(|err| {
            if err.is_decode() {
                DiagnosticError::Deserialize(err)
            } else {
                DiagnosticError::Transport(err)
            }
        })?;
        info!(
            session = %result.session_id,
            confidence = result.confidence_score,
            "diagnostic result received"
        );
        Ok(result)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
