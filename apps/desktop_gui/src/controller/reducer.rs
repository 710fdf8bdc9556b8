//! Intake/results flow state and its transitions, kept free of egui so the
//! submission guard, handoff write, and redirect semantics are testable in
//! isolation.

use client_core::{DiagnosticRequest, IntakeDraft, ResultHandoffStore, SUBMIT_FAILURE_MESSAGE};
use shared::protocol::DiagnosticResult;

use crate::controller::events::{UiErrorContext, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Intake,
    Results,
}

/// Everything the two views share. The handoff store lives here as an
/// owned field and is reached by reference from the submission path (its
/// only writer) and the results view (its only reader).
pub struct FlowState {
    pub view: ViewState,
    pub draft: IntakeDraft,
    pub submitting: bool,
    pub error_banner: Option<String>,
    pub status: String,
    pub store: ResultHandoffStore,
}

impl FlowState {
    pub fn new() -> Self {
        Self {
            view: ViewState::Intake,
            draft: IntakeDraft::default(),
            submitting: false,
            error_banner: None,
            status: "Starting backend worker...".to_string(),
            store: ResultHandoffStore::new(),
        }
    }

    /// Submit guard plus validation. Returns the validated request to
    /// queue, or `None` when the attempt is blocked: a submission is
    /// already in flight, or the draft failed validation and the error is
    /// now on the banner. The draft is untouched either way.
    pub fn begin_submit(&mut self) -> Option<DiagnosticRequest> {
        if self.submitting {
            return None;
        }
        self.error_banner = None;
        match self.draft.validate() {
            Ok(request) => {
                self.submitting = true;
                self.status = "Generating Diagnostic...".to_string();
                Some(request)
            }
            Err(err) => {
                self.error_banner = Some(err.to_string());
                None
            }
        }
    }

    /// Rolls back a submit whose command never made it onto the queue.
    pub fn cancel_submit(&mut self) {
        self.submitting = false;
    }

    /// Applies one backend event. A successful diagnostic is written to
    /// the handoff store before navigation; failures only set the banner,
    /// so the draft survives for a retry.
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::DiagnosticReady(result) => {
                self.submitting = false;
                match self.store.put(&result) {
                    Ok(()) => {
                        self.status = format!("Diagnostic complete for {}", result.company_name);
                        self.view = ViewState::Results;
                    }
                    Err(err) => {
                        tracing::error!("failed to hand off diagnostic result: {err}");
                        self.error_banner = Some(SUBMIT_FAILURE_MESSAGE.to_string());
                        self.status = "Ready".to_string();
                    }
                }
            }
            UiEvent::Error(err) => {
                self.submitting = false;
                self.status = format!("{} error: {}", err.category().label(), err.message());
                if matches!(
                    err.context(),
                    UiErrorContext::Submit | UiErrorContext::WorkerStartup
                ) {
                    self.error_banner = Some(err.user_message());
                }
            }
        }
    }

    /// Resolves what the results view may render. An empty (or unreadable)
    /// slot means the view was reached without a diagnostic; that is not
    /// an error, just an invalid direct navigation, so redirect to intake.
    pub fn resolve_results_view(&mut self) -> Option<DiagnosticResult> {
        match self.store.get() {
            Some(result) => Some(result),
            None => {
                self.view = ViewState::Intake;
                None
            }
        }
    }

    /// "New Diagnostic": back to a clean intake form. The stored result
    /// stays in the slot until the next successful run overwrites it.
    pub fn start_new_diagnostic(&mut self) {
        self.draft = IntakeDraft::default();
        self.error_banner = None;
        self.status = "Ready".to_string();
        self.view = ViewState::Intake;
    }
}

impl Default for FlowState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
