//! UI/backend events and error modeling for the desktop controller.

use client_core::SUBMIT_FAILURE_MESSAGE;
use shared::protocol::DiagnosticResult;

pub enum UiEvent {
    Info(String),
    DiagnosticReady(DiagnosticResult),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Service,
    Validation,
    Unknown,
}

impl UiErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Transport => "Transport",
            Self::Service => "Service",
            Self::Validation => "Validation",
            Self::Unknown => "Unexpected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    WorkerStartup,
    Submit,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("timed out")
            || lower.contains("timeout")
            || lower.contains("connection")
            || lower.contains("network")
            || lower.contains("dns")
            || lower.contains("reach")
        {
            UiErrorCategory::Transport
        } else if lower.contains("returned")
            || lower.contains("status")
            || lower.contains("shape")
            || lower.contains("rate")
        {
            UiErrorCategory::Service
        } else if lower.contains("required") || lower.contains("must be") {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// What the banner shows. Submission failures all collapse onto the
    /// same retry copy regardless of the transport-vs-service cause; the
    /// precise reason still lands in the status line and the logs.
    pub fn user_message(&self) -> String {
        match self.context {
            UiErrorContext::Submit => SUBMIT_FAILURE_MESSAGE.to_string(),
            UiErrorContext::WorkerStartup => {
                format!("Backend worker unavailable: {}", self.message)
            }
            UiErrorContext::General => self.message.clone(),
        }
    }
}
