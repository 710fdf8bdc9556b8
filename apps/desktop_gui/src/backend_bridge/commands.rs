//! Backend commands queued from UI to backend worker.

use client_core::DiagnosticRequest;

pub enum BackendCommand {
    SubmitDiagnostic { request: DiagnosticRequest },
}
