//! Backend worker: owns the tokio runtime and the diagnostic HTTP client,
//! serving commands queued by the UI thread. The UI never blocks; every
//! outcome returns as a `UiEvent`.

use std::thread;

use client_core::{DiagnosticClient, Settings};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn spawn(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::WorkerStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match DiagnosticClient::new(&settings) {
                Ok(client) => client,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::WorkerStartup,
                        format!("backend worker startup failure: {err}"),
                    )));
                    tracing::error!("failed to build diagnostic client: {err}");
                    return;
                }
            };
            tracing::info!(url = %settings.diagnostic_url, "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SubmitDiagnostic { request } => {
                        tracing::info!(
                            company = %request.company_name,
                            "backend: submit_diagnostic"
                        );
                        let submission = request.into_submission();
                        match client.run_diagnostic(&submission).await {
                            Ok(result) => {
                                let _ = ui_tx.try_send(UiEvent::DiagnosticReady(result));
                            }
                            Err(err) => {
                                tracing::error!("backend: submit_diagnostic failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Submit,
                                    err.to_string(),
                                )));
                            }
                        }
                    }
                }
            }
        });
    });
}
