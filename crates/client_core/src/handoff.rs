use shared::protocol::DiagnosticResult;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("failed to serialize diagnostic result for handoff: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Single-slot, session-scoped carrier for the most recent diagnostic
/// result. The submission flow is the only writer and the results view the
/// only reader; the slot holds one JSON-serialized result and survives
/// until it is overwritten or the process exits. Reads do not clear it.
#[derive(Debug, Default)]
pub struct ResultHandoffStore {
    slot: Option<String>,
}

impl ResultHandoffStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores one result, unconditionally replacing any prior value.
    pub fn put(&mut self, result: &DiagnosticResult) -> Result<(), HandoffError> {
        let serialized = serde_json::to_string(result).map_err(HandoffError::Serialize)?;
        self.slot = Some(serialized);
        Ok(())
    }

    /// Returns the stored result, or `None` when nothing has been stored
    /// yet. A slot whose contents no longer deserialize also reads as
    /// `None`; the results view treats both the same and redirects to the
    /// intake view.
    pub fn get(&self) -> Option<DiagnosticResult> {
        let raw = self.slot.as_deref()?;
        match serde_json::from_str(raw) {
            Ok(result) => Some(result),
            Err(err) => {
                warn!("stored diagnostic result no longer deserializes: {err}");
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

#[cfg(test)]
#[path = "tests/handoff_tests.rs"]
mod tests;
