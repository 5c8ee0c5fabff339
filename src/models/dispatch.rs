//! Dispatch result models

/// What happened to a prepared configuration record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Record was built and not handed to any runner
    Prepared,
    /// Client script exited successfully
    ScriptCompleted { exit_code: i32, stdout: Vec<String> },
    /// Blobchain client accepted the transaction
    Broadcast { status: u16 },
    /// Request reached the blobchain client's handler but no success reply
    /// came back. The stock client node broadcasts and then answers 500.
    Unconfirmed { status: u16 },
}

impl DispatchOutcome {
    /// Short human-readable summary for embeds and logs
    pub fn label(&self) -> String {
        match self {
            DispatchOutcome::Prepared => "Prepared (not dispatched)".to_string(),
            DispatchOutcome::ScriptCompleted { exit_code, .. } => {
                format!("Client script completed (exit code {})", exit_code)
            }
            DispatchOutcome::Broadcast { status } => {
                format!("Broadcast to blobchain client (HTTP {})", status)
            }
            DispatchOutcome::Unconfirmed { status } => {
                format!("Delivered to blobchain client, not confirmed (HTTP {})", status)
            }
        }
    }
}
