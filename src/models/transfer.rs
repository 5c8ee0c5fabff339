//! Send path models

use serde::{Deserialize, Serialize};

/// Field values read from the send form.
///
/// Values are kept exactly as entered. `amount` stays text; no numeric or
/// currency meaning is attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: String,
}

impl TransferRequest {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }
}
