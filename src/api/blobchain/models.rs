use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::models::TransferRequest;

/// Request body for POST /transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    pub sender: String,
    pub recipient: String,
    pub amount: String,
}

impl From<&TransferRequest> for TransactionPayload {
    fn from(request: &TransferRequest) -> Self {
        Self {
            sender: request.sender.clone(),
            recipient: request.recipient.clone(),
            amount: request.amount.clone(),
        }
    }
}

/// Errors from the blobchain client HTTP endpoint
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    Request(String),
}
