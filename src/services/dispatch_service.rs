use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use crate::api::blobchain::{BlobchainClient, ClientError};
use crate::config::DispatchMode;
use crate::models::{DispatchOutcome, InvocationConfig, TransferRequest};
use crate::services::script_service;

/// Errors while handing a configuration record to a runner
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Failed to start client script: {0}")]
    Spawn(String),
    #[error("Client script exited with code {exit_code}: {stderr}")]
    ScriptFailed { exit_code: i32, stderr: String },
    #[error("Client script timed out after {0:?}")]
    Timeout(Duration),
    #[error("Blobchain client rejected the transaction: {0}")]
    Client(#[from] ClientError),
}

/// Status the stock blobchain client answers with after broadcasting: its
/// `/transaction` view prints the confirmation and then returns no response.
const UNCONFIRMED_STATUS: u16 = 500;

/// Hand a prepared record to the configured runner.
///
/// With `DispatchMode::None` this performs no I/O and returns `Prepared`.
/// In client mode a 500 is reported as `Unconfirmed` rather than an error;
/// every other non-2xx status fails.
pub async fn dispatch(
    mode: &DispatchMode,
    timeout: Duration,
    invocation: &InvocationConfig,
    request: &TransferRequest,
) -> Result<DispatchOutcome, DispatchError> {
    match mode {
        DispatchMode::None => {
            debug!("No dispatch configured, discarding record {:?}", invocation);
            Ok(DispatchOutcome::Prepared)
        }
        DispatchMode::Script { interpreter, script } => {
            let output = script_service::run_script(interpreter, script, invocation, timeout).await?;
            Ok(DispatchOutcome::ScriptCompleted {
                exit_code: output.exit_code,
                stdout: output.stdout,
            })
        }
        DispatchMode::Client { base_url } => {
            let client = BlobchainClient::new(base_url.as_str(), timeout)?;
            match client.submit_transaction(request).await {
                Ok(status) => {
                    info!("Transaction broadcast via {} (HTTP {})", base_url, status);
                    Ok(DispatchOutcome::Broadcast { status })
                }
                Err(ClientError::ServerError(UNCONFIRMED_STATUS, body)) => {
                    warn!(
                        "Blobchain client at {} took the transaction but did not confirm: {}",
                        base_url, body
                    );
                    Ok(DispatchOutcome::Unconfirmed { status: UNCONFIRMED_STATUS })
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::blobchain::test_server::serve_once;
    use crate::services::send_service;

    async fn dispatch_to_client(status_line: &'static str) -> (Result<DispatchOutcome, DispatchError>, String) {
        let (base_url, server) = serve_once(status_line, String::new()).await;
        let request = TransferRequest::new("alice", "bob", "10");
        let invocation = send_service::prepare_invocation(&request);

        let outcome = dispatch(
            &DispatchMode::Client { base_url },
            Duration::from_secs(5),
            &invocation,
            &request,
        )
        .await;
        (outcome, server.await.expect("server"))
    }

    #[tokio::test]
    async fn test_client_mode_broadcast() {
        let (outcome, raw) = dispatch_to_client("200 OK").await;
        assert_eq!(outcome, Ok(DispatchOutcome::Broadcast { status: 200 }));
        assert!(raw.starts_with("POST /transaction "));
        assert!(raw.contains(r#""sender":"alice""#));
    }

    #[tokio::test]
    async fn test_client_mode_500_is_unconfirmed() {
        let (outcome, _) = dispatch_to_client("500 Internal Server Error").await;
        assert_eq!(outcome, Ok(DispatchOutcome::Unconfirmed { status: 500 }));
    }

    #[tokio::test]
    async fn test_client_mode_other_failures_are_errors() {
        let (outcome, _) = dispatch_to_client("503 Service Unavailable").await;
        assert_eq!(
            outcome,
            Err(DispatchError::Client(ClientError::ServerError(503, String::new())))
        );

        let (outcome, _) = dispatch_to_client("404 Not Found").await;
        assert_eq!(
            outcome,
            Err(DispatchError::Client(ClientError::NotFound(String::new())))
        );
    }

    #[tokio::test]
    async fn test_none_mode_only_prepares() {
        let request = TransferRequest::new("alice", "bob", "10");
        let invocation = send_service::prepare_invocation(&request);

        let outcome = dispatch(&DispatchMode::None, Duration::from_secs(1), &invocation, &request)
            .await
            .expect("dispatch");
        assert_eq!(outcome, DispatchOutcome::Prepared);
    }

    #[test]
    fn test_client_error_converts() {
        let err: DispatchError = ClientError::NotFound("no route".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Blobchain client rejected the transaction: Not Found: no route"
        );
    }
}
