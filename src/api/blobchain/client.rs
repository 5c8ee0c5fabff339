use std::time::Duration;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};
use super::models::{ClientError, TransactionPayload};
use crate::models::TransferRequest;
use crate::utils::clip_value;

/// Longest error body kept from a failed response
const MAX_ERROR_BODY_CHARS: usize = 300;

/// HTTP client for the blobchain client node that broadcasts transactions
pub struct BlobchainClient {
    http_client: HttpClient,
    base_url: String,
}

impl BlobchainClient {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:5000`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        // Client nodes live on the local network, never behind a proxy
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| ClientError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn map_error_status(status: reqwest::StatusCode, body_text: String) -> ClientError {
        let status_code = status.as_u16();
        // Flask error pages are full HTML documents
        let body_text = clip_value(body_text.trim(), MAX_ERROR_BODY_CHARS);
        match status_code {
            400 => ClientError::BadRequest(body_text),
            404 => ClientError::NotFound(body_text),
            500..=599 => {
                warn!("Blobchain client server error {}: {}", status_code, body_text);
                ClientError::ServerError(status_code, body_text)
            }
            _ => ClientError::HttpError(status_code, body_text),
        }
    }

    /// POST /transaction
    ///
    /// Hands the transfer to the client node, which forwards it to its peers
    /// for mining. The node replies with no body; any 2xx counts as accepted.
    ///
    /// # Returns
    /// * `Ok(u16)` - HTTP status of the accepted request
    /// * `Err(ClientError)` - Status-specific error
    pub async fn submit_transaction(&self, request: &TransferRequest) -> Result<u16, ClientError> {
        let url = format!("{}/transaction", self.base_url);
        let body = TransactionPayload::from(request);
        debug!("Submitting transaction to {}: {:?}", url, body);

        let response = self.http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Request(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(Self::map_error_status(status, body_text));
        }

        Ok(status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::blobchain::test_server::serve_once;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_submit_transaction_posts_json() {
        let (base_url, server) = serve_once("200 OK", String::new()).await;
        let client = BlobchainClient::new(format!("{}/", base_url), Duration::from_secs(5)).expect("client");

        let status = client
            .submit_transaction(&TransferRequest::new("alice", "bob", "10"))
            .await
            .expect("submit");
        assert_eq!(status, 200);

        let raw = server.await.expect("server");
        assert!(raw.starts_with("POST /transaction HTTP/1.1"));
        let body = &raw[raw.find("\r\n\r\n").expect("body") + 4..];
        let payload: TransactionPayload = serde_json::from_str(body).expect("json body");
        assert_eq!(payload, TransactionPayload {
            sender: "alice".to_string(),
            recipient: "bob".to_string(),
            amount: "10".to_string(),
        });
    }

    #[tokio::test]
    async fn test_submit_transaction_maps_server_error() {
        let (base_url, server) = serve_once("500 Internal Server Error", "view function did not return".to_string()).await;
        let client = BlobchainClient::new(base_url, Duration::from_secs(5)).expect("client");

        let err = client
            .submit_transaction(&TransferRequest::new("alice", "bob", "10"))
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::ServerError(500, "view function did not return".to_string()));
        server.await.expect("server");
    }

    #[tokio::test]
    async fn test_submit_transaction_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let client = BlobchainClient::new(format!("http://{}", addr), Duration::from_secs(2)).expect("client");
        let err = client
            .submit_transaction(&TransferRequest::new("", "", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));
    }

    #[tokio::test]
    async fn test_error_body_is_clipped() {
        let page = format!("<!doctype html><title>500</title>{}", "<p>".repeat(2000));
        let (base_url, server) = serve_once("400 Bad Request", page).await;
        let client = BlobchainClient::new(base_url, Duration::from_secs(5)).expect("client");

        let err = client
            .submit_transaction(&TransferRequest::new("alice", "bob", "10"))
            .await
            .unwrap_err();
        server.await.expect("server");

        let ClientError::BadRequest(body) = err else {
            panic!("expected BadRequest, got {:?}", err);
        };
        assert_eq!(body.chars().count(), MAX_ERROR_BODY_CHARS);
        assert!(body.starts_with("<!doctype html><title>500</title>"));
    }
}
