//! Figma node retrieval.
//!
//! One authenticated GET against `/v1/files/{file}/nodes?ids={node}`. The
//! response body is handed back re-indented and otherwise untouched: keys keep
//! the order the API sent them in and numbers keep their original text.
//!
//! There is deliberately no retry or caching layer here; every call is a fresh
//! round-trip bounded only by the client timeout.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::http::{build_client, classify_send_error};
use super::selection::SelectionReference;
use crate::error::{FigjsonError, GENERIC_FETCH_MESSAGE, Result};

/// Production API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.figma.com";

/// Header carrying the personal access token.
pub const TOKEN_HEADER: &str = "X-Figma-Token";

/// A successfully retrieved selection document.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionJson {
    /// What was requested.
    pub reference: SelectionReference,
    /// HTTP status of the response (always 2xx).
    pub status: u16,
    /// The response body, pretty-printed with two-space indentation.
    pub text: String,
}

/// Outcome of a single retrieval.
pub type RetrievalResult = Result<SelectionJson>;

/// Client for the Figma file nodes endpoint.
#[derive(Debug, Clone)]
pub struct RetrievalClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RetrievalClient {
    /// Create a client for `base_url` with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(build_client(timeout)?, base_url, timeout))
    }

    /// Create a client around an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the nodes URL for a reference.
    ///
    /// Assembled textually so an already-encoded node id (`12%3A34`) is sent
    /// as-is instead of being encoded a second time.
    #[must_use]
    pub fn nodes_url(&self, reference: &SelectionReference) -> String {
        format!(
            "{}/v1/files/{}/nodes?ids={}",
            self.base_url, reference.file_id, reference.node_id
        )
    }

    /// Fetch the JSON document for a selection.
    ///
    /// # Errors
    ///
    /// - [`FigjsonError::Timeout`] / [`FigjsonError::Network`] when the API
    ///   could not be reached.
    /// - [`FigjsonError::RemoteApplication`] for non-2xx responses, carrying
    ///   the API's `message` when it sent one.
    /// - [`FigjsonError::InvalidResponse`] when a 2xx body is not JSON.
    pub async fn fetch_selection_json(
        &self,
        token: &str,
        reference: &SelectionReference,
    ) -> RetrievalResult {
        let url = self.nodes_url(reference);
        tracing::info!(file_id = %reference.file_id, node_id = %reference.node_id, "Fetching selection JSON");

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, token)
            .send()
            .await
            .map_err(|e| {
                let err = classify_send_error(&e, self.timeout);
                tracing::warn!(error = %e, "Selection fetch failed");
                err
            })?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "Figma API returned an error");
            return Err(FigjsonError::RemoteApplication {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read response body");
            classify_send_error(&e, self.timeout)
        })?;

        let text = format_document(&body)?;
        Ok(SelectionJson {
            reference: reference.clone(),
            status: status.as_u16(),
            text,
        })
    }
}

/// Re-indent a JSON document without reordering keys.
///
/// # Errors
///
/// Returns [`FigjsonError::InvalidResponse`] if `body` is not JSON.
pub fn format_document(body: &str) -> Result<String> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FigjsonError::InvalidResponse(e.to_string()))?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Pull the top-level `message` out of an error body.
///
/// Any truthy scalar counts: a non-empty string, a non-zero number (kept as
/// sent) or `true`. Everything else, including a body that is not JSON, falls
/// back to the generic fetch message.
#[must_use]
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(message_text))
        .unwrap_or_else(|| GENERIC_FETCH_MESSAGE.to_string())
}

fn message_text(message: &Value) -> Option<String> {
    match message {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64().is_some_and(|n| n != 0.0) => {
            Some(number.to_string())
        }
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tracing_test::traced_test;

    #[test]
    fn nodes_url_keeps_encoded_node_id() {
        let client = RetrievalClient::new("https://api.figma.com/", Duration::from_secs(5)).unwrap();
        let url = client.nodes_url(&SelectionReference::new("FILEID", "12%3A34"));
        assert_eq!(url, "https://api.figma.com/v1/files/FILEID/nodes?ids=12%3A34");
    }

    #[test]
    fn format_document_preserves_key_order() {
        let text = format_document(r#"{"zeta":1,"alpha":{"b":2,"a":3}}"#).unwrap();
        assert_eq!(
            text,
            "{\n  \"zeta\": 1,\n  \"alpha\": {\n    \"b\": 2,\n    \"a\": 3\n  }\n}"
        );
    }

    #[test]
    fn format_document_keeps_number_text() {
        let text = format_document(r#"{"x":1.0,"y":0.30000000000000004}"#).unwrap();
        assert!(text.contains("\"x\": 1.0"));
        assert!(text.contains("\"y\": 0.30000000000000004"));
    }

    #[test]
    fn format_document_empty_nodes() {
        assert_eq!(format_document(r#"{"nodes": {}}"#).unwrap(), "{\n  \"nodes\": {}\n}");
    }

    #[test]
    fn format_document_rejects_html() {
        let err = format_document("<html></html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteApplication);
    }

    #[test]
    fn extract_message_from_error_body() {
        assert_eq!(extract_error_message(r#"{"message": "Invalid token"}"#), "Invalid token");
    }

    #[test]
    fn extract_message_falls_back() {
        assert_eq!(extract_error_message(""), GENERIC_FETCH_MESSAGE);
        assert_eq!(extract_error_message(r#"{"status":403,"err":"x"}"#), GENERIC_FETCH_MESSAGE);
        assert_eq!(extract_error_message(r#"{"message": ""}"#), GENERIC_FETCH_MESSAGE);
        assert_eq!(extract_error_message(r#"{"message": 0}"#), GENERIC_FETCH_MESSAGE);
        assert_eq!(extract_error_message(r#"{"message": null}"#), GENERIC_FETCH_MESSAGE);
        assert_eq!(extract_error_message(r#"{"message": false}"#), GENERIC_FETCH_MESSAGE);
        assert_eq!(extract_error_message(r#"{"message": {"a": 1}}"#), GENERIC_FETCH_MESSAGE);
    }

    #[test]
    fn extract_message_accepts_truthy_scalars() {
        assert_eq!(extract_error_message(r#"{"message": 42}"#), "42");
        assert_eq!(extract_error_message(r#"{"message": -1.5}"#), "-1.5");
        assert_eq!(extract_error_message(r#"{"message": true}"#), "true");
    }

    #[tokio::test]
    #[traced_test]
    async fn unreachable_host_is_network_error() {
        let client = RetrievalClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = client
            .fetch_selection_json("abc123", &SelectionReference::new("F", "1-2"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.notification_message(), GENERIC_FETCH_MESSAGE);
        assert!(logs_contain("Selection fetch failed"));
        assert!(!logs_contain("abc123"));
    }
}
