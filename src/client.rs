//! HTTP client for the search service
//!
//! The entire wire contract is one call: `GET {endpoint}/search?q=...`
//! returning a [`SearchResponse`] JSON body. Failures are classified into
//! transport ([`SearchError::Network`]) and decode
//! ([`SearchError::Decode`]); no retries, a failed attempt is terminal
//! until the user resubmits.

use crate::error::SearchError;
use crate::models::SearchResponse;

/// Default endpoint of a locally running search service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SearchClient {
    /// Create a client against `endpoint` (scheme + host + port, no
    /// trailing slash required).
    pub fn new(endpoint: impl Into<String>) -> Self {
        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one search. The query is sent verbatim (URL-encoded by the
    /// request builder); callers are responsible for rejecting blank
    /// queries before getting here.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let url = format!("{}/search", self.endpoint);
        let response = self
            .http
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Network(format!("HTTP {status}")));
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::sync::oneshot;

    /// Bind an ephemeral port, answer exactly one request with `status`
    /// and `body`, and hand the captured request head back through the
    /// returned receiver.
    async fn serve_once(status: &str, body: &str) -> (String, oneshot::Receiver<String>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string());
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        (format!("http://{addr}"), rx)
    }

    const OK_BODY: &str = r#"{"query_detected_lang":"en","results":[]}"#;

    #[tokio::test]
    async fn search_hits_the_search_route_with_encoded_query() {
        let (endpoint, request) = serve_once("200 OK", OK_BODY).await;
        let client = SearchClient::new(endpoint);
        let response = client.search("mercado economía").await.unwrap();
        assert_eq!(response.results.len(), 0);

        let head = request.await.unwrap();
        let request_line = head.lines().next().unwrap();
        assert!(request_line.starts_with("GET /search?q="), "{request_line}");
        // Non-ASCII query text must not appear raw on the wire.
        assert!(request_line.is_ascii(), "{request_line}");
    }

    #[tokio::test]
    async fn non_success_status_is_a_network_error() {
        let (endpoint, _request) = serve_once("502 Bad Gateway", "oops").await;
        let client = SearchClient::new(endpoint);
        match client.search("economy").await {
            Err(SearchError::Network(msg)) => assert!(msg.contains("502"), "{msg}"),
            other => panic!("expected Network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let (endpoint, _request) = serve_once("200 OK", "<html>not json</html>").await;
        let client = SearchClient::new(endpoint);
        match client.search("economy").await {
            Err(SearchError::Decode(_)) => {}
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        // Bind then immediately drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SearchClient::new(format!("http://{addr}"));
        match client.search("economy").await {
            Err(SearchError::Network(_)) => {}
            other => panic!("expected Network error, got {other:?}"),
        }
    }

    #[test]
    fn trailing_slashes_are_normalized() {
        let client = SearchClient::new("http://localhost:5000///");
        assert_eq!(client.endpoint(), "http://localhost:5000");
    }
}
