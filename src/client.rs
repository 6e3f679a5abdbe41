//! HTTP client for submitting login forms


use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Login submission capability, abstracted for testing
///
/// Implementations must return `Ok` for any HTTP response, including 4xx and
/// 5xx, and only return `Err` when the exchange itself failed.
#[async_trait]
pub trait LoginClient: Send + Sync {
    /// POST a form with exactly `username` and `password` fields to `url`
    async fn submit_login(&self, url: &str, username: &str, password: &str) -> Result<LoginResponse>;
}

#[async_trait]
impl<T: LoginClient + ?Sized> LoginClient for std::sync::Arc<T> {
    async fn submit_login(&self, url: &str, username: &str, password: &str) -> Result<LoginResponse> {
        (**self).submit_login(url, username, password).await
    }
}

/// What came back from a login submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status_code: u16,
    pub body_size: usize,
}

impl LoginResponse {
    pub fn new(status_code: u16, body_size: usize) -> Self {
        Self { status_code, body_size }
    }
}

/// reqwest-backed login client, one connection pool reused for every probe
pub struct HttpLoginClient {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpLoginClient {
    /// Create a client without a request timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Create a client with an optional per-request timeout
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Configured per-request timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl LoginClient for HttpLoginClient {
    async fn submit_login(&self, url: &str, username: &str, password: &str) -> Result<LoginResponse> {
        let url = Url::parse(url)
            .map_err(|e| AppError::parse(format!("Invalid URL: {}", e)))?;

        let response = self.client
            .post(url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let status_code = response.status().as_u16();

        // The exchange is only complete once the body has been read
        let body = response.bytes().await?;

        Ok(LoginResponse::new(status_code, body.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpLoginClient::new().unwrap();
        assert_eq!(client.timeout(), None);

        let client = HttpLoginClient::with_timeout(Some(Duration::from_secs(5))).unwrap();
        assert_eq!(client.timeout(), Some(Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn test_invalid_url_is_parse_error() {
        let client = HttpLoginClient::new().unwrap();
        let result = client.submit_login("not-a-valid-url", "alice", "password").await;
        assert!(matches!(result.unwrap_err(), AppError::Parse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind and drop to get a local port with nothing listening
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = HttpLoginClient::with_timeout(Some(Duration::from_secs(5))).unwrap();
        let url = format!("http://127.0.0.1:{}/login", port);
        let error = client.submit_login(&url, "alice", "password").await.unwrap_err();
        assert!(error.is_transport(), "unexpected error: {:?}", error);
    }
}
