//! HTTP implementation of [`EntityClient`] using [`reqwest`].
//!
//! Speaks the entity service's REST convention:
//!
//! - `GET /api/v1/{collection}?sort=..&limit=..`: list
//! - `POST /api/v1/{collection}`: create
//! - `PUT /api/v1/{collection}/{id}`: update
//! - `DELETE /api/v1/{collection}/{id}`: delete
//! - `GET /api/v1/auth/me`, `POST /api/v1/auth/logout`: session
//!
//! Every request carries a fresh `x-request-id` UUID so client and service
//! logs can be correlated.

use async_trait::async_trait;
use reqwest::Method;

use supportwiki_core::{Issue, IssueDraft, IssueUpdate, Product, ProductDraft};

use crate::client::{EntityClient, User};
use crate::error::ClientError;

/// HTTP client for a single entity service instance.
pub struct RemoteClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RemoteClient {
    /// Create a client that sends unauthenticated requests.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:3000`.
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across instances).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a bearer token to every subsequent request.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    // ---- private helpers ----

    /// Build a request for `path` (absolute, starting with `/`) with the
    /// per-request correlation ID and the bearer token when configured.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        tracing::debug!(method = %method, path, "entity service request");
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header("x-request-id", uuid::Uuid::new_v4().to_string());
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::api(status.as_u16(), body));
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    ///
    /// Reads the body as text first so a shape mismatch reports the serde
    /// error instead of a bare transport failure.
    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl EntityClient for RemoteClient {
    async fn list_issues(&self, sort: &str, limit: i64) -> Result<Vec<Issue>, ClientError> {
        let response = self
            .request(Method::GET, "/api/v1/issues")
            .query(&[("sort", sort.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;
        Self::parse_json(response).await
    }

    async fn create_issue(&self, draft: &IssueDraft) -> Result<Issue, ClientError> {
        let response = self
            .request(Method::POST, "/api/v1/issues")
            .json(draft)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    async fn update_issue(&self, id: &str, update: &IssueUpdate) -> Result<Issue, ClientError> {
        let response = self
            .request(Method::PUT, &format!("/api/v1/issues/{id}"))
            .json(update)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    async fn delete_issue(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .request(Method::DELETE, &format!("/api/v1/issues/{id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn list_products(&self, sort: &str, limit: i64) -> Result<Vec<Product>, ClientError> {
        let response = self
            .request(Method::GET, "/api/v1/products")
            .query(&[("sort", sort.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;
        Self::parse_json(response).await
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ClientError> {
        let response = self
            .request(Method::POST, "/api/v1/products")
            .json(draft)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> Result<Product, ClientError> {
        let response = self
            .request(Method::PUT, &format!("/api/v1/products/{id}"))
            .json(draft)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .request(Method::DELETE, &format!("/api/v1/products/{id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn me(&self) -> Result<Option<User>, ClientError> {
        let response = self.request(Method::GET, "/api/v1/auth/me").send().await?;
        // 401 means no session, which is a normal signed-out state.
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let user: User = Self::parse_json(response).await?;
        Ok(Some(user))
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let response = self
            .request(Method::POST, "/api/v1/auth/logout")
            .send()
            .await?;
        Self::check_status(response).await
    }
}
