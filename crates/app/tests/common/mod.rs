//! Shared helpers for the application flow tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use supportwiki_app::AppState;
use supportwiki_core::{Issue, IssueDraft, IssueUpdate, Product, ProductDraft};
use supportwiki_entities::{ClientError, EntityClient, MemoryClient, User};

/// An [`AppState`] wired over a fresh in-memory client, returned alongside
/// the client so tests can inspect call counters and inject failures.
pub fn state_with_memory() -> (Arc<MemoryClient>, AppState) {
    let client = Arc::new(MemoryClient::new());
    let state = AppState::new(client.clone(), 1000);
    (client, state)
}

pub fn issue_draft(title: &str, product: &str) -> IssueDraft {
    IssueDraft {
        title: title.to_string(),
        product: product.to_string(),
        description: format!("{title} description"),
        solution: format!("{title} solution"),
        ..IssueDraft::default()
    }
}

/// An entity client whose `create_issue` parks until released, letting
/// tests hold the submit gate open at a known point.
///
/// `started` fires once the create call is inside the client;
/// `release` lets it proceed. Every other method goes straight through.
pub struct StallingClient {
    inner: MemoryClient,
    pub started: Notify,
    pub release: Notify,
}

impl StallingClient {
    pub fn new() -> Self {
        Self {
            inner: MemoryClient::new(),
            started: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl EntityClient for StallingClient {
    async fn list_issues(&self, sort: &str, limit: i64) -> Result<Vec<Issue>, ClientError> {
        self.inner.list_issues(sort, limit).await
    }

    async fn create_issue(&self, draft: &IssueDraft) -> Result<Issue, ClientError> {
        self.started.notify_one();
        self.release.notified().await;
        self.inner.create_issue(draft).await
    }

    async fn update_issue(&self, id: &str, update: &IssueUpdate) -> Result<Issue, ClientError> {
        self.inner.update_issue(id, update).await
    }

    async fn delete_issue(&self, id: &str) -> Result<(), ClientError> {
        self.inner.delete_issue(id).await
    }

    async fn list_products(&self, sort: &str, limit: i64) -> Result<Vec<Product>, ClientError> {
        self.inner.list_products(sort, limit).await
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ClientError> {
        self.inner.create_product(draft).await
    }

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> Result<Product, ClientError> {
        self.inner.update_product(id, draft).await
    }

    async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
        self.inner.delete_product(id).await
    }

    async fn me(&self) -> Result<Option<User>, ClientError> {
        self.inner.me().await
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.inner.logout().await
    }
}
