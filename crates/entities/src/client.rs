//! The entity client seam.
//!
//! Application code talks to the entity service exclusively through
//! [`EntityClient`], an object-safe async trait. Production wires in
//! [`RemoteClient`](crate::RemoteClient); tests and offline development use
//! [`MemoryClient`](crate::MemoryClient).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use supportwiki_core::{Issue, IssueDraft, IssueUpdate, Product, ProductDraft};

use crate::error::ClientError;

/// The signed-in account as reported by the entity service.
///
/// Opaque to this application: it is displayed, never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

/// Generic CRUD access to the entity service.
///
/// Listing takes an explicit sort key and limit so callers state their
/// ordering (`-updated_at` for issues, `name` for products). Mutations
/// return the service's authoritative record; callers are expected to
/// refetch collections rather than patch local copies.
#[async_trait]
pub trait EntityClient: Send + Sync {
    async fn list_issues(&self, sort: &str, limit: i64) -> Result<Vec<Issue>, ClientError>;

    async fn create_issue(&self, draft: &IssueDraft) -> Result<Issue, ClientError>;

    async fn update_issue(&self, id: &str, update: &IssueUpdate) -> Result<Issue, ClientError>;

    async fn delete_issue(&self, id: &str) -> Result<(), ClientError>;

    async fn list_products(&self, sort: &str, limit: i64) -> Result<Vec<Product>, ClientError>;

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ClientError>;

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> Result<Product, ClientError>;

    async fn delete_product(&self, id: &str) -> Result<(), ClientError>;

    /// Current session identity, `None` when not signed in.
    async fn me(&self) -> Result<Option<User>, ClientError>;

    /// End the current session.
    async fn logout(&self) -> Result<(), ClientError>;
}
