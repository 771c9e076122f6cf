//! In-memory implementation of [`EntityClient`] for tests and offline use.
//!
//! Mimics the entity service's observable behavior: sequential ID
//! assignment, server-side timestamps, `created_by` taken from the current
//! session, and 404s expressed as [`ClientError::Api`] just as the remote
//! service would return them.
//!
//! Two test affordances on top:
//!
//! - per-method call counters ([`MemoryClient::calls`]), so tests can assert
//!   that an operation did or did not reach the client;
//! - failure injection ([`MemoryClient::set_failing`]), which makes every
//!   call return a 500 until cleared.

use chrono::Utc;
use tokio::sync::Mutex;

use supportwiki_core::{issue, product, Issue, IssueDraft, IssueUpdate, Product, ProductDraft};

use crate::client::{EntityClient, User};
use crate::error::ClientError;

use async_trait::async_trait;

/// Number of calls that reached the client, per trait method.
///
/// Failed calls count too; a rejected submit that never reaches the client
/// does not.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub list_issues: usize,
    pub create_issue: usize,
    pub update_issue: usize,
    pub delete_issue: usize,
    pub list_products: usize,
    pub create_product: usize,
    pub update_product: usize,
    pub delete_product: usize,
    pub me: usize,
    pub logout: usize,
}

impl CallCounts {
    /// Total calls across every method.
    pub fn total(&self) -> usize {
        self.list_issues
            + self.create_issue
            + self.update_issue
            + self.delete_issue
            + self.list_products
            + self.create_product
            + self.update_product
            + self.delete_product
            + self.me
            + self.logout
    }

    /// Calls that would have mutated service state.
    pub fn mutations(&self) -> usize {
        self.create_issue
            + self.update_issue
            + self.delete_issue
            + self.create_product
            + self.update_product
            + self.delete_product
    }
}

#[derive(Default)]
struct Inner {
    issues: Vec<Issue>,
    products: Vec<Product>,
    user: Option<User>,
    next_id: u64,
    failing: bool,
    calls: CallCounts,
}

impl Inner {
    fn fail_if_set(&self) -> Result<(), ClientError> {
        if self.failing {
            return Err(ClientError::api(500, "injected failure"));
        }
        Ok(())
    }

    fn created_by(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.email.clone())
            .unwrap_or_else(|| "anonymous".to_string())
    }
}

/// In-memory entity store behind a [`tokio::sync::Mutex`].
#[derive(Default)]
pub struct MemoryClient {
    inner: Mutex<Inner>,
}

impl MemoryClient {
    /// Create an empty store with no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the issue collection wholesale.
    pub async fn seed_issues(&self, issues: Vec<Issue>) {
        let mut inner = self.inner.lock().await;
        inner.next_id += issues.len() as u64;
        inner.issues = issues;
    }

    /// Replace the product collection wholesale.
    pub async fn seed_products(&self, products: Vec<Product>) {
        let mut inner = self.inner.lock().await;
        inner.next_id += products.len() as u64;
        inner.products = products;
    }

    /// Establish a session; subsequent creates attribute to this user.
    pub async fn sign_in(&self, user: User) {
        self.inner.lock().await.user = Some(user);
    }

    /// While set, every call returns a 500 [`ClientError::Api`].
    pub async fn set_failing(&self, failing: bool) {
        self.inner.lock().await.failing = failing;
    }

    /// Snapshot of the per-method call counters.
    pub async fn calls(&self) -> CallCounts {
        self.inner.lock().await.calls
    }
}

#[async_trait]
impl EntityClient for MemoryClient {
    async fn list_issues(&self, sort: &str, limit: i64) -> Result<Vec<Issue>, ClientError> {
        let mut inner = self.inner.lock().await;
        inner.calls.list_issues += 1;
        inner.fail_if_set()?;

        let mut issues = inner.issues.clone();
        if sort == issue::LIST_SORT {
            issues.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        }
        issues.truncate(limit.max(0) as usize);
        Ok(issues)
    }

    async fn create_issue(&self, draft: &IssueDraft) -> Result<Issue, ClientError> {
        let mut inner = self.inner.lock().await;
        inner.calls.create_issue += 1;
        inner.fail_if_set()?;

        inner.next_id += 1;
        let now = Utc::now();
        let issue = Issue {
            id: format!("iss-{}", inner.next_id),
            title: draft.title.clone(),
            product: draft.product.clone(),
            status: draft.status,
            description: draft.description.clone(),
            solution: draft.solution.clone(),
            ticket_ids: draft.ticket_ids.clone(),
            external_links: draft.external_links.clone(),
            notes: draft.notes.clone(),
            tags: draft.tags.clone(),
            created_at: now,
            updated_at: now,
            created_by: inner.created_by(),
        };
        inner.issues.push(issue.clone());
        Ok(issue)
    }

    async fn update_issue(&self, id: &str, update: &IssueUpdate) -> Result<Issue, ClientError> {
        let mut inner = self.inner.lock().await;
        inner.calls.update_issue += 1;
        inner.fail_if_set()?;

        let issue = inner
            .issues
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ClientError::api(404, format!("issue {id} not found")))?;

        issue.title = update.title.clone();
        issue.product = update.product.clone();
        issue.description = update.description.clone();
        issue.solution = update.solution.clone();
        issue.ticket_ids = update.ticket_ids.clone();
        issue.external_links = update.external_links.clone();
        issue.notes = update.notes.clone();
        issue.tags = update.tags.clone();
        issue.updated_at = Utc::now();

        Ok(issue.clone())
    }

    async fn delete_issue(&self, id: &str) -> Result<(), ClientError> {
        let mut inner = self.inner.lock().await;
        inner.calls.delete_issue += 1;
        inner.fail_if_set()?;

        let position = inner
            .issues
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| ClientError::api(404, format!("issue {id} not found")))?;
        inner.issues.remove(position);
        Ok(())
    }

    async fn list_products(&self, sort: &str, limit: i64) -> Result<Vec<Product>, ClientError> {
        let mut inner = self.inner.lock().await;
        inner.calls.list_products += 1;
        inner.fail_if_set()?;

        let mut products = inner.products.clone();
        if sort == product::LIST_SORT {
            products.sort_by(|a, b| a.name.cmp(&b.name));
        }
        products.truncate(limit.max(0) as usize);
        Ok(products)
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ClientError> {
        let mut inner = self.inner.lock().await;
        inner.calls.create_product += 1;
        inner.fail_if_set()?;

        inner.next_id += 1;
        let product = Product {
            id: Some(format!("prod-{}", inner.next_id)),
            name: draft.name.clone(),
            color: draft.color.clone(),
            bg_color: draft.bg_color.clone(),
        };
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> Result<Product, ClientError> {
        let mut inner = self.inner.lock().await;
        inner.calls.update_product += 1;
        inner.fail_if_set()?;

        let product = inner
            .products
            .iter_mut()
            .find(|p| p.id.as_deref() == Some(id))
            .ok_or_else(|| ClientError::api(404, format!("product {id} not found")))?;

        product.name = draft.name.clone();
        product.color = draft.color.clone();
        product.bg_color = draft.bg_color.clone();

        Ok(product.clone())
    }

    async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
        let mut inner = self.inner.lock().await;
        inner.calls.delete_product += 1;
        inner.fail_if_set()?;

        let position = inner
            .products
            .iter()
            .position(|p| p.id.as_deref() == Some(id))
            .ok_or_else(|| ClientError::api(404, format!("product {id} not found")))?;
        inner.products.remove(position);
        Ok(())
    }

    async fn me(&self) -> Result<Option<User>, ClientError> {
        let mut inner = self.inner.lock().await;
        inner.calls.me += 1;
        inner.fail_if_set()?;
        Ok(inner.user.clone())
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let mut inner = self.inner.lock().await;
        inner.calls.logout += 1;
        inner.fail_if_set()?;
        inner.user = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn draft(title: &str) -> IssueDraft {
        IssueDraft {
            title: title.to_string(),
            product: "Web Platform".to_string(),
            description: "description".to_string(),
            solution: "solution".to_string(),
            ..IssueDraft::default()
        }
    }

    fn tester() -> User {
        User {
            id: "usr-1".to_string(),
            full_name: "Test Agent".to_string(),
            email: "agent@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let client = MemoryClient::new();
        let issue = client.create_issue(&draft("First")).await.unwrap();

        assert_eq!(issue.id, "iss-1");
        assert_eq!(issue.created_at, issue.updated_at);
        assert_eq!(issue.created_by, "anonymous");

        let second = client.create_issue(&draft("Second")).await.unwrap();
        assert_eq!(second.id, "iss-2");
    }

    #[tokio::test]
    async fn created_by_comes_from_session() {
        let client = MemoryClient::new();
        client.sign_in(tester()).await;
        let issue = client.create_issue(&draft("Attributed")).await.unwrap();
        assert_eq!(issue.created_by, "agent@example.com");
    }

    #[tokio::test]
    async fn list_issues_sorts_most_recently_updated_first() {
        let client = MemoryClient::new();
        let first = client.create_issue(&draft("First")).await.unwrap();
        let second = client.create_issue(&draft("Second")).await.unwrap();

        // Touch the older record so it becomes the most recently updated.
        client
            .update_issue(&first.id, &IssueUpdate::from(&first))
            .await
            .unwrap();

        let listed = client.list_issues("-updated_at", 1000).await.unwrap();
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
    }

    #[tokio::test]
    async fn list_issues_respects_limit() {
        let client = MemoryClient::new();
        for n in 0..5 {
            client.create_issue(&draft(&format!("Issue {n}"))).await.unwrap();
        }
        let listed = client.list_issues("-updated_at", 3).await.unwrap();
        assert_eq!(listed.len(), 3);
    }

    #[tokio::test]
    async fn update_replaces_editable_fields() {
        let client = MemoryClient::new();
        let issue = client.create_issue(&draft("Before")).await.unwrap();

        let mut update = IssueUpdate::from(&issue);
        update.title = "After".to_string();
        update.notes = Some("now with notes".to_string());

        let updated = client.update_issue(&issue.id, &update).await.unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.notes.as_deref(), Some("now with notes"));
        assert!(updated.updated_at >= issue.updated_at);
    }

    #[tokio::test]
    async fn update_missing_issue_is_a_404() {
        let client = MemoryClient::new();
        let issue = client.create_issue(&draft("Only")).await.unwrap();
        let err = client
            .update_issue("iss-999", &IssueUpdate::from(&issue))
            .await
            .unwrap_err();
        assert_matches!(err, ClientError::Api { status: 404, .. });
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let client = MemoryClient::new();
        let issue = client.create_issue(&draft("Doomed")).await.unwrap();
        client.delete_issue(&issue.id).await.unwrap();
        assert!(client.list_issues("-updated_at", 1000).await.unwrap().is_empty());

        let err = client.delete_issue(&issue.id).await.unwrap_err();
        assert_matches!(err, ClientError::Api { status: 404, .. });
    }

    #[tokio::test]
    async fn list_products_sorts_by_name() {
        let client = MemoryClient::new();
        for name in ["Zeta", "Alpha"] {
            client
                .create_product(&ProductDraft {
                    name: name.to_string(),
                    ..ProductDraft::default()
                })
                .await
                .unwrap();
        }
        let listed = client.list_products("name", 1000).await.unwrap();
        assert_eq!(listed[0].name, "Alpha");
        assert_eq!(listed[1].name, "Zeta");
    }

    #[tokio::test]
    async fn injected_failure_surfaces_and_is_counted() {
        let client = MemoryClient::new();
        client.set_failing(true).await;

        let err = client.create_issue(&draft("Never")).await.unwrap_err();
        assert_matches!(err, ClientError::Api { status: 500, .. });
        assert_eq!(err.status(), Some(500));
        assert_eq!(client.calls().await.create_issue, 1);

        // State is untouched and the store works again once cleared.
        client.set_failing(false).await;
        assert!(client.list_issues("-updated_at", 1000).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn counters_track_each_method() {
        let client = MemoryClient::new();
        let issue = client.create_issue(&draft("Tracked")).await.unwrap();
        client.list_issues("-updated_at", 1000).await.unwrap();
        client.delete_issue(&issue.id).await.unwrap();
        client.me().await.unwrap();

        let calls = client.calls().await;
        assert_eq!(calls.create_issue, 1);
        assert_eq!(calls.list_issues, 1);
        assert_eq!(calls.delete_issue, 1);
        assert_eq!(calls.me, 1);
        assert_eq!(calls.total(), 4);
        assert_eq!(calls.mutations(), 2);
    }

    #[tokio::test]
    async fn logout_clears_the_session() {
        let client = MemoryClient::new();
        client.sign_in(tester()).await;
        assert!(client.me().await.unwrap().is_some());

        client.logout().await.unwrap();
        assert!(client.me().await.unwrap().is_none());
    }
}
