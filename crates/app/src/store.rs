//! Read-through snapshot cache over the entity client.
//!
//! Collections are fetched once on first read and then served from memory.
//! Mutations invalidate their collection so the next read refetches; a
//! snapshot is always replaced wholesale, never merged. This is the
//! invalidate-and-refetch model the services rely on.

use std::sync::Arc;

use tokio::sync::Mutex;

use supportwiki_core::{issue, product, Issue, Product};
use supportwiki_entities::EntityClient;

/// The entity collections the store caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Issues,
    Products,
}

/// Snapshot cache keyed by [`Collection`].
///
/// A failed fetch is logged and an empty snapshot is cached in its place:
/// readers see "no data" rather than an error, and the next
/// [`invalidate`](SnapshotStore::invalidate) retries the fetch.
pub struct SnapshotStore {
    client: Arc<dyn EntityClient>,
    list_limit: i64,
    issues: Mutex<Option<Arc<Vec<Issue>>>>,
    products: Mutex<Option<Arc<Vec<Product>>>>,
}

impl SnapshotStore {
    pub fn new(client: Arc<dyn EntityClient>, list_limit: i64) -> Self {
        Self {
            client,
            list_limit,
            issues: Mutex::new(None),
            products: Mutex::new(None),
        }
    }

    /// The issue snapshot, fetched through the client on a cache miss.
    ///
    /// Holding the slot lock across the fetch means concurrent readers wait
    /// for one fetch instead of issuing duplicates.
    pub async fn issues(&self) -> Arc<Vec<Issue>> {
        let mut slot = self.issues.lock().await;
        if let Some(snapshot) = slot.as_ref() {
            return Arc::clone(snapshot);
        }

        let snapshot = match self
            .client
            .list_issues(issue::LIST_SORT, self.list_limit)
            .await
        {
            Ok(issues) => Arc::new(issues),
            Err(error) => {
                tracing::error!(error = %error, "Failed to fetch issues");
                Arc::new(Vec::new())
            }
        };
        *slot = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// The product snapshot, fetched through the client on a cache miss.
    pub async fn products(&self) -> Arc<Vec<Product>> {
        let mut slot = self.products.lock().await;
        if let Some(snapshot) = slot.as_ref() {
            return Arc::clone(snapshot);
        }

        let snapshot = match self
            .client
            .list_products(product::LIST_SORT, self.list_limit)
            .await
        {
            Ok(products) => Arc::new(products),
            Err(error) => {
                tracing::error!(error = %error, "Failed to fetch products");
                Arc::new(Vec::new())
            }
        };
        *slot = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Drop a collection's snapshot so the next read refetches.
    ///
    /// Services call this after every successful mutation.
    pub async fn invalidate(&self, collection: Collection) {
        match collection {
            Collection::Issues => *self.issues.lock().await = None,
            Collection::Products => *self.products.lock().await = None,
        }
    }

    /// Invalidate a collection and refetch it immediately.
    pub async fn refresh(&self, collection: Collection) {
        self.invalidate(collection).await;
        match collection {
            Collection::Issues => {
                self.issues().await;
            }
            Collection::Products => {
                self.products().await;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
