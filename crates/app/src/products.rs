//! Product catalog management.
//!
//! Same mutation contract as the issue side: validate first, gate
//! concurrent submits, invalidate the product snapshot on success, toast
//! the outcome. Reads go through [`ProductService::catalog`], which applies
//! the built-in fallback when no products are persisted.

use std::sync::Arc;

use tokio::sync::Mutex;

use supportwiki_core::{effective_catalog, validate_product_draft, CoreError, Product, ProductDraft};
use supportwiki_entities::EntityClient;

use crate::error::{AppError, AppResult};
use crate::notify::{Notification, Notifier};
use crate::store::{Collection, SnapshotStore};

// ---------------------------------------------------------------------------
// PendingProductDelete
// ---------------------------------------------------------------------------

/// A resolved product delete awaiting confirmation.
///
/// Dropping the ticket cancels the delete; only
/// [`ProductService::confirm_delete`] reaches the entity service.
#[derive(Debug)]
pub struct PendingProductDelete {
    product: Product,
}

impl PendingProductDelete {
    /// The product that would be deleted.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The confirmation question to show before deleting.
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to delete \"{}\"? This won't affect existing issues, \
             but the product won't be available for new issues.",
            self.product.name
        )
    }
}

// ---------------------------------------------------------------------------
// ProductService
// ---------------------------------------------------------------------------

/// Orchestrates product mutations over the entity client.
pub struct ProductService {
    client: Arc<dyn EntityClient>,
    store: Arc<SnapshotStore>,
    notifier: Arc<Notifier>,
    submitting: Mutex<()>,
}

impl ProductService {
    pub fn new(
        client: Arc<dyn EntityClient>,
        store: Arc<SnapshotStore>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            client,
            store,
            notifier,
            submitting: Mutex::new(()),
        }
    }

    /// The product catalog for selectors and badge coloring.
    ///
    /// Falls back to the built-in defaults when nothing is persisted.
    pub async fn catalog(&self) -> Vec<Product> {
        let snapshot = self.store.products().await;
        effective_catalog(snapshot.as_ref().clone())
    }

    /// The persisted products only, without the built-in fallback.
    ///
    /// This is what management views edit; built-in defaults cannot be
    /// updated or deleted.
    pub async fn persisted(&self) -> Arc<Vec<Product>> {
        self.store.products().await
    }

    /// Resolve one persisted product by ID from the current snapshot.
    pub async fn get(&self, id: &str) -> AppResult<Product> {
        let snapshot = self.store.products().await;
        snapshot
            .iter()
            .find(|product| product.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "product",
                    id: id.to_string(),
                })
            })
    }

    /// Create a product from a draft.
    pub async fn create(&self, draft: ProductDraft) -> AppResult<Product> {
        if let Err(error) = validate_product_draft(&draft) {
            self.notifier.publish(Notification::error(
                "Missing required fields",
                "Please fill in all required fields.",
            ));
            return Err(error.into());
        }

        let _submitting = self.submitting.try_lock().map_err(|_| AppError::Busy)?;

        match self.client.create_product(&draft).await {
            Ok(product) => {
                self.store.invalidate(Collection::Products).await;
                self.notifier.publish(Notification::info(
                    "Product added",
                    format!("{} has been added to the product list.", product.name),
                ));
                tracing::info!(product = %product.name, "Product added");
                Ok(product)
            }
            Err(error) => {
                tracing::error!(error = %error, "Failed to create product");
                self.notifier.publish(Notification::error(
                    "Save failed",
                    "There was an error saving the product.",
                ));
                Err(error.into())
            }
        }
    }

    /// Replace a product's name and colors.
    pub async fn update(&self, id: &str, draft: ProductDraft) -> AppResult<Product> {
        if let Err(error) = validate_product_draft(&draft) {
            self.notifier.publish(Notification::error(
                "Missing required fields",
                "Please fill in all required fields.",
            ));
            return Err(error.into());
        }

        let _submitting = self.submitting.try_lock().map_err(|_| AppError::Busy)?;

        match self.client.update_product(id, &draft).await {
            Ok(product) => {
                self.store.invalidate(Collection::Products).await;
                self.notifier.publish(Notification::info(
                    "Product updated",
                    format!("{} has been updated.", product.name),
                ));
                tracing::info!(product = %product.name, "Product updated");
                Ok(product)
            }
            Err(error) => {
                tracing::error!(product_id = %id, error = %error, "Failed to update product");
                self.notifier.publish(Notification::error(
                    "Save failed",
                    "There was an error saving the product.",
                ));
                Err(error.into())
            }
        }
    }

    /// Resolve a persisted product into a [`PendingProductDelete`] ticket.
    pub async fn begin_delete(&self, id: &str) -> AppResult<PendingProductDelete> {
        let product = self.get(id).await?;
        Ok(PendingProductDelete { product })
    }

    /// Carry out a confirmed product delete.
    pub async fn confirm_delete(&self, pending: PendingProductDelete) -> AppResult<()> {
        let product = pending.product;
        let id = product.id.as_deref().unwrap_or_default();
        match self.client.delete_product(id).await {
            Ok(()) => {
                self.store.invalidate(Collection::Products).await;
                self.notifier.publish(Notification::info(
                    "Product deleted",
                    format!("{} has been removed.", product.name),
                ));
                tracing::info!(product = %product.name, "Product deleted");
                Ok(())
            }
            Err(error) => {
                tracing::error!(product = %product.name, error = %error, "Failed to delete product");
                self.notifier.publish(Notification::error(
                    "Delete failed",
                    "There was an error deleting the product.",
                ));
                Err(error.into())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
