//! Shared application state wiring the client, cache, bus, and services.

use std::sync::Arc;

use supportwiki_entities::{EntityClient, RemoteClient};

use crate::config::AppConfig;
use crate::issues::IssueService;
use crate::notify::Notifier;
use crate::products::ProductService;
use crate::session::Session;
use crate::store::SnapshotStore;

/// Shared application state handed to every frontend command.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Entity service client shared by the store and services.
    pub client: Arc<dyn EntityClient>,
    /// Snapshot cache over the client.
    pub store: Arc<SnapshotStore>,
    /// Notification bus the services publish toasts on.
    pub notifier: Arc<Notifier>,
    /// Issue CRUD orchestration.
    pub issues: Arc<IssueService>,
    /// Product catalog orchestration.
    pub products: Arc<ProductService>,
    /// Session identity operations.
    pub session: Arc<Session>,
}

impl AppState {
    /// Wire the full service graph over an entity client.
    pub fn new(client: Arc<dyn EntityClient>, list_limit: i64) -> Self {
        let notifier = Arc::new(Notifier::default());
        let store = Arc::new(SnapshotStore::new(Arc::clone(&client), list_limit));
        let issues = Arc::new(IssueService::new(
            Arc::clone(&client),
            Arc::clone(&store),
            Arc::clone(&notifier),
        ));
        let products = Arc::new(ProductService::new(
            Arc::clone(&client),
            Arc::clone(&store),
            Arc::clone(&notifier),
        ));
        let session = Arc::new(Session::new(Arc::clone(&client), Arc::clone(&notifier)));

        Self {
            client,
            store,
            notifier,
            issues,
            products,
            session,
        }
    }

    /// Wire the service graph against the configured remote service.
    pub fn from_config(config: &AppConfig) -> Self {
        let client = RemoteClient::new(config.api_url.clone());
        let client = match &config.api_token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        };
        Self::new(Arc::new(client), config.list_limit)
    }
}
