//! Application services for the support knowledge base.
//!
//! This crate owns everything between the pure domain model and a
//! frontend:
//!
//! - [`SnapshotStore`]: read-through collection cache with
//!   invalidate-after-mutation semantics.
//! - [`IssueService`] / [`ProductService`]: CRUD orchestration (validate,
//!   gate concurrent submits, call the entity client, invalidate, toast).
//! - [`Notifier`]: in-process broadcast bus carrying user-facing
//!   [`Notification`]s.
//! - [`Session`]: current-user lookup and logout.
//! - [`BrowseView`]: product selection and search state for the issue
//!   browser.
//! - [`AppState`]: the wired-up service graph handed to frontends.

pub mod browse;
pub mod config;
pub mod error;
pub mod issues;
pub mod notify;
pub mod products;
pub mod session;
pub mod state;
pub mod store;

pub use browse::BrowseView;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use issues::{IssueService, PendingDelete};
pub use notify::{Notification, Notifier, Severity};
pub use products::{PendingProductDelete, ProductService};
pub use session::Session;
pub use state::AppState;
pub use store::{Collection, SnapshotStore};
