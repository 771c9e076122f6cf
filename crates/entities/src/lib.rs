//! Generic entity CRUD client for the support knowledge base.
//!
//! Provides the [`EntityClient`] trait the application layers program
//! against, an HTTP implementation speaking the entity service's REST
//! convention, and an in-memory implementation for tests and offline
//! development.

pub mod client;
pub mod error;
pub mod memory;
pub mod remote;

pub use client::{EntityClient, User};
pub use error::ClientError;
pub use memory::{CallCounts, MemoryClient};
pub use remote::RemoteClient;
