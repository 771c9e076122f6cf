//! Domain model for the support knowledge base.
//!
//! This crate holds the pure, transport-free pieces shared by every
//! frontend: record and draft types, field validation, the snapshot
//! filter, and the product color catalog.
//!
//! - [`Issue`] / [`Product`]: records as the entity service returns them.
//! - [`IssueDraft`], [`IssueUpdate`], [`ProductDraft`]: form payloads with
//!   their `validate_*` gates.
//! - [`filter_issues`]: pure product + free-text filter over a snapshot.
//! - [`resolve_color`]: total product-name-to-badge-color lookup.
//!
//! Nothing here performs I/O; the `supportwiki-entities` crate owns the
//! wire.

pub mod error;
pub mod filter;
pub mod issue;
pub mod product;
pub mod types;

pub use error::CoreError;
pub use filter::{filter_issues, PRODUCT_ALL};
pub use issue::{
    split_list, validate_draft, validate_update, Issue, IssueDraft, IssueUpdate, Status,
};
pub use product::{
    color_option, color_option_name, default_products, effective_catalog, resolve_color,
    validate_product_draft, BadgeColor, ColorOption, Product, ProductDraft, COLOR_OPTIONS,
    UNKNOWN_PRODUCT_BADGE,
};
pub use types::{EntityId, Timestamp};
