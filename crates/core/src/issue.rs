//! Issue records, form DTOs, and field validation.
//!
//! This module lives in `core` (zero internal deps) so it can be shared by
//! the entity client, the application services, and the CLI renderer.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// List defaults
// ---------------------------------------------------------------------------

/// Sort key for issue listings: most recently updated first.
pub const LIST_SORT: &str = "-updated_at";

/// Default page size for collection listings.
pub const LIST_LIMIT: i64 = 1000;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Resolution status of an issue.
///
/// Serialized exactly as `"Unsolved"` / `"Solved"` to match the entity
/// service schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Unsolved,
    Solved,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Unsolved => f.write_str("Unsolved"),
            Status::Solved => f.write_str("Solved"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = CoreError;

    /// Case-insensitive parse, so CLI input like `--status solved` works.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unsolved" => Ok(Status::Unsolved),
            "solved" => Ok(Status::Solved),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: Unsolved, Solved"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Issue record
// ---------------------------------------------------------------------------

/// A knowledge-base entry describing a problem, its solution, and metadata.
///
/// List-valued fields (`ticket_ids`, `external_links`, `tags`) are stored by
/// the service as a single comma-delimited string; use the `*_list`
/// accessors to read them parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: EntityId,
    pub title: String,
    pub product: String,
    #[serde(default)]
    pub status: Status,
    pub description: String,
    pub solution: String,
    #[serde(default)]
    pub ticket_ids: Option<String>,
    #[serde(default)]
    pub external_links: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by: String,
}

impl Issue {
    /// Tags parsed from the delimited `tags` field.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags.as_deref().map(split_list).unwrap_or_default()
    }

    /// Related ticket IDs parsed from the delimited `ticket_ids` field.
    pub fn ticket_id_list(&self) -> Vec<&str> {
        self.ticket_ids
            .as_deref()
            .map(split_list)
            .unwrap_or_default()
    }

    /// External resource URLs parsed from the delimited `external_links` field.
    pub fn external_link_list(&self) -> Vec<&str> {
        self.external_links
            .as_deref()
            .map(split_list)
            .unwrap_or_default()
    }

    /// Free-text notes, `None` when empty or whitespace-only.
    pub fn notes_text(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Split a comma-delimited field into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Form DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a new issue.
///
/// `Default` mirrors the blank create form: empty fields and
/// [`Status::Unsolved`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueDraft {
    pub title: String,
    pub product: String,
    pub status: Status,
    pub description: String,
    pub solution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_links: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

/// DTO for editing an existing issue.
///
/// The edit form replaces every editable field wholesale; `status` is not
/// editable and therefore absent.
#[derive(Debug, Clone, Serialize)]
pub struct IssueUpdate {
    pub title: String,
    pub product: String,
    pub description: String,
    pub solution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_links: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl From<&Issue> for IssueUpdate {
    /// Seed the edit form from an existing record.
    fn from(issue: &Issue) -> Self {
        Self {
            title: issue.title.clone(),
            product: issue.product.clone(),
            description: issue.description.clone(),
            solution: issue.solution.clone(),
            ticket_ids: issue.ticket_ids.clone(),
            external_links: issue.external_links.clone(),
            notes: issue.notes.clone(),
            tags: issue.tags.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Require a mandatory field to be non-empty (whitespace-only counts as empty).
fn require(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Validate a create draft: title, product, description, and solution are
/// mandatory non-empty strings.
pub fn validate_draft(draft: &IssueDraft) -> Result<(), CoreError> {
    require("title", &draft.title)?;
    require("product", &draft.product)?;
    require("description", &draft.description)?;
    require("solution", &draft.solution)?;
    Ok(())
}

/// Validate an edit form with the same mandatory-field rules as
/// [`validate_draft`].
pub fn validate_update(update: &IssueUpdate) -> Result<(), CoreError> {
    require("title", &update.title)?;
    require("product", &update.product)?;
    require("description", &update.description)?;
    require("solution", &update.solution)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
