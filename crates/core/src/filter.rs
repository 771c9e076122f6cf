//! In-memory issue filtering.
//!
//! Filtering is a pure function over an already-fetched snapshot: an exact
//! product test combined with a case-insensitive substring search across
//! the issue's text fields. No ranking, pagination, or stemming; it is
//! cheap enough to re-run on every keystroke.

use crate::issue::Issue;

/// Sentinel product selection meaning "no product filter".
pub const PRODUCT_ALL: &str = "all";

/// Filter a snapshot down to the issues matching a product selection and a
/// free-text query.
///
/// - `selected_product == PRODUCT_ALL` passes every issue; anything else
///   requires exact equality with the issue's product field.
/// - An empty `query` leaves the product test as the only criterion.
/// - Otherwise the query must appear (case-insensitively) in at least one
///   of: title, description, solution, product, tags, ticket IDs, notes.
///
/// Order is preserved; the input is never mutated.
pub fn filter_issues<'a>(
    issues: &'a [Issue],
    selected_product: &str,
    query: &str,
) -> Vec<&'a Issue> {
    let needle = query.to_lowercase();
    issues
        .iter()
        .filter(|issue| matches(issue, selected_product, &needle))
        .collect()
}

fn matches(issue: &Issue, selected_product: &str, needle_lower: &str) -> bool {
    let product_ok = selected_product == PRODUCT_ALL || issue.product == selected_product;
    if !product_ok {
        return false;
    }
    if needle_lower.is_empty() {
        return true;
    }

    contains_ci(&issue.title, needle_lower)
        || contains_ci(&issue.description, needle_lower)
        || contains_ci(&issue.solution, needle_lower)
        || contains_ci(&issue.product, needle_lower)
        || optional_contains(issue.tags.as_deref(), needle_lower)
        || optional_contains(issue.ticket_ids.as_deref(), needle_lower)
        || optional_contains(issue.notes.as_deref(), needle_lower)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Optional fields count as absent when empty.
fn optional_contains(field: Option<&str>, needle_lower: &str) -> bool {
    field.is_some_and(|value| !value.is_empty() && contains_ci(value, needle_lower))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
