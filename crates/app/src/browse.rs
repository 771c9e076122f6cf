//! Read-side state for the issue browser.
//!
//! Holds the product selection and live search query, and derives the
//! visible slice of an issue snapshot through the core filter. The header
//! lines mirror what the browsing page shows above the list.

use supportwiki_core::{filter_issues, Issue, PRODUCT_ALL};

/// The browsing state: which product is selected and what is being
/// searched for.
#[derive(Debug, Clone)]
pub struct BrowseView {
    selected_product: String,
    query: String,
}

impl Default for BrowseView {
    /// The initial page state: all products, no query.
    fn default() -> Self {
        Self {
            selected_product: PRODUCT_ALL.to_string(),
            query: String::new(),
        }
    }
}

impl BrowseView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_product(&self) -> &str {
        &self.selected_product
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Restrict the view to one product.
    pub fn select_product(&mut self, product: impl Into<String>) {
        self.selected_product = product.into();
    }

    /// Clear the product restriction.
    pub fn select_all_products(&mut self) {
        self.selected_product = PRODUCT_ALL.to_string();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The issues visible under the current selection and query.
    pub fn visible<'a>(&self, issues: &'a [Issue]) -> Vec<&'a Issue> {
        filter_issues(issues, &self.selected_product, &self.query)
    }

    /// The "N Issues" headline for a visible count.
    pub fn headline(count: usize) -> String {
        if count == 1 {
            "1 Issue".to_string()
        } else {
            format!("{count} Issues")
        }
    }

    /// The scope line under the headline.
    pub fn scope_line(&self) -> String {
        if self.selected_product == PRODUCT_ALL {
            "Showing all products".to_string()
        } else {
            format!("Filtered by {}", self.selected_product)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
