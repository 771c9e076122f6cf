//! Product categories, badge colors, and the default catalog.
//!
//! A product is a named category with a foreground/background color token
//! pair used to badge issues. When the entity service has no persisted
//! products, the built-in [`default_products`] catalog stands in.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::EntityId;

// ---------------------------------------------------------------------------
// List defaults
// ---------------------------------------------------------------------------

/// Sort key for product listings: alphabetical by name.
pub const LIST_SORT: &str = "name";

// ---------------------------------------------------------------------------
// Product record
// ---------------------------------------------------------------------------

/// A named product category with its badge color pair.
///
/// `name` is the key issues reference; uniqueness is the service's concern,
/// not enforced here. Built-in fallback entries carry no `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub color: String,
    #[serde(rename = "bgColor")]
    pub bg_color: String,
}

impl Product {
    fn builtin(name: &str, color: &str, bg_color: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            color: color.to_string(),
            bg_color: bg_color.to_string(),
        }
    }
}

/// The static fallback catalog used when no products are persisted.
///
/// Eight entries; the last is the Other/slate pairing that also serves as
/// the unknown-product fallback badge.
pub fn default_products() -> Vec<Product> {
    vec![
        Product::builtin("Cloud Services", "text-blue-700", "bg-blue-100"),
        Product::builtin("Enterprise Software", "text-purple-700", "bg-purple-100"),
        Product::builtin("Mobile App", "text-green-700", "bg-green-100"),
        Product::builtin("Web Platform", "text-orange-700", "bg-orange-100"),
        Product::builtin("API Services", "text-pink-700", "bg-pink-100"),
        Product::builtin("Hardware", "text-gray-700", "bg-gray-100"),
        Product::builtin("Consulting", "text-indigo-700", "bg-indigo-100"),
        Product::builtin("Other", "text-slate-700", "bg-slate-100"),
    ]
}

/// Merge policy for the catalog: a non-empty fetched list wins, an empty
/// one falls back to [`default_products`]. Expressed once here so callers
/// never hand-roll the fallback.
pub fn effective_catalog(fetched: Vec<Product>) -> Vec<Product> {
    if fetched.is_empty() {
        default_products()
    } else {
        fetched
    }
}

// ---------------------------------------------------------------------------
// Badge color resolution
// ---------------------------------------------------------------------------

/// The foreground/background token pair used to badge a product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeColor<'a> {
    pub color: &'a str,
    pub bg_color: &'a str,
}

/// Fallback badge for product names absent from the catalog (Other/slate).
pub const UNKNOWN_PRODUCT_BADGE: BadgeColor<'static> = BadgeColor {
    color: "text-slate-700",
    bg_color: "bg-slate-100",
};

/// Resolve the badge colors for `product_name` against a catalog.
///
/// Returns the pair of the first product whose name matches exactly; an
/// unknown name resolves to [`UNKNOWN_PRODUCT_BADGE`]. Total; never fails.
pub fn resolve_color<'a>(product_name: &str, products: &'a [Product]) -> BadgeColor<'a> {
    products
        .iter()
        .find(|p| p.name == product_name)
        .map(|p| BadgeColor {
            color: &p.color,
            bg_color: &p.bg_color,
        })
        .unwrap_or(UNKNOWN_PRODUCT_BADGE)
}

// ---------------------------------------------------------------------------
// Color options
// ---------------------------------------------------------------------------

/// A selectable badge color offered by the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOption {
    pub name: &'static str,
    pub color: &'static str,
    pub bg_color: &'static str,
}

/// The palette the product form offers. Free-form color tokens are not
/// accepted; a product's pair always comes from this list.
pub const COLOR_OPTIONS: &[ColorOption] = &[
    ColorOption { name: "Blue", color: "text-blue-700", bg_color: "bg-blue-100" },
    ColorOption { name: "Purple", color: "text-purple-700", bg_color: "bg-purple-100" },
    ColorOption { name: "Green", color: "text-green-700", bg_color: "bg-green-100" },
    ColorOption { name: "Orange", color: "text-orange-700", bg_color: "bg-orange-100" },
    ColorOption { name: "Pink", color: "text-pink-700", bg_color: "bg-pink-100" },
    ColorOption { name: "Red", color: "text-red-700", bg_color: "bg-red-100" },
    ColorOption { name: "Yellow", color: "text-yellow-700", bg_color: "bg-yellow-100" },
    ColorOption { name: "Indigo", color: "text-indigo-700", bg_color: "bg-indigo-100" },
    ColorOption { name: "Teal", color: "text-teal-700", bg_color: "bg-teal-100" },
    ColorOption { name: "Cyan", color: "text-cyan-700", bg_color: "bg-cyan-100" },
    ColorOption { name: "Gray", color: "text-gray-700", bg_color: "bg-gray-100" },
    ColorOption { name: "Slate", color: "text-slate-700", bg_color: "bg-slate-100" },
];

/// Look up a palette entry by its display name, case-insensitively.
pub fn color_option(name: &str) -> Option<&'static ColorOption> {
    COLOR_OPTIONS
        .iter()
        .find(|option| option.name.eq_ignore_ascii_case(name))
}

/// Display name of the palette entry matching a stored color pair, if any.
/// Used to round-trip a persisted product back into the form's selector.
pub fn color_option_name(color: &str, bg_color: &str) -> Option<&'static str> {
    COLOR_OPTIONS
        .iter()
        .find(|option| option.color == color && option.bg_color == bg_color)
        .map(|option| option.name)
}

// ---------------------------------------------------------------------------
// Form DTO and validation
// ---------------------------------------------------------------------------

/// DTO for creating or updating a product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDraft {
    pub name: String,
    pub color: String,
    #[serde(rename = "bgColor")]
    pub bg_color: String,
}

impl Default for ProductDraft {
    /// The blank product form: empty name, Blue color pair preselected.
    fn default() -> Self {
        Self {
            name: String::new(),
            color: COLOR_OPTIONS[0].color.to_string(),
            bg_color: COLOR_OPTIONS[0].bg_color.to_string(),
        }
    }
}

impl ProductDraft {
    /// Apply a palette choice to the draft.
    pub fn with_color_option(mut self, option: &ColorOption) -> Self {
        self.color = option.color.to_string();
        self.bg_color = option.bg_color.to_string();
        self
    }
}

/// Validate a product draft: non-empty name and a color pair drawn from
/// [`COLOR_OPTIONS`].
pub fn validate_product_draft(draft: &ProductDraft) -> Result<(), CoreError> {
    if draft.name.trim().is_empty() {
        return Err(CoreError::Validation("name is required".to_string()));
    }
    if color_option_name(&draft.color, &draft.bg_color).is_none() {
        return Err(CoreError::Validation(format!(
            "Unknown color pair '{}'/'{}'. Choose one of the palette options",
            draft.color, draft.bg_color
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- default catalog -----------------------------------------------------

    #[test]
    fn default_catalog_has_eight_entries_ending_with_other() {
        let catalog = default_products();
        assert_eq!(catalog.len(), 8);
        let last = catalog.last().unwrap();
        assert_eq!(last.name, "Other");
        assert_eq!(last.color, "text-slate-700");
        assert_eq!(last.bg_color, "bg-slate-100");
    }

    #[test]
    fn builtin_entries_have_no_id() {
        assert!(default_products().iter().all(|p| p.id.is_none()));
    }

    // -- effective_catalog ---------------------------------------------------

    #[test]
    fn empty_fetch_falls_back_to_defaults() {
        let catalog = effective_catalog(Vec::new());
        assert_eq!(catalog, default_products());
    }

    #[test]
    fn non_empty_fetch_wins_over_defaults() {
        let fetched = vec![Product {
            id: Some("prd-1".into()),
            name: "Billing".into(),
            color: "text-red-700".into(),
            bg_color: "bg-red-100".into(),
        }];
        let catalog = effective_catalog(fetched.clone());
        assert_eq!(catalog, fetched);
    }

    // -- resolve_color -------------------------------------------------------

    #[test]
    fn known_product_resolves_to_its_pair() {
        let catalog = default_products();
        let badge = resolve_color("Mobile App", &catalog);
        assert_eq!(badge.color, "text-green-700");
        assert_eq!(badge.bg_color, "bg-green-100");
    }

    #[test]
    fn unknown_product_resolves_to_other_slate() {
        let catalog = default_products();
        assert_eq!(resolve_color("Nonexistent", &catalog), UNKNOWN_PRODUCT_BADGE);
    }

    #[test]
    fn resolution_is_total_even_with_empty_catalog() {
        assert_eq!(resolve_color("Anything", &[]), UNKNOWN_PRODUCT_BADGE);
    }

    #[test]
    fn match_is_exact_not_case_insensitive() {
        let catalog = default_products();
        assert_eq!(resolve_color("mobile app", &catalog), UNKNOWN_PRODUCT_BADGE);
    }

    #[test]
    fn first_match_wins_on_duplicate_names() {
        let catalog = vec![
            Product { id: Some("a".into()), name: "Dup".into(), color: "text-red-700".into(), bg_color: "bg-red-100".into() },
            Product { id: Some("b".into()), name: "Dup".into(), color: "text-blue-700".into(), bg_color: "bg-blue-100".into() },
        ];
        assert_eq!(resolve_color("Dup", &catalog).color, "text-red-700");
    }

    #[test]
    fn fallback_literal_equals_last_default_entry() {
        // The two historic fallback policies (hardcoded literal vs last
        // static entry) must agree on the shipped catalog.
        let catalog = default_products();
        let last = catalog.last().unwrap();
        assert_eq!(UNKNOWN_PRODUCT_BADGE.color, last.color);
        assert_eq!(UNKNOWN_PRODUCT_BADGE.bg_color, last.bg_color);
    }

    // -- color options -------------------------------------------------------

    #[test]
    fn palette_has_twelve_options() {
        assert_eq!(COLOR_OPTIONS.len(), 12);
    }

    #[test]
    fn color_option_lookup_is_case_insensitive() {
        assert_eq!(color_option("teal").unwrap().name, "Teal");
        assert!(color_option("magenta").is_none());
    }

    #[test]
    fn color_option_name_round_trips() {
        for option in COLOR_OPTIONS {
            assert_eq!(
                color_option_name(option.color, option.bg_color),
                Some(option.name)
            );
        }
        assert_eq!(color_option_name("text-red-700", "bg-blue-100"), None);
    }

    // -- product draft validation --------------------------------------------

    #[test]
    fn default_draft_preselects_blue() {
        let draft = ProductDraft::default();
        assert_eq!(draft.color, "text-blue-700");
        assert_eq!(draft.bg_color, "bg-blue-100");
    }

    #[test]
    fn draft_with_name_and_palette_color_passes() {
        let draft = ProductDraft {
            name: "Cloud Services".into(),
            ..ProductDraft::default()
        };
        assert!(validate_product_draft(&draft).is_ok());
    }

    #[test]
    fn draft_without_name_rejected() {
        let draft = ProductDraft {
            name: "   ".into(),
            ..ProductDraft::default()
        };
        let err = validate_product_draft(&draft).unwrap_err();
        assert!(err.to_string().contains("name is required"));
    }

    #[test]
    fn draft_with_off_palette_color_rejected() {
        let draft = ProductDraft {
            name: "Billing".into(),
            color: "text-mauve-700".into(),
            bg_color: "bg-mauve-100".into(),
        };
        assert!(validate_product_draft(&draft).is_err());
    }

    #[test]
    fn with_color_option_applies_pair() {
        let teal = color_option("Teal").unwrap();
        let draft = ProductDraft {
            name: "Streaming".into(),
            ..ProductDraft::default()
        }
        .with_color_option(teal);
        assert_eq!(draft.color, "text-teal-700");
        assert_eq!(draft.bg_color, "bg-teal-100");
    }
}
