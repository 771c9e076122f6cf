//! Product catalog commands.

use anyhow::{anyhow, Result};
use console::style;
use dialoguer::Confirm;

use supportwiki_app::AppState;
use supportwiki_core::{color_option, ColorOption, ProductDraft, COLOR_OPTIONS};

use crate::render;

/// `supportwiki products list`
pub async fn cmd_products_list(state: &AppState) -> Result<()> {
    let spinner = render::fetch_spinner("Loading products...");
    let catalog = state.products.catalog().await;
    let persisted = state.products.persisted().await;
    spinner.finish_and_clear();

    for product in &catalog {
        println!("{}", render::product_line(product));
    }
    if persisted.is_empty() {
        println!();
        println!("{}", style(render::NO_PRODUCTS).dim());
    }
    Ok(())
}

/// `supportwiki products add --name N [--color C]`
pub async fn cmd_product_add(state: &AppState, name: &str, color: &str) -> Result<()> {
    let draft = ProductDraft {
        name: name.to_string(),
        ..ProductDraft::default()
    }
    .with_color_option(palette_option(color)?);

    let product = state.products.create(draft).await?;
    if let Some(id) = &product.id {
        println!("Created {id}");
    }
    Ok(())
}

/// `supportwiki products edit <id> [--name N] [--color C]`
///
/// Flags that are not passed keep the product's current values.
pub async fn cmd_product_edit(
    state: &AppState,
    id: &str,
    name: Option<&str>,
    color: Option<&str>,
) -> Result<()> {
    let current = state.products.get(id).await?;
    let mut draft = ProductDraft {
        name: current.name,
        color: current.color,
        bg_color: current.bg_color,
    };
    if let Some(name) = name {
        draft.name = name.to_string();
    }
    if let Some(color) = color {
        draft = draft.with_color_option(palette_option(color)?);
    }

    state.products.update(id, draft).await?;
    println!("Updated {id}");
    Ok(())
}

/// `supportwiki products rm <id> [--yes]`
///
/// Without `--yes`, asks for confirmation first; declining makes no
/// client call at all.
pub async fn cmd_product_rm(state: &AppState, id: &str, yes: bool) -> Result<()> {
    let pending = state.products.begin_delete(id).await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(pending.prompt())
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            println!("Delete cancelled");
            return Ok(());
        }
    }

    state.products.confirm_delete(pending).await?;
    Ok(())
}

/// `supportwiki products colors`
pub fn cmd_product_colors() -> Result<()> {
    for option in COLOR_OPTIONS {
        println!("{}", render::color_swatch(option));
    }
    Ok(())
}

fn palette_option(color: &str) -> Result<&'static ColorOption> {
    color_option(color).ok_or_else(|| {
        anyhow!("Unknown color '{color}'. Run `supportwiki products colors` for the palette")
    })
}
