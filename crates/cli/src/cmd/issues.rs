//! Issue browsing and CRUD commands.

use anyhow::Result;
use console::style;
use dialoguer::Confirm;

use supportwiki_app::{AppState, BrowseView, Collection};
use supportwiki_core::{IssueDraft, IssueUpdate, Status};

use crate::render;
use crate::{AddIssueArgs, EditIssueArgs};

/// `supportwiki issues list [--product P] [--search Q] [--refresh]`
pub async fn cmd_issues_list(
    state: &AppState,
    product: Option<&str>,
    search: Option<&str>,
    refresh: bool,
) -> Result<()> {
    if refresh {
        state.store.invalidate(Collection::Issues).await;
    }

    let spinner = render::fetch_spinner("Loading issues...");
    let issues = state.store.issues().await;
    let products = state.products.catalog().await;
    spinner.finish_and_clear();

    let mut view = BrowseView::new();
    if let Some(product) = product {
        view.select_product(product);
    }
    if let Some(search) = search {
        view.set_query(search);
    }
    let visible = view.visible(&issues);

    println!("{}", style(BrowseView::headline(visible.len())).bold());
    println!("{}", style(view.scope_line()).dim());
    println!();

    if visible.is_empty() {
        println!("{}", render::empty_issues());
        return Ok(());
    }

    for issue in visible {
        println!("{}", render::issue_card(issue, &products));
        println!();
    }
    Ok(())
}

/// `supportwiki issues show <id>`
pub async fn cmd_issue_show(state: &AppState, id: &str) -> Result<()> {
    let spinner = render::fetch_spinner("Loading issue...");
    let issue = state.issues.get(id).await;
    let products = state.products.catalog().await;
    spinner.finish_and_clear();

    let issue = issue?;
    println!("{}", render::issue_detail(&issue, &products));
    Ok(())
}

/// `supportwiki issues add --title ... --product ... --description ... --solution ...`
pub async fn cmd_issue_add(state: &AppState, args: &AddIssueArgs) -> Result<()> {
    let status: Status = args.status.parse()?;
    let draft = IssueDraft {
        title: args.title.clone(),
        product: args.product.clone(),
        status,
        description: args.description.clone(),
        solution: args.solution.clone(),
        ticket_ids: args.ticket_ids.clone(),
        external_links: args.external_links.clone(),
        notes: args.notes.clone(),
        tags: args.tags.clone(),
    };

    let issue = state.issues.create(draft).await?;
    println!("Created {}", issue.id);
    Ok(())
}

/// `supportwiki issues edit <id> [--title ...] [...]`
///
/// Flags that are not passed keep the issue's current values.
pub async fn cmd_issue_edit(state: &AppState, id: &str, args: &EditIssueArgs) -> Result<()> {
    let current = state.issues.get(id).await?;
    let mut update = IssueUpdate::from(&current);

    if let Some(title) = &args.title {
        update.title = title.clone();
    }
    if let Some(product) = &args.product {
        update.product = product.clone();
    }
    if let Some(description) = &args.description {
        update.description = description.clone();
    }
    if let Some(solution) = &args.solution {
        update.solution = solution.clone();
    }
    if let Some(tags) = &args.tags {
        update.tags = Some(tags.clone());
    }
    if let Some(ticket_ids) = &args.ticket_ids {
        update.ticket_ids = Some(ticket_ids.clone());
    }
    if let Some(external_links) = &args.external_links {
        update.external_links = Some(external_links.clone());
    }
    if let Some(notes) = &args.notes {
        update.notes = Some(notes.clone());
    }

    let issue = state.issues.update(id, update).await?;
    println!("Updated {}", issue.id);
    Ok(())
}

/// `supportwiki issues rm <id> [--yes]`
///
/// Without `--yes`, asks for confirmation first; declining makes no
/// client call at all.
pub async fn cmd_issue_rm(state: &AppState, id: &str, yes: bool) -> Result<()> {
    let pending = state.issues.begin_delete(id).await?;

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

    state.issues.confirm_delete(pending).await?;
    Ok(())
}
