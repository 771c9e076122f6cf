//! Terminal rendering: issue cards, the detail view, badges, and toasts.
//!
//! Everything that produces output returns a `String` so the formatting
//! is testable; the command layer decides where it prints. Styling is
//! applied through `console`, which drops the escapes on non-terminal
//! output.

use std::time::Duration;

use console::{style, Style};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use supportwiki_app::{Notification, Severity};
use supportwiki_core::{resolve_color, ColorOption, Issue, Product, Status, Timestamp};

/// How many tags a card shows before collapsing to `+N more`.
const CARD_TAG_LIMIT: usize = 3;

/// Card descriptions are clipped to roughly two terminal lines.
const CARD_DESCRIPTION_LIMIT: usize = 160;

/// Empty-catalog hint for `products list`.
pub const NO_PRODUCTS: &str = "No products yet. Add your first product to get started.";

// ---------------------------------------------------------------------------
// Cards and detail view
// ---------------------------------------------------------------------------

/// One issue card: badge and date header, title, clipped description,
/// tag preview, and an external-resources marker.
pub fn issue_card(issue: &Issue, products: &[Product]) -> String {
    let mut lines = vec![
        format!(
            "{}  {}  {}",
            badge(&issue.product, products),
            style(format_date(&issue.updated_at)).dim(),
            style(format!("({})", issue.id)).dim(),
        ),
        style(&issue.title).bold().to_string(),
        clip(&issue.description, CARD_DESCRIPTION_LIMIT),
    ];

    let tags = issue.tag_list();
    if !tags.is_empty() {
        lines.push(tag_preview(&tags));
    }
    if !issue.external_link_list().is_empty() {
        lines.push(style("External resources available").cyan().to_string());
    }

    lines.join("\n")
}

/// The full detail view for `issues show`.
pub fn issue_detail(issue: &Issue, products: &[Product]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}  {}\n",
        badge(&issue.product, products),
        status_label(issue.status)
    ));
    out.push_str(&format!("{}\n\n", style(&issue.title).bold()));

    section(&mut out, "Issue Description", &issue.description);
    section(&mut out, "Solution", &issue.solution);

    let ticket_ids = issue.ticket_id_list();
    if !ticket_ids.is_empty() {
        section(&mut out, "Related Ticket IDs", &ticket_ids.join(", "));
    }
    let links = issue.external_link_list();
    if !links.is_empty() {
        section(&mut out, "External Resources", &links.join("\n"));
    }
    if let Some(notes) = issue.notes_text() {
        section(&mut out, "Additional Notes", notes);
    }
    let tags = issue.tag_list();
    if !tags.is_empty() {
        let tag_line = tags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ");
        section(&mut out, "Tags", &tag_line);
    }

    out.push_str(&format!(
        "{}\n",
        style(format!("Created by: {}", issue.created_by)).dim()
    ));
    out.push_str(&format!(
        "{}",
        style(format!(
            "Created: {}  Updated: {}",
            format_date(&issue.created_at),
            format_date(&issue.updated_at)
        ))
        .dim()
    ));
    out
}

/// Empty-listing message, shown when a filter matches nothing.
pub fn empty_issues() -> String {
    format!(
        "{}\n{}",
        style("No issues found").bold(),
        style("Try adjusting your search or filter criteria").dim()
    )
}

/// One `products list` row: badge plus ID, or a built-in marker.
pub fn product_line(product: &Product) -> String {
    let id = match &product.id {
        Some(id) => style(id.as_str()).dim().to_string(),
        None => style("(built-in)").dim().to_string(),
    };
    format!(
        "{}  {}",
        badge_style(&product.color).apply_to(format!("[{}]", product.name)),
        id
    )
}

/// One palette row for `products colors`.
pub fn color_swatch(option: &ColorOption) -> String {
    badge_style(option.color).apply_to(option.name).to_string()
}

/// Render a timestamp as `Mar 5, 2024`.
pub fn format_date(timestamp: &Timestamp) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

/// The product name in its badge color, e.g. `[Hardware]`.
pub fn badge(product_name: &str, products: &[Product]) -> String {
    let colors = resolve_color(product_name, products);
    badge_style(colors.color)
        .apply_to(format!("[{product_name}]"))
        .to_string()
}

// ---------------------------------------------------------------------------
// Toasts and spinner
// ---------------------------------------------------------------------------

/// Print one notification in toast form, to stderr.
pub fn print_toast(notification: &Notification) {
    let mark = match notification.severity {
        Severity::Info => style("✓").green().bold(),
        Severity::Error => style("✗").red().bold(),
    };
    eprintln!("{} {}", mark, style(&notification.title).bold());
    eprintln!("  {}", notification.body);
}

/// Drain and print every notification published so far.
///
/// `Lagged` only means older toasts were overwritten; keep draining.
pub fn print_pending_toasts(rx: &mut broadcast::Receiver<Notification>) {
    loop {
        match rx.try_recv() {
            Ok(notification) => print_toast(&notification),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
}

/// A transient fetch spinner; callers `finish_and_clear` when done.
///
/// Draws to stderr, so piped stdout never contains spinner frames.
pub fn fetch_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("progress bar template is a valid static string"),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn section(out: &mut String, header: &str, body: &str) {
    out.push_str(&format!("{}\n{}\n\n", style(header).bold(), body));
}

fn status_label(status: Status) -> String {
    match status {
        Status::Solved => style("Solved").green().to_string(),
        Status::Unsolved => style("Unsolved").yellow().to_string(),
    }
}

fn tag_preview(tags: &[&str]) -> String {
    let mut shown: Vec<String> = tags
        .iter()
        .take(CARD_TAG_LIMIT)
        .map(|tag| style(format!("#{tag}")).dim().to_string())
        .collect();
    if tags.len() > CARD_TAG_LIMIT {
        shown.push(
            style(format!("+{} more", tags.len() - CARD_TAG_LIMIT))
                .dim()
                .to_string(),
        );
    }
    shown.join(" ")
}

/// Clip to at most `max` characters, appending `...` when cut.
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

/// Map a `text-{hue}-700` color token onto a terminal style.
///
/// Hues without a close ANSI match use 256-color approximations;
/// unrecognized tokens render unstyled.
fn badge_style(color_token: &str) -> Style {
    let hue = color_token.split('-').nth(1).unwrap_or_default();
    match hue {
        "blue" => Style::new().blue(),
        "purple" => Style::new().magenta(),
        "green" => Style::new().green(),
        "orange" => Style::new().color256(208),
        "pink" => Style::new().color256(205),
        "red" => Style::new().red(),
        "yellow" => Style::new().yellow(),
        "indigo" => Style::new().color256(99),
        "teal" => Style::new().color256(30),
        "cyan" => Style::new().cyan(),
        "gray" => Style::new().color256(245),
        "slate" => Style::new().color256(103),
        _ => Style::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
