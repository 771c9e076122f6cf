use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use supportwiki_app::{AppConfig, AppState};

mod cmd;
mod render;

#[derive(Parser)]
#[command(name = "supportwiki")]
#[command(version, about = "Tech Support Knowledge Base: find solutions to common issues quickly and efficiently")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse and edit knowledge-base issues
    Issues {
        #[command(subcommand)]
        command: IssueCommands,
    },
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Show the signed-in user
    Whoami,
    /// Sign out of the wiki
    Logout,
}

#[derive(Subcommand)]
pub enum IssueCommands {
    /// List issues as cards, newest first
    List {
        /// Only show issues for this product
        #[arg(short, long)]
        product: Option<String>,

        /// Case-insensitive text matched across title, description,
        /// solution, product, tags, ticket IDs, and notes
        #[arg(short, long)]
        search: Option<String>,

        /// Drop the cached listing and fetch a fresh one
        #[arg(long)]
        refresh: bool,
    },
    /// Show one issue in full
    Show {
        /// Issue ID (shown on each card)
        id: String,
    },
    /// Add a new issue to the wiki
    Add(AddIssueArgs),
    /// Edit an existing issue; omitted flags keep their current values
    Edit {
        id: String,

        #[command(flatten)]
        args: EditIssueArgs,
    },
    /// Delete an issue
    Rm {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct AddIssueArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub product: String,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub solution: String,

    /// Unsolved or Solved
    #[arg(long, default_value = "Unsolved")]
    pub status: String,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Comma-separated related ticket IDs
    #[arg(long)]
    pub ticket_ids: Option<String>,

    /// Comma-separated external resource URLs
    #[arg(long)]
    pub external_links: Option<String>,

    /// Additional notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct EditIssueArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub product: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub solution: Option<String>,

    /// Comma-separated tags (pass an empty string to clear)
    #[arg(long)]
    pub tags: Option<String>,

    /// Comma-separated related ticket IDs (pass an empty string to clear)
    #[arg(long)]
    pub ticket_ids: Option<String>,

    /// Comma-separated external resource URLs (pass an empty string to clear)
    #[arg(long)]
    pub external_links: Option<String>,

    /// Additional notes (pass an empty string to clear)
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List the product catalog with badge colors
    List,
    /// Add a product to the catalog
    Add {
        #[arg(long)]
        name: String,

        /// Badge color name (see `supportwiki products colors`)
        #[arg(long, default_value = "Blue")]
        color: String,
    },
    /// Rename a product or change its badge color
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        /// Badge color name (see `supportwiki products colors`)
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove a product from the catalog
    Rm {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List the available badge color names
    Colors,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // Logs go to stderr so listing output stays pipeable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "supportwiki=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::from_env();
    let state = AppState::from_config(&config);

    // Subscribe before dispatching so no toast is missed; drain and print
    // them once the command finishes, success and failure alike.
    let mut toasts = state.notifier.subscribe();
    let result = dispatch(&cli.command, &state).await;
    render::print_pending_toasts(&mut toasts);
    result
}

async fn dispatch(command: &Commands, state: &AppState) -> Result<()> {
    match command {
        Commands::Issues { command } => match command {
            IssueCommands::List {
                product,
                search,
                refresh,
            } => cmd::cmd_issues_list(state, product.as_deref(), search.as_deref(), *refresh).await,
            IssueCommands::Show { id } => cmd::cmd_issue_show(state, id).await,
            IssueCommands::Add(args) => cmd::cmd_issue_add(state, args).await,
            IssueCommands::Edit { id, args } => cmd::cmd_issue_edit(state, id, args).await,
            IssueCommands::Rm { id, yes } => cmd::cmd_issue_rm(state, id, *yes).await,
        },
        Commands::Products { command } => match command {
            ProductCommands::List => cmd::cmd_products_list(state).await,
            ProductCommands::Add { name, color } => cmd::cmd_product_add(state, name, color).await,
            ProductCommands::Edit { id, name, color } => {
                cmd::cmd_product_edit(state, id, name.as_deref(), color.as_deref()).await
            }
            ProductCommands::Rm { id, yes } => cmd::cmd_product_rm(state, id, *yes).await,
            ProductCommands::Colors => cmd::cmd_product_colors(),
        },
        Commands::Whoami => cmd::cmd_whoami(state).await,
        Commands::Logout => cmd::cmd_logout(state).await,
    }
}
