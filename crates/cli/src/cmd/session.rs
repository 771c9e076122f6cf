//! Session commands.

use anyhow::Result;
use console::style;

use supportwiki_app::AppState;

/// `supportwiki whoami`
pub async fn cmd_whoami(state: &AppState) -> Result<()> {
    match state.session.current_user().await {
        Some(user) => println!("{} <{}>", user.full_name, user.email),
        None => println!("{}", style("Not signed in").dim()),
    }
    Ok(())
}

/// `supportwiki logout`
///
/// The outcome is reported through the notification stream.
pub async fn cmd_logout(state: &AppState) -> Result<()> {
    state.session.logout().await?;
    Ok(())
}
