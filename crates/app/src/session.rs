//! Session identity and logout.

use std::sync::Arc;

use supportwiki_entities::{EntityClient, User};

use crate::error::AppResult;
use crate::notify::{Notification, Notifier};

/// Read and end the current session.
pub struct Session {
    client: Arc<dyn EntityClient>,
    notifier: Arc<Notifier>,
}

impl Session {
    pub fn new(client: Arc<dyn EntityClient>, notifier: Arc<Notifier>) -> Self {
        Self { client, notifier }
    }

    /// The signed-in user, if any.
    ///
    /// A failed fetch is logged and read as signed out.
    pub async fn current_user(&self) -> Option<User> {
        match self.client.me().await {
            Ok(user) => user,
            Err(error) => {
                tracing::error!(error = %error, "Failed to fetch current user");
                None
            }
        }
    }

    /// End the current session, toasting the outcome either way.
    pub async fn logout(&self) -> AppResult<()> {
        match self.client.logout().await {
            Ok(()) => {
                self.notifier.publish(Notification::info(
                    "Logged out successfully",
                    "You have been logged out of the wiki.",
                ));
                Ok(())
            }
            Err(error) => {
                tracing::error!(error = %error, "Logout failed");
                self.notifier.publish(Notification::error(
                    "Logout failed",
                    "There was an error logging out. Please try again.",
                ));
                Err(error.into())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
