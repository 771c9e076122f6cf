//! Issue CRUD orchestration.
//!
//! [`IssueService`] sits between a frontend form and the entity client and
//! owns the observable mutation behavior:
//!
//! - drafts are validated before anything touches the network;
//! - a successful mutation invalidates the issue snapshot and publishes a
//!   success toast;
//! - a failed mutation publishes an error toast and leaves the cached
//!   snapshot untouched;
//! - while one submit is in flight, further submits are rejected as busy;
//! - deleting is a two-step flow through a [`PendingDelete`] ticket, so
//!   nothing is removed without an explicit confirmation.

use std::sync::Arc;

use tokio::sync::Mutex;

use supportwiki_core::{
    validate_draft, validate_update, CoreError, Issue, IssueDraft, IssueUpdate,
};
use supportwiki_entities::EntityClient;

use crate::error::{AppError, AppResult};
use crate::notify::{Notification, Notifier};
use crate::store::{Collection, SnapshotStore};

// ---------------------------------------------------------------------------
// PendingDelete
// ---------------------------------------------------------------------------

/// A resolved delete awaiting confirmation.
///
/// Obtained from [`IssueService::begin_delete`]. Nothing reaches the entity
/// service until the ticket is passed to [`IssueService::confirm_delete`];
/// dropping the ticket cancels the delete.
#[derive(Debug)]
pub struct PendingDelete {
    issue: Issue,
}

impl PendingDelete {
    /// The record that would be deleted.
    pub fn issue(&self) -> &Issue {
        &self.issue
    }

    /// The confirmation question to show before deleting.
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone.",
            self.issue.title
        )
    }
}

// ---------------------------------------------------------------------------
// IssueService
// ---------------------------------------------------------------------------

/// Orchestrates issue mutations over the entity client.
pub struct IssueService {
    client: Arc<dyn EntityClient>,
    store: Arc<SnapshotStore>,
    notifier: Arc<Notifier>,
    /// Submit gate: held for the duration of a create or update. A second
    /// submit while it is held is rejected with [`AppError::Busy`].
    submitting: Mutex<()>,
}

impl IssueService {
    pub fn new(
        client: Arc<dyn EntityClient>,
        store: Arc<SnapshotStore>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            client,
            store,
            notifier,
            submitting: Mutex::new(()),
        }
    }

    /// Resolve an issue by ID from the current snapshot.
    pub async fn get(&self, id: &str) -> AppResult<Issue> {
        let snapshot = self.store.issues().await;
        snapshot
            .iter()
            .find(|issue| issue.id == id)
            .cloned()
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "issue",
                    id: id.to_string(),
                })
            })
    }

    /// Create an issue from a draft.
    pub async fn create(&self, draft: IssueDraft) -> AppResult<Issue> {
        if let Err(error) = validate_draft(&draft) {
            self.notifier.publish(Notification::error(
                "Missing required fields",
                "Please fill in all required fields.",
            ));
            return Err(error.into());
        }

        let _submitting = self.submitting.try_lock().map_err(|_| AppError::Busy)?;

        match self.client.create_issue(&draft).await {
            Ok(issue) => {
                self.store.invalidate(Collection::Issues).await;
                self.notifier.publish(Notification::info(
                    "Issue created",
                    "The issue has been added to the wiki.",
                ));
                tracing::info!(issue_id = %issue.id, "Issue created");
                Ok(issue)
            }
            Err(error) => {
                tracing::error!(error = %error, "Failed to create issue");
                self.notifier.publish(Notification::error(
                    "Creation failed",
                    "There was an error creating the issue.",
                ));
                Err(error.into())
            }
        }
    }

    /// Replace an issue's editable fields.
    pub async fn update(&self, id: &str, update: IssueUpdate) -> AppResult<Issue> {
        if let Err(error) = validate_update(&update) {
            self.notifier.publish(Notification::error(
                "Missing required fields",
                "Please fill in all required fields.",
            ));
            return Err(error.into());
        }

        let _submitting = self.submitting.try_lock().map_err(|_| AppError::Busy)?;

        match self.client.update_issue(id, &update).await {
            Ok(issue) => {
                self.store.invalidate(Collection::Issues).await;
                self.notifier.publish(Notification::info(
                    "Issue updated",
                    "The issue has been updated successfully.",
                ));
                tracing::info!(issue_id = %issue.id, "Issue updated");
                Ok(issue)
            }
            Err(error) => {
                tracing::error!(issue_id = %id, error = %error, "Failed to update issue");
                self.notifier.publish(Notification::error(
                    "Update failed",
                    "There was an error updating the issue.",
                ));
                Err(error.into())
            }
        }
    }

    /// Resolve an issue into a [`PendingDelete`] ticket.
    ///
    /// Side-effect free: the entity service is only reached if the ticket
    /// is confirmed.
    pub async fn begin_delete(&self, id: &str) -> AppResult<PendingDelete> {
        let issue = self.get(id).await?;
        Ok(PendingDelete { issue })
    }

    /// Carry out a confirmed delete.
    pub async fn confirm_delete(&self, pending: PendingDelete) -> AppResult<()> {
        let issue = pending.issue;
        match self.client.delete_issue(&issue.id).await {
            Ok(()) => {
                self.store.invalidate(Collection::Issues).await;
                self.notifier.publish(Notification::info(
                    "Issue deleted",
                    "The issue has been removed from the wiki.",
                ));
                tracing::info!(issue_id = %issue.id, "Issue deleted");
                Ok(())
            }
            Err(error) => {
                tracing::error!(issue_id = %issue.id, error = %error, "Failed to delete issue");
                self.notifier.publish(Notification::error(
                    "Delete failed",
                    "There was an error deleting the issue.",
                ));
                Err(error.into())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use supportwiki_entities::{ClientError, MemoryClient};

    struct Harness {
        client: Arc<MemoryClient>,
        store: Arc<SnapshotStore>,
        notifier: Arc<Notifier>,
        service: IssueService,
    }

    fn harness() -> Harness {
        let client = Arc::new(MemoryClient::new());
        let store = Arc::new(SnapshotStore::new(client.clone(), 1000));
        let notifier = Arc::new(Notifier::default());
        let service = IssueService::new(client.clone(), store.clone(), notifier.clone());
        Harness {
            client,
            store,
            notifier,
            service,
        }
    }

    fn draft(title: &str) -> IssueDraft {
        IssueDraft {
            title: title.to_string(),
            product: "Web Platform".to_string(),
            description: "description".to_string(),
            solution: "solution".to_string(),
            ..IssueDraft::default()
        }
    }

    // -- create --------------------------------------------------------------

    #[tokio::test]
    async fn create_invalidates_snapshot_and_toasts_success() {
        let h = harness();
        let mut toasts = h.notifier.subscribe();

        assert!(h.store.issues().await.is_empty());
        h.service.create(draft("Login fails")).await.unwrap();

        let toast = toasts.recv().await.unwrap();
        assert_eq!(toast.title, "Issue created");
        assert_eq!(toast.body, "The issue has been added to the wiki.");

        // The stale empty snapshot was invalidated; the next read refetches.
        let snapshot = h.store.issues().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].title, "Login fails");
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_client() {
        let h = harness();
        let mut toasts = h.notifier.subscribe();

        let err = h.service.create(IssueDraft::default()).await.unwrap_err();
        assert!(err.is_validation());

        let toast = toasts.recv().await.unwrap();
        assert!(toast.is_error());
        assert_eq!(toast.title, "Missing required fields");
        assert_eq!(toast.body, "Please fill in all required fields.");

        assert_eq!(h.client.calls().await.mutations(), 0);
    }

    #[tokio::test]
    async fn failed_create_toasts_error_and_leaves_snapshot_alone() {
        let h = harness();
        h.service.create(draft("Existing")).await.unwrap();
        let before = h.store.issues().await;

        let mut toasts = h.notifier.subscribe();
        h.client.set_failing(true).await;

        let err = h.service.create(draft("Doomed")).await.unwrap_err();
        assert_matches!(err, AppError::Client(ClientError::Api { status: 500, .. }));

        let toast = toasts.recv().await.unwrap();
        assert!(toast.is_error());
        assert_eq!(toast.title, "Creation failed");

        // Prior data still served from cache, no refetch triggered.
        let after = h.store.issues().await;
        assert!(Arc::ptr_eq(&before, &after));
    }

    // -- update --------------------------------------------------------------

    #[tokio::test]
    async fn update_replaces_fields_and_toasts() {
        let h = harness();
        let issue = h.service.create(draft("Before")).await.unwrap();

        let mut toasts = h.notifier.subscribe();
        let mut update = IssueUpdate::from(&issue);
        update.title = "After".to_string();

        let updated = h.service.update(&issue.id, update).await.unwrap();
        assert_eq!(updated.title, "After");

        let toast = toasts.recv().await.unwrap();
        assert_eq!(toast.title, "Issue updated");
    }

    #[tokio::test]
    async fn invalid_update_never_reaches_the_client() {
        let h = harness();
        let issue = h.service.create(draft("Valid")).await.unwrap();
        let calls_before = h.client.calls().await;

        let mut update = IssueUpdate::from(&issue);
        update.solution = "   ".to_string();

        let err = h.service.update(&issue.id, update).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(h.client.calls().await.update_issue, calls_before.update_issue);
    }

    #[tokio::test]
    async fn failed_update_toasts_error() {
        let h = harness();
        let issue = h.service.create(draft("Stuck")).await.unwrap();

        let mut toasts = h.notifier.subscribe();
        h.client.set_failing(true).await;

        let update = IssueUpdate::from(&issue);
        assert!(h.service.update(&issue.id, update).await.is_err());

        let toast = toasts.recv().await.unwrap();
        assert_eq!(toast.title, "Update failed");
        assert_eq!(toast.body, "There was an error updating the issue.");
    }

    // -- delete --------------------------------------------------------------

    #[tokio::test]
    async fn begin_delete_resolves_without_side_effects() {
        let h = harness();
        let issue = h.service.create(draft("Keep me")).await.unwrap();
        let deletes_before = h.client.calls().await.delete_issue;

        let pending = h.service.begin_delete(&issue.id).await.unwrap();
        assert_eq!(pending.issue().id, issue.id);
        assert_eq!(
            pending.prompt(),
            "Are you sure you want to delete \"Keep me\"? This action cannot be undone."
        );
        assert_eq!(h.client.calls().await.delete_issue, deletes_before);
    }

    #[tokio::test]
    async fn begin_delete_on_missing_id_is_not_found() {
        let h = harness();
        let err = h.service.begin_delete("iss-404").await.unwrap_err();
        assert_matches!(
            err,
            AppError::Core(CoreError::NotFound { entity: "issue", .. })
        );
    }

    #[tokio::test]
    async fn dropping_the_ticket_cancels_the_delete() {
        let h = harness();
        let issue = h.service.create(draft("Survivor")).await.unwrap();

        let pending = h.service.begin_delete(&issue.id).await.unwrap();
        drop(pending);

        assert_eq!(h.client.calls().await.delete_issue, 0);
        assert_eq!(h.store.issues().await.len(), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_and_toasts() {
        let h = harness();
        let issue = h.service.create(draft("Doomed")).await.unwrap();

        let mut toasts = h.notifier.subscribe();
        let pending = h.service.begin_delete(&issue.id).await.unwrap();
        h.service.confirm_delete(pending).await.unwrap();

        let toast = toasts.recv().await.unwrap();
        assert_eq!(toast.title, "Issue deleted");
        assert_eq!(toast.body, "The issue has been removed from the wiki.");
        assert!(h.store.issues().await.is_empty());
    }

    #[tokio::test]
    async fn failed_delete_toasts_error_and_keeps_snapshot() {
        let h = harness();
        let issue = h.service.create(draft("Sticky")).await.unwrap();
        h.store.issues().await;

        let pending = h.service.begin_delete(&issue.id).await.unwrap();
        let mut toasts = h.notifier.subscribe();
        h.client.set_failing(true).await;

        assert!(h.service.confirm_delete(pending).await.is_err());

        let toast = toasts.recv().await.unwrap();
        assert_eq!(toast.title, "Delete failed");
        assert_eq!(h.store.issues().await.len(), 1);
    }

    // -- get -----------------------------------------------------------------

    #[tokio::test]
    async fn get_resolves_from_the_snapshot() {
        let h = harness();
        let issue = h.service.create(draft("Findable")).await.unwrap();

        let found = h.service.get(&issue.id).await.unwrap();
        assert_eq!(found.title, "Findable");

        let err = h.service.get("iss-404").await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { .. }));
    }
}
