//! Create/edit forms.

use std::sync::Arc;

use herald_client::ResourceApi;
use herald_core::{Draft, Resource};

use crate::controller::OperationError;
use crate::notify::Notifier;
use crate::screen::Screen;

/// Owns a draft and submits it.
///
/// On success the draft is reset (releasing its attachments); on failure
/// it is left intact for resubmission.
pub struct FormController<D, A> {
    api: A,
    notifier: Arc<dyn Notifier>,
    draft: D,
    is_submitting: bool,
}

impl<D, A> FormController<D, A>
where
    D: Draft,
    D::Record: Screen,
    A: ResourceApi<D::Record>,
{
    pub fn new(api: A, notifier: Arc<dyn Notifier>, draft: D) -> Self {
        Self {
            api,
            notifier,
            draft,
            is_submitting: false,
        }
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Swap in a different draft (e.g. when the edit dialog opens on
    /// another record); the old draft and its attachments are dropped.
    pub fn replace_draft(&mut self, draft: D) {
        self.draft = draft;
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Validate and send the draft: `update` when it edits an existing
    /// record, `create` otherwise.
    ///
    /// Any success status counts as saved. The stored record is returned
    /// when the server sent it back.
    pub async fn submit(&mut self) -> Result<Option<D::Record>, OperationError> {
        let resource = <D::Record as Resource>::PATH;
        let messages = <D::Record as Screen>::MESSAGES;
        let editing = self.draft.record_id().map(str::to_string);
        let (done, failed) = match editing {
            Some(_) => (messages.updated, messages.update_failed),
            None => (messages.created, messages.create_failed),
        };

        if let Err(e) = self.draft.validate() {
            tracing::warn!(resource, error = %e, "Draft rejected");
            let message = e.to_string();
            self.notifier.error(&message);
            return Err(OperationError::new(message, e));
        }

        self.is_submitting = true;
        let payload = self.draft.to_payload();
        let result = match &editing {
            Some(id) => self.api.update(id, payload).await.map(Some),
            None => self.api.create(payload).await,
        };
        self.is_submitting = false;

        match result {
            Ok(record) => {
                tracing::info!(resource, id = ?record.as_ref().map(|r| r.id()), "Saved");
                self.draft.reset();
                self.notifier.success(done);
                Ok(record)
            }
            Err(e) => {
                tracing::error!(resource, error = %e, "Submit failed");
                self.notifier.error(failed);
                Err(OperationError::new(failed, e))
            }
        }
    }
}
