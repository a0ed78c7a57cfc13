//! List screens: load, filter, delete, toggle.

use std::sync::Arc;

use serde_json::json;

use herald_client::ResourceApi;
use herald_core::ordering::{sort_by_ordinal, Ordinal};
use herald_core::search::filter_records;
use herald_core::{Activatable, CoreError};

use crate::confirm::Confirm;
use crate::controller::OperationError;
use crate::notify::Notifier;
use crate::screen::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation prompt.
    Cancelled,
}

/// Holds the fetched collection for one screen.
///
/// The collection is a transient copy of server state: it is replaced
/// wholesale by [`load`](Self::load) and patched locally after each
/// successful mutation, never re-fetched.
pub struct ListController<R, A> {
    api: A,
    notifier: Arc<dyn Notifier>,
    items: Vec<R>,
    is_loading: bool,
    search_query: String,
}

impl<R: Screen, A: ResourceApi<R>> ListController<R, A> {
    pub fn new(api: A, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            items: Vec::new(),
            is_loading: false,
            search_query: String::new(),
        }
    }

    /// Fetch the full collection. On failure the list is left empty.
    pub async fn load(&mut self) -> Result<(), OperationError> {
        self.is_loading = true;
        let result = self.api.list().await;
        self.is_loading = false;

        match result {
            Ok(items) => {
                tracing::debug!(resource = R::PATH, count = items.len(), "Loaded collection");
                self.items = items;
                Ok(())
            }
            Err(e) => {
                tracing::error!(resource = R::PATH, error = %e, "Failed to load collection");
                self.items.clear();
                self.notifier.error(R::MESSAGES.load_failed);
                Err(OperationError::new(R::MESSAGES.load_failed, e))
            }
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Items matching the current search query.
    pub fn filtered(&self) -> Vec<&R> {
        filter_records(&self.items, &self.search_query)
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Insert a record, replacing the one with the same id if present.
    pub fn upsert(&mut self, record: R) {
        match self.items.iter_mut().find(|item| item.id() == record.id()) {
            Some(existing) => *existing = record,
            None => self.items.push(record),
        }
    }

    /// Confirm, delete remotely, then drop the record locally.
    pub async fn delete(
        &mut self,
        id: &str,
        confirm: &dyn Confirm,
    ) -> Result<DeleteOutcome, OperationError> {
        if !confirm.confirm(R::MESSAGES.delete_prompt) {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(e) = self.api.remove(id).await {
            tracing::error!(resource = R::PATH, id, error = %e, "Delete failed");
            self.notifier.error(R::MESSAGES.delete_failed);
            return Err(OperationError::new(R::MESSAGES.delete_failed, e));
        }

        if let Some(index) = self.items.iter().position(|item| item.id() == id) {
            self.items.remove(index);
        }
        tracing::info!(resource = R::PATH, id, "Deleted");
        self.notifier.success(R::MESSAGES.deleted);
        Ok(DeleteOutcome::Deleted)
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<R> {
        &mut self.items
    }
}

impl<R: Screen + Activatable, A: ResourceApi<R>> ListController<R, A> {
    /// Flip the `isActive` flag remotely, then locally.
    pub async fn toggle_active(&mut self, id: &str, active: bool) -> Result<(), OperationError> {
        if self.find(id).is_none() {
            let err = CoreError::NotFound {
                entity: R::NOUN,
                id: id.to_string(),
            };
            self.notifier.error(R::MESSAGES.status_failed);
            return Err(OperationError::new(R::MESSAGES.status_failed, err));
        }

        if let Err(e) = self
            .api
            .update_fields(id, json!({ "isActive": active }))
            .await
        {
            tracing::error!(resource = R::PATH, id, error = %e, "Status update failed");
            self.notifier.error(R::MESSAGES.status_failed);
            return Err(OperationError::new(R::MESSAGES.status_failed, e));
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
            item.set_active(active);
        }
        Ok(())
    }
}

impl<R: Screen + Ordinal, A: ResourceApi<R>> ListController<R, A> {
    /// Put the items in display order.
    pub fn sort_by_ordinal(&mut self) {
        sort_by_ordinal(&mut self.items);
    }
}
