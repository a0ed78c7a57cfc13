//! Move-up / move-down for manually ordered lists.

use std::sync::Arc;

use serde_json::json;

use herald_client::{ApiError, ReorderApi, ReorderMode, ResourceApi};
use herald_core::ordering::{apply_swap, plan_swap, Direction, Ordinal, SwapPlan};
use herald_core::Resource;

use crate::controller::{ListController, OperationError};
use crate::notify::Notifier;
use crate::screen::Screen;

pub const REORDER_FAILED: &str = "Failed to update slider order";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Both ordinals were persisted and the local list re-sorted.
    Moved(SwapPlan),
    /// The item already sits at that end of the list.
    Unchanged,
}

pub struct ReorderController {
    mode: ReorderMode,
    notifier: Arc<dyn Notifier>,
}

impl ReorderController {
    pub fn new(mode: ReorderMode, notifier: Arc<dyn Notifier>) -> Self {
        Self { mode, notifier }
    }

    pub fn mode(&self) -> ReorderMode {
        self.mode
    }

    /// Swap `id` with its neighbour in display order.
    ///
    /// Local ordinals change only once the server accepted both writes,
    /// so a failure leaves the list exactly as displayed before.
    pub async fn move_item<R, A>(
        &self,
        list: &mut ListController<R, A>,
        id: &str,
        direction: Direction,
    ) -> Result<ReorderOutcome, OperationError>
    where
        R: Screen + Ordinal,
        A: ResourceApi<R> + ReorderApi,
    {
        let plan = match plan_swap(list.items(), id, direction) {
            Ok(Some(plan)) => plan,
            Ok(None) => return Ok(ReorderOutcome::Unchanged),
            Err(e) => {
                self.notifier.error(REORDER_FAILED);
                return Err(OperationError::new(REORDER_FAILED, e));
            }
        };

        let persisted = match self.mode {
            ReorderMode::Sequential => persist_sequential::<R, A>(list.api(), &plan).await,
            ReorderMode::Batch => list.api().reorder(&plan.assignments()).await,
        };

        if let Err(e) = persisted {
            tracing::error!(
                resource = R::PATH,
                id,
                mode = %self.mode,
                error = %e,
                "Reorder failed"
            );
            self.notifier.error(REORDER_FAILED);
            return Err(OperationError::new(REORDER_FAILED, e));
        }

        apply_swap(list.items_mut(), &plan);
        tracing::info!(
            resource = R::PATH,
            id,
            order = plan.target.order,
            neighbour = %plan.neighbour.id,
            "Reordered"
        );
        Ok(ReorderOutcome::Moved(plan))
    }
}

/// Two single-field writes. If the second one fails the first is rolled
/// back so the server is not left with a duplicated ordinal.
async fn persist_sequential<R, A>(api: &A, plan: &SwapPlan) -> Result<(), ApiError>
where
    R: Resource,
    A: ResourceApi<R>,
{
    let target = &plan.target;
    api.update_fields(&target.id, json!({ "order": target.order }))
        .await?;

    let neighbour = &plan.neighbour;
    if let Err(e) = api
        .update_fields(&neighbour.id, json!({ "order": neighbour.order }))
        .await
    {
        let revert = plan.revert_target();
        if let Err(revert_err) = api
            .update_fields(&revert.id, json!({ "order": revert.order }))
            .await
        {
            tracing::error!(
                id = %revert.id,
                order = revert.order,
                error = %revert_err,
                "Could not roll back ordinal; server order may contain a duplicate"
            );
        }
        return Err(e);
    }
    Ok(())
}
