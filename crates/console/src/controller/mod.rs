//! Screen controllers.
//!
//! Each controller catches failures at the call site, turns them into an
//! error toast and hands back an [`OperationError`] whose message is the
//! toast text. Callers only use it to decide the exit status.

pub mod form;
pub mod list;
pub mod qr;
pub mod reorder;

pub use form::FormController;
pub use list::{DeleteOutcome, ListController};
pub use qr::{download_qr, QR_DOWNLOADED, QR_FAILED};
pub use reorder::{ReorderController, ReorderOutcome, REORDER_FAILED};

use herald_client::ApiError;
use herald_core::CoreError;

/// Why an operation failed.
#[derive(Debug, thiserror::Error)]
pub enum FailureCause {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An operation that failed and has already been reported to the user.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct OperationError {
    pub message: String,
    #[source]
    pub cause: FailureCause,
}

impl OperationError {
    pub fn new(message: impl Into<String>, cause: impl Into<FailureCause>) -> Self {
        Self {
            message: message.into(),
            cause: cause.into(),
        }
    }
}
