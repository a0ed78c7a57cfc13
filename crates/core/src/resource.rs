//! Traits shared by every manageable record type.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CoreError;
use crate::payload::Payload;

/// A record type served by the REST API under its own collection path.
pub trait Resource: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Collection path relative to the API base URL, e.g. `photos`.
    const PATH: &'static str;

    /// Singular noun used in log lines.
    const NOUN: &'static str;

    /// Key wrapping the record in create/update responses, if the server
    /// uses one (sliders come back as `{"slider": {...}}`).
    const ENVELOPE: Option<&'static str> = None;

    fn id(&self) -> &str;

    /// The string fields matched by the list search box.
    fn search_fields(&self) -> [&str; 2];
}

/// Records carrying an `isActive` visibility flag.
pub trait Activatable {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

/// In-progress form state for a create or edit operation.
pub trait Draft: Send {
    type Record: Resource;

    /// Presence checks equivalent to the form's required fields.
    fn validate(&self) -> Result<(), CoreError>;

    /// Assemble the request body (JSON or multipart).
    fn to_payload(&self) -> Payload;

    /// Clear every field back to its initial value, releasing any
    /// attachments the draft holds.
    fn reset(&mut self);

    /// `Some(id)` when the draft edits an existing record.
    fn record_id(&self) -> Option<&str> {
        None
    }
}

/// Reject blank required text fields.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Reject unset required fields.
pub(crate) fn require<T>(field: &str, value: &Option<T>) -> Result<(), CoreError> {
    if value.is_none() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}
