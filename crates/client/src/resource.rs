//! Typed collection endpoints.
//!
//! Every record type lives under `{api_url}/{R::PATH}`:
//!
//! | Operation        | Request                         |
//! |------------------|---------------------------------|
//! | `list`           | `GET {path}`                    |
//! | `get`            | `GET {path}/{id}`               |
//! | `create`         | `POST {path}` (JSON or form)    |
//! | `update`         | `PUT {path}/{id}` (JSON or form)|
//! | `update_fields`  | `PUT {path}/{id}` (JSON)        |
//! | `remove`         | `DELETE {path}/{id}`            |
//! | `reorder`        | `PUT sliders/reorder` (JSON)    |

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde_json::Value;

use herald_core::ordering::OrderAssignment;
use herald_core::payload::{FormPayload, FormValue, Payload};
use herald_core::slider::SliderItem;
use herald_core::Resource;

use crate::api::{check_status, ensure_success, parse_json, ApiError};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// CRUD operations for one record type.
///
/// Implemented over HTTP by [`ResourceClient`]; controllers depend only
/// on this trait.
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, ApiError>;

    async fn get(&self, id: &str) -> Result<R, ApiError>;

    /// Create a record. `None` means the server accepted it but did not
    /// answer with a record body.
    async fn create(&self, payload: Payload) -> Result<Option<R>, ApiError>;

    /// Full update; the server answers with the stored record.
    async fn update(&self, id: &str, payload: Payload) -> Result<R, ApiError>;

    /// Partial JSON update (e.g. `{"isActive": false}`). The response
    /// body is not inspected.
    async fn update_fields(&self, id: &str, fields: Value) -> Result<(), ApiError>;

    async fn remove(&self, id: &str) -> Result<(), ApiError>;
}

/// Persist several ordinal assignments in one call.
#[async_trait]
pub trait ReorderApi: Send + Sync {
    async fn reorder(&self, assignments: &[OrderAssignment]) -> Result<(), ApiError>;
}

#[async_trait]
impl<R: Resource, T: ResourceApi<R> + ?Sized> ResourceApi<R> for Arc<T> {
    async fn list(&self) -> Result<Vec<R>, ApiError> {
        (**self).list().await
    }

    async fn get(&self, id: &str) -> Result<R, ApiError> {
        (**self).get(id).await
    }

    async fn create(&self, payload: Payload) -> Result<Option<R>, ApiError> {
        (**self).create(payload).await
    }

    async fn update(&self, id: &str, payload: Payload) -> Result<R, ApiError> {
        (**self).update(id, payload).await
    }

    async fn update_fields(&self, id: &str, fields: Value) -> Result<(), ApiError> {
        (**self).update_fields(id, fields).await
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        (**self).remove(id).await
    }
}

#[async_trait]
impl<T: ReorderApi + ?Sized> ReorderApi for Arc<T> {
    async fn reorder(&self, assignments: &[OrderAssignment]) -> Result<(), ApiError> {
        (**self).reorder(assignments).await
    }
}

// ---------------------------------------------------------------------------
// ResourceClient
// ---------------------------------------------------------------------------

/// HTTP client for one collection.
pub struct ResourceClient<R> {
    client: reqwest::Client,
    base_url: String,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    /// Create a client for `api_url` with its own connection pool.
    pub fn new(api_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            base_url: api_url.trim_end_matches('/').to_string(),
            _record: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, R::PATH)
    }

    /// The id is pushed as a single escaped path segment.
    fn item_url(&self, id: &str) -> Result<Url, ApiError> {
        let base = self.collection_url();
        let invalid = |reason: String| ApiError::InvalidUrl {
            url: base.clone(),
            reason,
        };
        let mut url = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("base URL cannot carry a path".to_string()))?
            .push(id);
        Ok(url)
    }

    fn with_payload(
        request: reqwest::RequestBuilder,
        payload: Payload,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        Ok(match payload {
            Payload::Json(body) => request.json(&body),
            Payload::Form(form) => request.multipart(into_multipart(form)?),
        })
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for ResourceClient<R> {
    async fn list(&self) -> Result<Vec<R>, ApiError> {
        tracing::debug!(resource = R::PATH, "GET collection");
        let response = self.client.get(self.collection_url()).send().await?;
        let body = parse_json(response).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get(&self, id: &str) -> Result<R, ApiError> {
        tracing::debug!(resource = R::PATH, id, "GET record");
        let response = self.client.get(self.item_url(id)?).send().await?;
        decode_record(parse_json(response).await?)
    }

    async fn create(&self, payload: Payload) -> Result<Option<R>, ApiError> {
        tracing::debug!(resource = R::PATH, "POST record");
        let request = Self::with_payload(self.client.post(self.collection_url()), payload)?;
        let response = ensure_success(request.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(decode_created(&bytes))
    }

    async fn update(&self, id: &str, payload: Payload) -> Result<R, ApiError> {
        tracing::debug!(resource = R::PATH, id, "PUT record");
        let request = Self::with_payload(self.client.put(self.item_url(id)?), payload)?;
        let response = request.send().await?;
        decode_record(parse_json(response).await?)
    }

    async fn update_fields(&self, id: &str, fields: Value) -> Result<(), ApiError> {
        tracing::debug!(resource = R::PATH, id, %fields, "PUT fields");
        let response = self
            .client
            .put(self.item_url(id)?)
            .json(&fields)
            .send()
            .await?;
        check_status(response).await
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        tracing::debug!(resource = R::PATH, id, "DELETE record");
        let response = self.client.delete(self.item_url(id)?).send().await?;
        check_status(response).await
    }
}

#[async_trait]
impl ReorderApi for ResourceClient<SliderItem> {
    async fn reorder(&self, assignments: &[OrderAssignment]) -> Result<(), ApiError> {
        tracing::debug!(count = assignments.len(), "PUT slider order batch");
        let body = serde_json::json!({ "orders": assignments });
        let response = self
            .client
            .put(format!("{}/reorder", self.collection_url()))
            .json(&body)
            .send()
            .await?;
        check_status(response).await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Decode a single record, unwrapping the resource's response envelope
/// when present.
pub fn decode_record<R: Resource>(body: Value) -> Result<R, ApiError> {
    let body = match (R::ENVELOPE, body) {
        (Some(key), Value::Object(mut map)) if map.contains_key(key) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        (_, body) => body,
    };
    Ok(serde_json::from_value(body)?)
}

/// Decode the body of a successful create. The status already says the
/// record was stored, so a body that is not a record (e.g.
/// `{"message": "created"}` or nothing at all) yields `None`.
pub fn decode_created<R: Resource>(bytes: &[u8]) -> Option<R> {
    if bytes.is_empty() {
        return None;
    }
    let decoded = serde_json::from_slice::<Value>(bytes)
        .map_err(ApiError::from)
        .and_then(decode_record::<R>);
    match decoded {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::debug!(resource = R::PATH, error = %e, "Create response carried no record");
            None
        }
    }
}

/// Convert a transport-neutral form into a `reqwest` multipart body.
fn into_multipart(payload: FormPayload) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (name, value) in payload.into_fields() {
        form = match value {
            FormValue::Text(text) => form.text(name, text),
            FormValue::File {
                file_name,
                content_type,
                bytes,
            } => {
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
