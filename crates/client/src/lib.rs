//! REST client for the Herald content API.
//!
//! One [`ResourceClient`] per record type wraps the collection endpoints
//! (`list`, `get`, `create`, `update`, `remove`). [`HeraldClient`] owns
//! the shared [`reqwest::Client`] and the injected [`ClientConfig`] and
//! hands out the typed clients.

pub mod api;
pub mod config;
pub mod resource;

pub use api::{ApiError, AssetFetcher, HeraldClient};
pub use config::{ClientConfig, ConfigError, ReorderMode};
pub use resource::{ReorderApi, ResourceApi, ResourceClient};
