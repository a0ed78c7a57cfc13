//! Herald domain core.
//!
//! Records, drafts and the pure helpers (filtering, ordinal swaps,
//! attachment lifetime) shared by the HTTP client and the console.
//! This crate performs no network I/O.

pub mod attachment;
pub mod error;
pub mod event;
pub mod ordering;
pub mod payload;
pub mod press;
pub mod resource;
pub mod search;
pub mod slider;
pub mod types;
pub mod video;

pub use error::CoreError;
pub use resource::{Activatable, Draft, Resource};
