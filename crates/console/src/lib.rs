//! `herald-console` library crate.
//!
//! Controllers and the command layer behind the `herald` binary,
//! re-exported for integration testing.

pub mod cli;
pub mod commands;
pub mod confirm;
pub mod controller;
pub mod notify;
pub mod screen;
