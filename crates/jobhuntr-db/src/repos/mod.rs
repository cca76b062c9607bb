//! Repository modules implementing the aggregate and lifecycle operations.
//!
//! Each module adds methods to `HuntService` via `impl HuntService` blocks.
//! Crate-private free functions take a `&libsql::Connection` so they can run
//! against either the plain connection or an open transaction.

pub mod application;
pub mod document;
pub mod interview;
mod lifecycle;
pub mod opportunity;
pub mod reconcile;
