//! # vulcan-store: Remote Store HTTP Boundary
//!
//! The authoritative store lives on the other side of a JSON/HTTP API.
//! This crate owns that boundary:
//!
//! - [`RemoteStore`] - the trait the session layer programs against
//! - [`StoreClient`] - the reqwest-backed production implementation
//! - [`StoreError`] - transport vs. remote-rejection failures, with the
//!   server's `detail` message surfaced when present
//!
//! Everything above this crate treats the store as the single source of
//! truth; local state is a mirror, updated only from acknowledged
//! responses.

pub mod client;
pub mod error;

pub use client::{RemoteStore, StoreClient};
pub use error::{StoreError, StoreResult};
