//! # vulcan-terminal: Client Session Orchestration
//!
//! One POS terminal session against the Remote Store:
//!
//! - [`Session`] - the explicit state container (catalog mirror, stock
//!   ledger, cart) and the command surface for every user action
//! - [`checkout`] - the sale transaction processor: sequential per-line
//!   commits with deterministic partial-failure attribution
//! - [`tasks`] - the periodic-refresh (skip-if-in-flight) and debounce
//!   primitives that replace raw interval timers
//! - [`dashboard`] - the storefront overview snapshot
//!
//! ## Concurrency model
//! A session has a single logical thread of control: all local mutation
//! happens inside discrete command calls, and the only suspension points
//! are store round-trips. The checkout guard rejects re-entrant
//! submission while a commit sequence is in flight; background refreshes
//! skip overlapping runs instead of queueing them.

pub mod checkout;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod session;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testing;

pub use checkout::{CheckoutFailure, CheckoutReceipt};
pub use config::SessionConfig;
pub use dashboard::DashboardSnapshot;
pub use error::{TerminalError, TerminalResult};
pub use session::{CartLineView, CartView, SalesReport, Session};
pub use tasks::{Debouncer, PeriodicTask};
