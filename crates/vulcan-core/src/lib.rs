//! # vulcan-core: Pure Business Logic for Vulcan POS
//!
//! The heart of the workspace: stock consistency rules, cart reservation,
//! and report aggregation as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  vulcan-terminal   session state, checkout, background refresh  │
//! └───────────────┬─────────────────────────────┬───────────────────┘
//!                 │                             │
//! ┌───────────────▼──────────────┐  ┌───────────▼───────────────────┐
//! │  ★ vulcan-core (THIS CRATE)  │  │  vulcan-store                 │
//! │                              │  │  Remote Store HTTP client     │
//! │  money   ledger   cart       │  └───────────────────────────────┘
//! │  types   report   validation │
//! │                              │
//! │  NO I/O • NO CLOCK • PURE    │
//! └──────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, StockRecord, Category)
//! - [`money`] - Integer-cents money with decimal-dollar wire format
//! - [`ledger`] - Authoritative-stock mirror and set/adjust validation
//! - [`cart`] - Stock-bounded cart reservation
//! - [`report`] - Time-windowed sales filtering and revenue aggregation
//! - [`validation`] - Field-level input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **No I/O**: network, clock and file access are forbidden here; "now"
//!    is always a parameter
//! 2. **Integer money**: monetary values are i64 cents; floats appear only
//!    at the wire boundary and in report percentages
//! 3. **Explicit errors**: typed enums, never strings or panics
//! 4. **Mirror discipline**: local stock state only changes from
//!    acknowledged server responses

pub mod cart;
pub mod error;
pub mod ledger;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::StockLedger;
pub use money::Money;
pub use report::{group_by_product, summarize, ProductSales, ReportWindow, SalesSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound accepted by absolute stock sets.
///
/// A sanity cap against fat-fingered entry (e.g. 10000 instead of 100),
/// not a business limit. Relative adjustments are bounded below by zero
/// only.
pub const MAX_STOCK_QUANTITY: i64 = 9999;
