//! # Terminal Error Type
//!
//! Unified error for session commands, aggregating the layers below:
//!
//! ```text
//! ValidationError ─┐
//!                  ├─► CoreError ──┐
//! StockLedger/Cart ┘               ├─► TerminalError ──► caller
//! StoreError (remote/transport) ───┤
//! CheckoutFailure (partial commit) ┘
//! ```
//!
//! Nothing here is fatal to the process; every variant is recoverable at
//! the boundary of the user action that triggered it.

use thiserror::Error;

use vulcan_core::{CoreError, ValidationError};
use vulcan_store::StoreError;

use crate::checkout::CheckoutFailure;

/// Errors surfaced by session commands.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Local business-rule violation; no network call was made.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The Remote Store rejected the request or was unreachable.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Checkout on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A checkout is already in flight on this session.
    #[error("A checkout is already in progress")]
    CheckoutInProgress,

    /// Multi-line checkout stopped mid-way; the committed prefix persists.
    #[error(transparent)]
    Checkout(#[from] CheckoutFailure),
}

impl From<ValidationError> for TerminalError {
    fn from(err: ValidationError) -> Self {
        TerminalError::Core(CoreError::Validation(err))
    }
}

/// Convenience alias for Results with TerminalError.
pub type TerminalResult<T> = Result<T, TerminalError>;
