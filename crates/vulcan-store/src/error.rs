//! # Store Error Types
//!
//! Failures crossing the Remote Store boundary.
//!
//! Two categories, matching how callers recover:
//! - [`StoreError::Remote`] - the store answered with a non-2xx status.
//!   The message is the server's `detail` field when the body carries one,
//!   else the generic `"<METHOD> <endpoint> failed"`. Includes the
//!   authoritative stock rejections (insufficient stock at commit time).
//! - [`StoreError::Transport`] - the request never completed (connection,
//!   timeout, malformed body). No automatic retry; the caller re-invokes
//!   the action manually.

use serde::Deserialize;
use thiserror::Error;

/// Errors from Remote Store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Non-2xx response from the store.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// Network-level or decoding failure.
    #[error("remote store unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

impl StoreError {
    /// Whether the failure is the store rejecting the request (as opposed
    /// to the request not arriving). Remote rejections carry an
    /// authoritative message worth surfacing verbatim.
    pub fn is_rejection(&self) -> bool {
        matches!(self, StoreError::Remote { .. })
    }
}

/// Convenience alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Failure Body
// =============================================================================

/// Error body shape used by the store on 4xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<String>,
}

/// Builds the surfaced error for a non-2xx response.
///
/// The server's `detail` message wins when the body parses; anything else
/// (empty body, HTML error page) falls back to the generic form.
pub(crate) fn remote_failure(status: u16, body: &[u8], method: &str, endpoint: &str) -> StoreError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail);

    StoreError::Remote {
        status,
        message: detail.unwrap_or_else(|| format!("{method} {endpoint} failed")),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_message_wins() {
        let err = remote_failure(400, br#"{"detail": "Insufficient stock"}"#, "POST", "/sales");
        assert_eq!(err.to_string(), "Insufficient stock");
        assert!(err.is_rejection());
    }

    #[test]
    fn test_generic_fallback_on_missing_detail() {
        let err = remote_failure(400, br#"{}"#, "POST", "/sales");
        assert_eq!(err.to_string(), "POST /sales failed");
    }

    #[test]
    fn test_generic_fallback_on_unparseable_body() {
        let err = remote_failure(502, b"<html>Bad Gateway</html>", "GET", "/products");
        assert_eq!(err.to_string(), "GET /products failed");

        match err {
            StoreError::Remote { status, .. } => assert_eq!(status, 502),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
