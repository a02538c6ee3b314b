//! # Sale Transaction Processor
//!
//! Converts a cart snapshot into an ordered sequence of commit operations
//! against the Remote Store.
//!
//! ## Sequencing contract
//! ```text
//! cart [(A,2), (B,1), (C,3)]
//!        │
//!        ▼  insertion order, strictly sequential
//!   POST /sales {A,2}  ──ok──►  committed: [saleA]
//!   POST /sales {B,1}  ──4xx──► STOP
//!   (C never attempted)
//!        │
//!        ▼
//!   CheckoutFailure { line_index: 1, product: B, committed: [saleA] }
//! ```
//! Lines are never reordered or parallelized: the store is the sole
//! arbiter of per-product stock, and sequential commits make the failure
//! attributable to exactly one line. Checkout is therefore **not atomic**:
//! the committed prefix persists on the store, and callers must report
//! precisely which lines went through.

use thiserror::Error;
use tracing::{debug, warn};

use vulcan_core::{CartLine, Money, Sale};
use vulcan_store::{RemoteStore, StoreError};

// =============================================================================
// Outcome Types
// =============================================================================

/// Result of a fully committed checkout.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    /// Committed sales, one per cart line, in commit order.
    pub sales: Vec<Sale>,

    /// Sum of the committed `total_price`s.
    pub grand_total: Money,

    /// Sum of the committed quantities.
    pub items_sold: i64,
}

impl CheckoutReceipt {
    pub(crate) fn from_sales(sales: Vec<Sale>) -> Self {
        let grand_total = sales.iter().map(|s| s.total_price).sum();
        let items_sold = sales.iter().map(|s| s.quantity).sum();
        CheckoutReceipt {
            sales,
            grand_total,
            items_sold,
        }
    }
}

/// A checkout that stopped at a failing line.
///
/// Lines before `line_index` are committed and persist on the store; the
/// failing line and everything after it were not attempted and stay in
/// the cart for retry.
#[derive(Debug, Error)]
#[error("Checkout failed for {product_name}: {reason}")]
pub struct CheckoutFailure {
    /// Zero-based cart position of the line that failed.
    pub line_index: usize,

    pub product_id: i64,

    pub product_name: String,

    /// Sales committed before the failure, in commit order.
    pub committed: Vec<Sale>,

    /// The store's answer for the failing line.
    pub reason: StoreError,
}

// =============================================================================
// Commit Loop
// =============================================================================

/// Commits cart lines one at a time, stopping at the first failure.
pub(crate) async fn commit_lines(
    store: &dyn RemoteStore,
    lines: &[CartLine],
) -> Result<Vec<Sale>, CheckoutFailure> {
    let mut committed = Vec::with_capacity(lines.len());

    for (line_index, line) in lines.iter().enumerate() {
        debug!(
            product_id = line.product.id,
            quantity = line.quantity,
            line_index,
            "committing sale line"
        );

        match store.create_sale(line.product.id, line.quantity).await {
            Ok(sale) => committed.push(sale),
            Err(reason) => {
                warn!(
                    product_id = line.product.id,
                    line_index,
                    committed = committed.len(),
                    %reason,
                    "checkout stopped at failing line"
                );
                return Err(CheckoutFailure {
                    line_index,
                    product_id: line.product.id,
                    product_name: line.product.name.clone(),
                    committed,
                    reason,
                });
            }
        }
    }

    Ok(committed)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{product, FakeStore};
    use vulcan_core::Cart;

    fn cart_with(store: &FakeStore, entries: &[(i64, i64)]) -> Cart {
        let mut cart = Cart::new();
        for &(product_id, quantity) in entries {
            let p = store.product(product_id);
            cart.add(&p, quantity, store.stock_of(product_id)).unwrap();
        }
        cart
    }

    #[tokio::test]
    async fn test_all_lines_commit_in_insertion_order() {
        let store = FakeStore::new();
        store.put_product(product(1, "TIRE-A", 1000), 5);
        store.put_product(product(2, "TIRE-B", 2500), 5);

        let cart = cart_with(&store, &[(2, 1), (1, 3)]);
        let sales = commit_lines(&store, cart.lines()).await.unwrap();

        let order: Vec<i64> = sales.iter().map(|s| s.product_id).collect();
        assert_eq!(order, vec![2, 1]);

        let receipt = CheckoutReceipt::from_sales(sales);
        assert_eq!(receipt.grand_total.cents(), 2500 + 3000);
        assert_eq!(receipt.items_sold, 4);
    }

    #[tokio::test]
    async fn test_failure_stops_at_failing_line() {
        let store = FakeStore::new();
        store.put_product(product(1, "TIRE-A", 1000), 5);
        store.put_product(product(2, "TIRE-B", 2500), 5);
        store.put_product(product(3, "TIRE-C", 4000), 5);

        let cart = cart_with(&store, &[(1, 2), (2, 1), (3, 1)]);
        // another terminal drained B between cart build and checkout
        store.drain_stock(2);

        let failure = commit_lines(&store, cart.lines()).await.unwrap_err();

        assert_eq!(failure.line_index, 1);
        assert_eq!(failure.product_id, 2);
        assert_eq!(failure.committed.len(), 1);
        assert_eq!(failure.committed[0].product_id, 1);
        assert!(failure.reason.is_rejection());

        // the line after the failure was never attempted
        assert_eq!(store.sales_for(3), 0);
        // and the committed prefix persisted
        assert_eq!(store.sales_for(1), 1);
    }

    #[tokio::test]
    async fn test_failure_message_names_the_product() {
        let store = FakeStore::new();
        store.put_product(product(2, "TIRE-B", 2500), 0);

        let mut cart = Cart::new();
        // bypass the cart's own stock check to exercise the remote rejection
        cart.add(&store.product(2), 1, 1).unwrap();

        let failure = commit_lines(&store, cart.lines()).await.unwrap_err();
        let message = failure.to_string();
        assert!(message.contains("TIRE-B"), "message was: {message}");
    }
}
