//! # Stock Ledger
//!
//! In-memory mirror of authoritative per-product stock.
//!
//! ## Mirror discipline
//! ```text
//! Remote Store ──(bulk refresh)──► replace_all     whole mirror, atomically
//! Remote Store ──(mutation ack)──► apply           one acknowledged record
//! validate_set / validate_adjust                   pure checks, never mutate
//! ```
//! The mirror is only ever written from acknowledged server state - a
//! set/adjust request that has not come back yet leaves the mirror
//! untouched, so local and authoritative quantities cannot drift apart.
//! Bulk refresh replaces the whole mirror in one step; merging a partial
//! product list would mix stale and fresh rows.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::StockRecord;
use crate::MAX_STOCK_QUANTITY;

/// Local mirror of per-product quantities.
#[derive(Debug, Clone, Default)]
pub struct StockLedger {
    quantities: HashMap<i64, i64>,
}

impl StockLedger {
    /// Creates an empty ledger (before the first catalog refresh).
    pub fn new() -> Self {
        StockLedger {
            quantities: HashMap::new(),
        }
    }

    // =========================================================================
    // Pure Validation
    // =========================================================================

    /// Checks an absolute set request. `0..=9999`; the upper bound is a
    /// sanity cap, not a business limit.
    pub fn validate_set(&self, quantity: i64) -> CoreResult<()> {
        if quantity < 0 || quantity > MAX_STOCK_QUANTITY {
            return Err(CoreError::InvalidQuantity {
                quantity,
                min: 0,
                max: MAX_STOCK_QUANTITY,
            });
        }
        Ok(())
    }

    /// Checks a relative adjustment against the mirror and returns the
    /// resulting quantity. A result below zero fails with
    /// `InsufficientStock` and the mirror stays unchanged.
    pub fn validate_adjust(&self, product_id: i64, delta: i64) -> CoreResult<i64> {
        let current = self.quantity_of(product_id);
        let result = current + delta;
        if result < 0 {
            return Err(CoreError::InsufficientStock {
                available: current,
                requested: -delta,
            });
        }
        Ok(result)
    }

    // =========================================================================
    // Acknowledged Mutations
    // =========================================================================

    /// Installs one acknowledged stock record into the mirror.
    pub fn apply(&mut self, record: StockRecord) {
        self.quantities.insert(record.product_id, record.quantity);
    }

    /// Replaces the whole mirror with a fresh snapshot. Products absent
    /// from the snapshot are dropped.
    pub fn replace_all<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = StockRecord>,
    {
        self.quantities = records
            .into_iter()
            .map(|r| (r.product_id, r.quantity))
            .collect();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Mirrored quantity; unknown products read as zero.
    #[inline]
    pub fn quantity_of(&self, product_id: i64) -> i64 {
        self.quantities.get(&product_id).copied().unwrap_or(0)
    }

    /// Quantity still sellable by this terminal after subtracting its own
    /// reservation. Advisory only - other terminals are invisible until
    /// the next refresh.
    #[inline]
    pub fn available(&self, product_id: i64, reserved: i64) -> i64 {
        self.quantity_of(product_id) - reserved
    }

    /// Total units across all products (dashboard stat).
    pub fn total_units(&self) -> i64 {
        self.quantities.values().sum()
    }

    /// Number of products tracked by the mirror.
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(product_id: i64, quantity: i64) -> StockRecord {
        StockRecord {
            product_id,
            quantity,
        }
    }

    fn ledger_with(records: &[(i64, i64)]) -> StockLedger {
        let mut ledger = StockLedger::new();
        ledger.replace_all(records.iter().map(|&(p, q)| record(p, q)));
        ledger
    }

    #[test]
    fn test_validate_set_bounds() {
        let ledger = StockLedger::new();
        assert!(ledger.validate_set(0).is_ok());
        assert!(ledger.validate_set(9999).is_ok());
        assert!(ledger.validate_set(-1).is_err());
        assert!(ledger.validate_set(10000).is_err());
    }

    #[test]
    fn test_validate_adjust_never_goes_negative() {
        let ledger = ledger_with(&[(1, 5)]);

        assert_eq!(ledger.validate_adjust(1, -3).unwrap(), 2);
        assert_eq!(ledger.validate_adjust(1, 10).unwrap(), 15);

        let err = ledger.validate_adjust(1, -10).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                available: 5,
                requested: 10,
            }
        );
        // validation never mutates
        assert_eq!(ledger.quantity_of(1), 5);
    }

    #[test]
    fn test_adjust_on_unknown_product_reads_zero() {
        let ledger = StockLedger::new();
        assert!(ledger.validate_adjust(99, -1).is_err());
        assert_eq!(ledger.validate_adjust(99, 3).unwrap(), 3);
    }

    #[test]
    fn test_apply_installs_acknowledged_record() {
        let mut ledger = ledger_with(&[(1, 5)]);
        ledger.apply(record(1, 2));
        assert_eq!(ledger.quantity_of(1), 2);
    }

    #[test]
    fn test_replace_all_drops_absent_products() {
        let mut ledger = ledger_with(&[(1, 5), (2, 7)]);
        ledger.replace_all([record(2, 4), record(3, 1)]);

        assert_eq!(ledger.quantity_of(1), 0);
        assert_eq!(ledger.quantity_of(2), 4);
        assert_eq!(ledger.quantity_of(3), 1);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_available_subtracts_reservation() {
        let ledger = ledger_with(&[(1, 5)]);
        assert_eq!(ledger.available(1, 2), 3);
        assert_eq!(ledger.available(1, 0), 5);
    }

    #[test]
    fn test_total_units() {
        let ledger = ledger_with(&[(1, 5), (2, 7), (3, 0)]);
        assert_eq!(ledger.total_units(), 12);
    }
}
