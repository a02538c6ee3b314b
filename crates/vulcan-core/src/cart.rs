//! # Cart Reservation
//!
//! Staging area for requested-but-uncommitted quantities.
//!
//! ## Invariants
//! - Lines are unique by product id; re-adding a product increments its
//!   existing line rather than duplicating.
//! - For every line, `1 <= quantity <= mirrored stock` after any mutation.
//! - The reservation is purely client-side: nothing is held on the Remote
//!   Store, so a second terminal's concurrent sale is invisible until the
//!   next refresh. That race is accepted; the store re-checks at commit.
//!
//! Each line snapshots the product at add time, freezing the price the
//! customer was shown even if the catalog changes underneath.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::ledger::StockLedger;
use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Line
// =============================================================================

/// One product's reservation in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Product snapshot taken when the line was created.
    pub product: Product,

    /// Reserved quantity.
    pub quantity: i64,
}

impl CartLine {
    /// `unit price * quantity` for this line.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// An ordered collection of cart lines, keyed by product id.
///
/// Insertion order is significant: checkout commits lines in exactly this
/// order (see the transaction processor).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds `quantity` units of a product, validated against the mirrored
    /// `stock` for that product.
    ///
    /// ## Behavior
    /// - Product already in cart: fails with `StockExceeded` when the
    ///   combined claim would pass `stock`, otherwise increments.
    /// - Product not in cart: fails with `OutOfStock` when `stock <= 0`,
    ///   with `StockExceeded` when `quantity > stock`, otherwise inserts.
    pub fn add(&mut self, product: &Product, quantity: i64, stock: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            let requested = line.quantity + quantity;
            if requested > stock {
                return Err(CoreError::StockExceeded {
                    name: product.name.clone(),
                    available: stock,
                    requested,
                });
            }
            line.quantity = requested;
            return Ok(());
        }

        if stock <= 0 {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }
        if quantity > stock {
            return Err(CoreError::StockExceeded {
                name: product.name.clone(),
                available: stock,
                requested: quantity,
            });
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity,
        });
        Ok(())
    }

    /// Sets a line to an explicit quantity.
    ///
    /// ## Behavior
    /// - `quantity <= 0` removes the line (explicit removal, not an error).
    /// - `quantity > stock` fails with `StockExceeded`; the line keeps its
    ///   previous quantity.
    pub fn update_quantity(&mut self, product_id: i64, quantity: i64, stock: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product.id == product_id)
            .ok_or(CoreError::ProductNotInCart(product_id))?;

        if quantity > stock {
            return Err(CoreError::StockExceeded {
                name: line.product.name.clone(),
                available: stock,
                requested: quantity,
            });
        }

        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line by product id; no-op when absent.
    pub fn remove(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Discards all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lines in insertion order.
    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// This cart's reservation for a product (0 when not in cart).
    pub fn reserved(&self, product_id: i64) -> i64 {
        self.lines
            .iter()
            .find(|l| l.product.id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Stock still offerable by this terminal: mirror minus this cart's
    /// own reservation.
    pub fn available_stock(&self, product_id: i64, ledger: &StockLedger) -> i64 {
        ledger.available(product_id, self.reserved(product_id))
    }

    /// Grand total over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct product lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
