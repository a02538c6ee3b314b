//! # Domain Types
//!
//! Wire-facing domain types shared by every crate in the workspace.
//!
//! ## Identity
//! All entity ids are server-assigned integers; the client never mints ids.
//!
//! ## Snapshot rule
//! A Sale freezes `unit_price` at commit time. Products referenced by a sale
//! line are immutable from this core's point of view; a deleted product
//! surfaces as `Sale.product == None` and is reported as "Unknown".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub category_name: String,
}

// =============================================================================
// Stock Record
// =============================================================================

/// Authoritative per-product stock, 1:1 with Product.
///
/// `quantity >= 0` at all times; the Remote Store enforces the same
/// invariant server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub product_id: i64,
    pub quantity: i64,
}

// =============================================================================
// Product
// =============================================================================

/// A sellable product.
///
/// The size triple (`width`, `ratio`, `rim`) is present together or absent
/// together; partial triples are rejected at creation time
/// (see [`crate::validation::validate_size`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,

    /// Unique business code, normalized to uppercase before creation.
    pub code: String,

    pub name: String,

    /// Tire width in millimeters.
    pub width: Option<u32>,

    /// Aspect ratio in percent.
    pub ratio: Option<u32>,

    /// Rim diameter in inches.
    pub rim: Option<u32>,

    /// Unit price; captured onto the Sale at commit time, never re-read.
    pub price: Money,

    /// Nullable until assigned.
    #[serde(default)]
    pub category: Option<Category>,

    /// Embedded stock as delivered by `GET /products`.
    #[serde(default)]
    pub stock: Option<StockRecord>,
}

impl Product {
    /// Display size string, e.g. `205/55R16`, or `N/A` when the product
    /// has no size triple.
    pub fn size_label(&self) -> String {
        match (self.width, self.ratio, self.rim) {
            (Some(w), Some(r), Some(d)) => format!("{}/{}R{}", w, r, d),
            _ => "N/A".to_string(),
        }
    }

    /// Stock quantity embedded in the catalog payload (0 when missing).
    #[inline]
    pub fn stock_quantity(&self) -> i64 {
        self.stock.map(|s| s.quantity).unwrap_or(0)
    }

    /// Category display name, `Uncategorized` when unassigned.
    pub fn category_label(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.category_name.as_str())
            .unwrap_or("Uncategorized")
    }

    /// Case-insensitive catalog search across name, code, size string and
    /// category name. An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        self.name.to_lowercase().contains(&q)
            || self.code.to_lowercase().contains(&q)
            || self.size_label().to_lowercase().contains(&q)
            || self
                .category
                .as_ref()
                .is_some_and(|c| c.category_name.to_lowercase().contains(&q))
    }
}

// =============================================================================
// New Product (create request)
// =============================================================================

/// Payload for `POST /products`; validated locally before the network call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub code: String,
    pub width: Option<u32>,
    pub ratio: Option<u32>,
    pub rim: Option<u32>,
    pub price: Money,
    pub category_id: i64,
}

// =============================================================================
// Sale
// =============================================================================

/// A committed sale line. Append-only: never mutated or deleted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,

    /// Product price frozen at commit time.
    pub unit_price: Money,

    /// `quantity * unit_price`, computed by the Remote Store.
    pub total_price: Money,

    /// Server-assigned commit timestamp, UTC.
    pub sale_date: DateTime<Utc>,

    /// Embedded product; None when the product was since deleted.
    #[serde(default)]
    pub product: Option<Product>,
}

impl Sale {
    /// Product name for display; deleted products are labelled `Unknown`.
    pub fn product_label(&self) -> &str {
        self.product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("Unknown")
    }
}

// =============================================================================
// Server Aggregates
// =============================================================================

/// Payload of `GET /sales/report/daily` (current server-day aggregate).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailyReportSummary {
    pub total_revenue: Money,
}

/// One row of `GET /stock/low-stock/{threshold}`: a stock record with its
/// product embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockEntry {
    pub product_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub product: Option<Product>,
}

// =============================================================================
// Unit Tests
// =============================================================================
