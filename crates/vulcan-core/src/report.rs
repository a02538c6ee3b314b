//! # Report Aggregation
//!
//! Time-windowed filtering and revenue aggregation over historical sales.
//!
//! ## Window semantics
//! All named windows compare **local calendar dates** derived through the
//! viewer's timezone, never elapsed milliseconds - a sale at local 23:59:59
//! belongs to that local day regardless of UTC offset or a DST transition
//! earlier in the week. The custom range applies the same rule to both
//! bounds, inclusive on each end.
//!
//! "Today" is always derived from a caller-supplied `now`; this module
//! never reads the clock.

use chrono::{DateTime, Days, Months, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Product, Sale};

// =============================================================================
// Report Window
// =============================================================================

/// A time-window policy for filtering sales. Mutates nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "window")]
pub enum ReportWindow {
    /// Every sale, unfiltered.
    All,
    /// Sales whose local calendar date is today.
    Daily,
    /// Sales whose local calendar date is within the last 7 days.
    Weekly,
    /// Sales whose local calendar date is within the last calendar month.
    Monthly,
    /// Sales whose local calendar date lies in `[from, to]`, both inclusive.
    Custom { from: NaiveDate, to: NaiveDate },
}

impl ReportWindow {
    /// Filters `sales` down to the window, judged as of `now` in the
    /// viewer timezone `tz`.
    pub fn filter<Tz: TimeZone>(&self, sales: &[Sale], now: DateTime<Utc>, tz: &Tz) -> Vec<Sale> {
        let today = now.with_timezone(tz).date_naive();
        sales
            .iter()
            .filter(|s| self.contains(s.sale_date, today, tz))
            .cloned()
            .collect()
    }

    /// Whether a single sale timestamp falls inside the window.
    pub fn contains<Tz: TimeZone>(
        &self,
        sale_date: DateTime<Utc>,
        today: NaiveDate,
        tz: &Tz,
    ) -> bool {
        let local_date = sale_date.with_timezone(tz).date_naive();
        match *self {
            ReportWindow::All => true,
            ReportWindow::Daily => local_date == today,
            ReportWindow::Weekly => {
                let cutoff = today
                    .checked_sub_days(Days::new(7))
                    .unwrap_or(NaiveDate::MIN);
                local_date >= cutoff
            }
            ReportWindow::Monthly => {
                // Calendar-month subtraction: Mar 31 -> Feb 28/29
                let cutoff = today
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(NaiveDate::MIN);
                local_date >= cutoff
            }
            ReportWindow::Custom { from, to } => local_date >= from && local_date <= to,
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Totals over a filtered sale list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Number of sale records.
    pub count: usize,

    /// Sum of `total_price` over the list.
    pub total_revenue: Money,

    /// Sum of quantities.
    pub items_sold: i64,

    /// `total_revenue / count`, zero when the list is empty.
    pub average_sale: Money,
}

/// Computes count, revenue, items sold and per-sale average.
pub fn summarize(sales: &[Sale]) -> SalesSummary {
    let total_revenue: Money = sales.iter().map(|s| s.total_price).sum();
    SalesSummary {
        count: sales.len(),
        total_revenue,
        items_sold: sales.iter().map(|s| s.quantity).sum(),
        average_sale: total_revenue.divide_by(sales.len() as i64),
    }
}

// =============================================================================
// Per-Product Grouping
// =============================================================================

/// Aggregated sales for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_id: i64,

    /// Embedded product from the first sale seen; None when deleted.
    pub product: Option<Product>,

    /// Units sold across the window.
    pub quantity: i64,

    /// Revenue across the window.
    pub revenue: Money,

    /// Share of the window's total revenue, 0.0 when the total is zero.
    pub percentage_of_total: f64,
}

impl ProductSales {
    /// Display name; deleted products are labelled `Unknown`.
    pub fn product_label(&self) -> &str {
        self.product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("Unknown")
    }
}

/// Groups sales by product id and ranks by revenue, descending.
///
/// Ties keep first-seen order (the underlying sort is stable). A sale whose
/// embedded product is missing still aggregates under its `product_id`.
pub fn group_by_product(sales: &[Sale]) -> Vec<ProductSales> {
    let mut groups: Vec<ProductSales> = Vec::new();

    for sale in sales {
        match groups.iter_mut().find(|g| g.product_id == sale.product_id) {
            Some(group) => {
                group.quantity += sale.quantity;
                group.revenue += sale.total_price;
            }
            None => groups.push(ProductSales {
                product_id: sale.product_id,
                product: sale.product.clone(),
                quantity: sale.quantity,
                revenue: sale.total_price,
                percentage_of_total: 0.0,
            }),
        }
    }

    groups.sort_by(|a, b| b.revenue.cents().cmp(&a.revenue.cents()));

    let total: Money = groups.iter().map(|g| g.revenue).sum();
    for group in &mut groups {
        group.percentage_of_total = group.revenue.percentage_of(total);
    }

    groups
}

// =============================================================================
// Unit Tests
// =============================================================================
