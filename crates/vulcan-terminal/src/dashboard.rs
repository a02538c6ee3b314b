//! # Dashboard Snapshot
//!
//! The storefront overview: product and stock totals, low-stock alerts,
//! today's revenue and the recent sale feed. Assembled from four store
//! reads issued concurrently; read-only, never touches the session
//! mirrors.

use serde::Serialize;
use tracing::debug;

use vulcan_core::{LowStockEntry, Money, Sale};

use crate::error::TerminalResult;
use crate::session::Session;

/// Bound on the recent-sales feed fetch.
const RECENT_SALES_LIMIT: u32 = 1000;

/// One refresh of the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// Number of catalog products.
    pub product_count: usize,

    /// Total sellable units across all products.
    pub total_stock_units: i64,

    /// Products under the configured low-stock threshold.
    pub low_stock_count: usize,

    /// Current server-day revenue.
    pub today_revenue: Money,

    /// Newest sales, most recent first.
    pub recent_sales: Vec<Sale>,

    /// Low-stock records with products embedded, for the alert panel.
    pub low_stock: Vec<LowStockEntry>,
}

impl Session {
    /// Loads a fresh dashboard snapshot.
    pub async fn dashboard(&self) -> TerminalResult<DashboardSnapshot> {
        let (products, sales, low_stock, daily) = tokio::join!(
            self.store().list_products(),
            self.store().list_sales(RECENT_SALES_LIMIT),
            self.store().low_stock(self.config().low_stock_threshold),
            self.store().daily_report(),
        );
        let products = products?;
        let low_stock = low_stock?;
        let daily = daily?;

        let snapshot = DashboardSnapshot {
            product_count: products.len(),
            total_stock_units: products.iter().map(|p| p.stock_quantity()).sum(),
            low_stock_count: low_stock.len(),
            today_revenue: daily.total_revenue,
            recent_sales: sales?,
            low_stock,
        };
        debug!(
            products = snapshot.product_count,
            low_stock = snapshot.low_stock_count,
            "dashboard refreshed"
        );
        Ok(snapshot)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::testing::{product, FakeStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_dashboard_aggregates() {
        let store = Arc::new(FakeStore::new());
        store.put_product(product(1, "TIRE-A", 1000), 20);
        store.put_product(product(2, "TIRE-B", 2500), 4);
        store.put_product(product(3, "TIRE-C", 4000), 0);

        let session = Session::new(store.clone(), SessionConfig::default());
        session.refresh_catalog().await.unwrap();
        session.add_to_cart(1, 2).unwrap();
        session.checkout().await.unwrap();

        let dashboard = session.dashboard().await.unwrap();
        assert_eq!(dashboard.product_count, 3);
        assert_eq!(dashboard.total_stock_units, 18 + 4);
        // threshold 10: TIRE-B at 4 and TIRE-C at 0
        assert_eq!(dashboard.low_stock_count, 2);
        assert_eq!(dashboard.today_revenue.cents(), 2000);
        assert_eq!(dashboard.recent_sales.len(), 1);
    }
}
