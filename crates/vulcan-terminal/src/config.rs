//! # Session Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tuning knobs for one terminal session.
///
/// Defaults match the production deployment: stock mirror refresh every
/// 60 s, dashboard every 30 s, 300 ms search debounce, low-stock threshold
/// of 10 units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Base URL of the Remote Store API, e.g. `http://shop.local/api`.
    pub store_url: String,

    /// Viewer timezone for report day boundaries.
    pub timezone: chrono_tz::Tz,

    /// Catalog/stock mirror refresh period, seconds.
    pub catalog_refresh_secs: u64,

    /// Dashboard aggregate refresh period, seconds.
    pub dashboard_refresh_secs: u64,

    /// Search quiescence window, milliseconds.
    pub search_debounce_ms: u64,

    /// Stock level below which a product counts as low-stock.
    pub low_stock_threshold: i64,

    /// Upper bound on the historical sales fetch for reports.
    pub sales_fetch_limit: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            store_url: "http://localhost:8000/api".to_string(),
            timezone: chrono_tz::UTC,
            catalog_refresh_secs: 60,
            dashboard_refresh_secs: 30,
            search_debounce_ms: 300,
            low_stock_threshold: 10,
            sales_fetch_limit: 10_000,
        }
    }
}

impl SessionConfig {
    pub fn catalog_refresh(&self) -> Duration {
        Duration::from_secs(self.catalog_refresh_secs)
    }

    pub fn dashboard_refresh(&self) -> Duration {
        Duration::from_secs(self.dashboard_refresh_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
