//! # Store Client
//!
//! The concrete JSON/HTTP client for the Remote Store, plus the
//! [`RemoteStore`] trait the session layer consumes.
//!
//! ## Endpoint Table
//! ```text
//! GET  /products                     catalog with embedded stock + category
//! GET  /categories
//! POST /categories                   {category_name}
//! POST /products                     {name, code, width?, ratio?, rim?, price, category_id}
//! GET  /sales?limit=N                newest-window bounded by N
//! POST /sales                        {product_id, quantity} -> committed Sale
//! GET  /sales/report/daily           {total_revenue, ...}
//! GET  /stock/low-stock/{threshold}  records with quantity < threshold
//! PUT  /stock/{id}                   {quantity}
//! POST /stock/{id}/adjust            {adjustment}
//! ```
//!
//! No endpoint returns partial-success composites; a multi-line checkout
//! failure is observable only as "some Sales exist, plus an error for the
//! first failing line" - which is exactly how the transaction processor
//! reports it.

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use vulcan_core::{
    Category, DailyReportSummary, LowStockEntry, NewProduct, Product, Sale, StockRecord,
};

use crate::error::{remote_failure, StoreResult};

// =============================================================================
// Remote Store Trait
// =============================================================================

/// The Remote Store as the rest of the workspace sees it.
///
/// The store is the single source of truth: it enforces non-negative stock
/// server-side and serializes conflicting mutations on the same product.
/// Implemented by [`StoreClient`] for production and by in-memory fakes in
/// the transaction-engine tests.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn create_category(&self, category_name: &str) -> StoreResult<Category>;

    async fn create_product(&self, draft: &NewProduct) -> StoreResult<Product>;

    /// Newest sales, bounded by `limit`.
    async fn list_sales(&self, limit: u32) -> StoreResult<Vec<Sale>>;

    /// Commits one sale line. The store captures the unit price, computes
    /// the total and decrements stock atomically; insufficient stock or an
    /// unknown product comes back as a 4xx rejection.
    async fn create_sale(&self, product_id: i64, quantity: i64) -> StoreResult<Sale>;

    /// Current server-day revenue aggregate.
    async fn daily_report(&self) -> StoreResult<DailyReportSummary>;

    /// Stock records with `quantity < threshold`, product embedded.
    async fn low_stock(&self, threshold: i64) -> StoreResult<Vec<LowStockEntry>>;

    /// Absolute stock set.
    async fn set_stock(&self, product_id: i64, quantity: i64) -> StoreResult<StockRecord>;

    /// Relative stock adjustment (negative removes).
    async fn adjust_stock(&self, product_id: i64, adjustment: i64) -> StoreResult<StockRecord>;
}

// =============================================================================
// Request Payloads
// =============================================================================

#[derive(Debug, Serialize)]
struct NewCategoryBody<'a> {
    category_name: &'a str,
}

#[derive(Debug, Serialize)]
struct NewSaleBody {
    product_id: i64,
    quantity: i64,
}

#[derive(Debug, Serialize)]
struct SetStockBody {
    quantity: i64,
}

#[derive(Debug, Serialize)]
struct AdjustStockBody {
    adjustment: i64,
}

// =============================================================================
// Store Client
// =============================================================================

/// JSON/HTTP client for the Remote Store.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    /// Creates a client against a base URL (e.g. `http://shop.local/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        StoreClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> StoreResult<T> {
        debug!(endpoint, "GET");
        let response = self.http.get(self.url(endpoint)).send().await?;
        Self::decode("GET", endpoint, response).await
    }

    async fn post_json<T, B>(&self, endpoint: &str, body: &B) -> StoreResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!(endpoint, "POST");
        let response = self.http.post(self.url(endpoint)).json(body).send().await?;
        Self::decode("POST", endpoint, response).await
    }

    async fn put_json<T, B>(&self, endpoint: &str, body: &B) -> StoreResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!(endpoint, "PUT");
        let response = self.http.put(self.url(endpoint)).json(body).send().await?;
        Self::decode("PUT", endpoint, response).await
    }

    async fn decode<T: DeserializeOwned>(
        method: &str,
        endpoint: &str,
        response: Response,
    ) -> StoreResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(remote_failure(status.as_u16(), &body, method, endpoint))
    }
}

#[async_trait]
impl RemoteStore for StoreClient {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.get_json("/products").await
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        self.get_json("/categories").await
    }

    async fn create_category(&self, category_name: &str) -> StoreResult<Category> {
        self.post_json("/categories", &NewCategoryBody { category_name })
            .await
    }

    async fn create_product(&self, draft: &NewProduct) -> StoreResult<Product> {
        self.post_json("/products", draft).await
    }

    async fn list_sales(&self, limit: u32) -> StoreResult<Vec<Sale>> {
        self.get_json(&format!("/sales?limit={limit}")).await
    }

    async fn create_sale(&self, product_id: i64, quantity: i64) -> StoreResult<Sale> {
        self.post_json(
            "/sales",
            &NewSaleBody {
                product_id,
                quantity,
            },
        )
        .await
    }

    async fn daily_report(&self) -> StoreResult<DailyReportSummary> {
        self.get_json("/sales/report/daily").await
    }

    async fn low_stock(&self, threshold: i64) -> StoreResult<Vec<LowStockEntry>> {
        self.get_json(&format!("/stock/low-stock/{threshold}")).await
    }

    async fn set_stock(&self, product_id: i64, quantity: i64) -> StoreResult<StockRecord> {
        self.put_json(&format!("/stock/{product_id}"), &SetStockBody { quantity })
            .await
    }

    async fn adjust_stock(&self, product_id: i64, adjustment: i64) -> StoreResult<StockRecord> {
        self.post_json(
            &format!("/stock/{product_id}/adjust"),
            &AdjustStockBody { adjustment },
        )
        .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
