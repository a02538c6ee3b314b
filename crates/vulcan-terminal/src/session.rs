//! # Terminal Session
//!
//! The explicit state container for one POS terminal: catalog mirror,
//! stock ledger, cart, and the command surface the presentation layer
//! drives. Replaces the ambient globals of a browser client with one
//! owned struct behind shared handles.
//!
//! ## Command Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                             Session                                 │
//! │                                                                     │
//! │  local (sync, no network)         remote (async, one round-trip)    │
//! │  ────────────────────────         ──────────────────────────────    │
//! │  add_to_cart                      refresh_catalog / refresh_categories
//! │  update_cart_quantity             checkout                          │
//! │  remove_from_cart / clear_cart    set_stock / adjust_stock          │
//! │  cart_view / available_stock      create_category / create_product  │
//! │  search_products                  sales_report / dashboard          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! Interior state lives behind `std::sync::Mutex`es that are never held
//! across an await point: commands read what they need, drop the guard,
//! talk to the store, then re-lock to install the acknowledged result.
//! Lock order when more than one is taken: catalog, ledger, cart.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use vulcan_core::{
    group_by_product, summarize, validation, Cart, Category, CoreError, Money, NewProduct,
    Product, ProductSales, ReportWindow, Sale, SalesSummary, StockLedger, StockRecord,
};
use vulcan_store::{RemoteStore, StoreClient};

use crate::checkout::{commit_lines, CheckoutReceipt};
use crate::config::SessionConfig;
use crate::error::{TerminalError, TerminalResult};

// =============================================================================
// Views
// =============================================================================

/// One cart line as the presentation layer sees it.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub product_id: i64,
    pub name: String,
    pub code: String,
    pub size: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_total: Money,

    /// Mirror stock minus this cart's reservation - what this terminal
    /// may still offer without overselling its own snapshot.
    pub available_stock: i64,
}

/// Cart contents plus totals, returned by every cart mutation.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: Money,
    pub item_count: i64,
}

/// A generated sales report: the filtered window plus its aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    pub window: ReportWindow,
    pub sales: Vec<Sale>,
    pub summary: SalesSummary,
    pub by_product: Vec<ProductSales>,
}

// =============================================================================
// Session
// =============================================================================

/// One terminal session against the Remote Store.
pub struct Session {
    store: Arc<dyn RemoteStore>,
    config: SessionConfig,
    catalog: Mutex<Vec<Product>>,
    categories: Mutex<Vec<Category>>,
    ledger: Mutex<StockLedger>,
    cart: Mutex<Cart>,
    checkout_in_flight: AtomicBool,
}

/// Clears the in-flight flag when the checkout future completes or is
/// dropped mid-way.
struct CheckoutGuard<'a>(&'a AtomicBool);

impl Drop for CheckoutGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Session {
    /// Creates a session over any Remote Store implementation.
    pub fn new(store: Arc<dyn RemoteStore>, config: SessionConfig) -> Self {
        Session {
            store,
            config,
            catalog: Mutex::new(Vec::new()),
            categories: Mutex::new(Vec::new()),
            ledger: Mutex::new(StockLedger::new()),
            cart: Mutex::new(Cart::new()),
            checkout_in_flight: AtomicBool::new(false),
        }
    }

    /// Creates a session with the production HTTP client, pointed at
    /// `config.store_url`.
    pub fn connect(config: SessionConfig) -> Self {
        let client = StoreClient::new(config.store_url.clone());
        Session::new(Arc::new(client), config)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // =========================================================================
    // Catalog Mirror
    // =========================================================================

    /// Bulk-refreshes the catalog and stock mirror from the store.
    ///
    /// The whole mirror is replaced in one step; a partial merge would mix
    /// stale and fresh rows. Returns the product count.
    pub async fn refresh_catalog(&self) -> TerminalResult<usize> {
        let products = self.store.list_products().await?;
        let records: Vec<StockRecord> = products
            .iter()
            .map(|p| StockRecord {
                product_id: p.id,
                quantity: p.stock_quantity(),
            })
            .collect();

        let count = products.len();
        *self.catalog.lock().expect("catalog mutex poisoned") = products;
        self.ledger
            .lock()
            .expect("ledger mutex poisoned")
            .replace_all(records);

        debug!(products = count, "catalog mirror refreshed");
        Ok(count)
    }

    /// Refreshes the category list. Returns the category count.
    pub async fn refresh_categories(&self) -> TerminalResult<usize> {
        let mut categories = self.store.list_categories().await?;
        categories.sort_by(|a, b| a.category_name.cmp(&b.category_name));
        let count = categories.len();
        *self.categories.lock().expect("categories mutex poisoned") = categories;
        Ok(count)
    }

    /// Snapshot of the catalog mirror.
    pub fn catalog(&self) -> Vec<Product> {
        self.catalog.lock().expect("catalog mutex poisoned").clone()
    }

    /// Snapshot of the category list.
    pub fn categories(&self) -> Vec<Category> {
        self.categories
            .lock()
            .expect("categories mutex poisoned")
            .clone()
    }

    /// Case-insensitive catalog search over name, code, size and category.
    pub fn search_products(&self, query: &str) -> Vec<Product> {
        self.catalog
            .lock()
            .expect("catalog mutex poisoned")
            .iter()
            .filter(|p| p.matches(query))
            .cloned()
            .collect()
    }

    /// Mirror stock minus this cart's reservation for one product.
    pub fn available_stock(&self, product_id: i64) -> i64 {
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        let cart = self.cart.lock().expect("cart mutex poisoned");
        cart.available_stock(product_id, &ledger)
    }

    // =========================================================================
    // Cart Commands (local, no network)
    // =========================================================================

    /// Adds a product to the cart, bounded by mirrored stock.
    pub fn add_to_cart(&self, product_id: i64, quantity: i64) -> TerminalResult<CartView> {
        let product = self
            .catalog
            .lock()
            .expect("catalog mutex poisoned")
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or(CoreError::ProductNotFound(product_id))?;

        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        let stock = ledger.quantity_of(product_id);
        let mut cart = self.cart.lock().expect("cart mutex poisoned");
        cart.add(&product, quantity, stock)?;

        debug!(product_id, quantity, "added to cart");
        Ok(Self::view_of(&cart, &ledger))
    }

    /// Sets a line to an explicit quantity; zero or below removes it.
    pub fn update_cart_quantity(&self, product_id: i64, quantity: i64) -> TerminalResult<CartView> {
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        let stock = ledger.quantity_of(product_id);
        let mut cart = self.cart.lock().expect("cart mutex poisoned");
        cart.update_quantity(product_id, quantity, stock)?;
        Ok(Self::view_of(&cart, &ledger))
    }

    /// Removes a line; no-op when absent.
    pub fn remove_from_cart(&self, product_id: i64) -> CartView {
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        let mut cart = self.cart.lock().expect("cart mutex poisoned");
        cart.remove(product_id);
        Self::view_of(&cart, &ledger)
    }

    /// Discards the whole cart (user abandoned the sale).
    pub fn clear_cart(&self) -> CartView {
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        let mut cart = self.cart.lock().expect("cart mutex poisoned");
        cart.clear();
        Self::view_of(&cart, &ledger)
    }

    /// Current cart contents with totals and per-line availability.
    pub fn cart_view(&self) -> CartView {
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        let cart = self.cart.lock().expect("cart mutex poisoned");
        Self::view_of(&cart, &ledger)
    }

    fn view_of(cart: &Cart, ledger: &StockLedger) -> CartView {
        CartView {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    product_id: line.product.id,
                    name: line.product.name.clone(),
                    code: line.product.code.clone(),
                    size: line.product.size_label(),
                    unit_price: line.product.price,
                    quantity: line.quantity,
                    line_total: line.line_total(),
                    available_stock: cart.available_stock(line.product.id, ledger),
                })
                .collect(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Commits the cart as a sequence of per-line sales, in insertion
    /// order, stopping at the first failure.
    ///
    /// On success the cart is cleared. On partial failure the committed
    /// prefix is removed from the cart and the failed line plus everything
    /// after it stays in place for retry. Either way the stock mirror is
    /// refreshed afterwards, best-effort - committed lines changed
    /// authoritative stock.
    pub async fn checkout(&self) -> TerminalResult<CheckoutReceipt> {
        let _guard = self.begin_checkout()?;

        let lines = {
            let cart = self.cart.lock().expect("cart mutex poisoned");
            cart.lines().to_vec()
        };
        if lines.is_empty() {
            return Err(TerminalError::EmptyCart);
        }

        info!(lines = lines.len(), "checkout started");

        match commit_lines(self.store.as_ref(), &lines).await {
            Ok(sales) => {
                self.cart.lock().expect("cart mutex poisoned").clear();
                let receipt = CheckoutReceipt::from_sales(sales);
                info!(
                    total = %receipt.grand_total,
                    items = receipt.items_sold,
                    "checkout complete"
                );
                self.refresh_after_checkout().await;
                Ok(receipt)
            }
            Err(failure) => {
                {
                    let mut cart = self.cart.lock().expect("cart mutex poisoned");
                    for sale in &failure.committed {
                        cart.remove(sale.product_id);
                    }
                }
                self.refresh_after_checkout().await;
                Err(failure.into())
            }
        }
    }

    fn begin_checkout(&self) -> TerminalResult<CheckoutGuard<'_>> {
        self.checkout_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| TerminalError::CheckoutInProgress)?;
        Ok(CheckoutGuard(&self.checkout_in_flight))
    }

    async fn refresh_after_checkout(&self) {
        if let Err(err) = self.refresh_catalog().await {
            warn!(%err, "stock refresh after checkout failed");
        }
    }

    // =========================================================================
    // Stock Commands
    // =========================================================================

    /// Absolute stock set. Validated locally first; the mirror changes
    /// only after the store acknowledges.
    pub async fn set_stock(&self, product_id: i64, quantity: i64) -> TerminalResult<StockRecord> {
        self.ledger
            .lock()
            .expect("ledger mutex poisoned")
            .validate_set(quantity)?;

        let record = self.store.set_stock(product_id, quantity).await?;
        self.install_stock(record);
        info!(product_id, quantity, "stock set");
        Ok(record)
    }

    /// Relative stock adjustment (negative removes). Checked against the
    /// mirror first, then confirmed by the store.
    pub async fn adjust_stock(&self, product_id: i64, delta: i64) -> TerminalResult<StockRecord> {
        self.ledger
            .lock()
            .expect("ledger mutex poisoned")
            .validate_adjust(product_id, delta)?;

        let record = self.store.adjust_stock(product_id, delta).await?;
        self.install_stock(record);
        info!(product_id, delta, quantity = record.quantity, "stock adjusted");
        Ok(record)
    }

    /// Installs an acknowledged stock record into the ledger and the
    /// embedded catalog copy.
    fn install_stock(&self, record: StockRecord) {
        let mut catalog = self.catalog.lock().expect("catalog mutex poisoned");
        self.ledger
            .lock()
            .expect("ledger mutex poisoned")
            .apply(record);
        if let Some(product) = catalog.iter_mut().find(|p| p.id == record.product_id) {
            product.stock = Some(record);
        }
    }

    // =========================================================================
    // Catalog Commands
    // =========================================================================

    /// Creates a category after local duplicate detection.
    pub async fn create_category(&self, name: &str) -> TerminalResult<Category> {
        validation::validate_category_name(name)?;
        {
            let categories = self.categories.lock().expect("categories mutex poisoned");
            validation::ensure_unique_category(&categories, name)?;
        }

        let created = self.store.create_category(name.trim()).await?;

        let mut categories = self.categories.lock().expect("categories mutex poisoned");
        categories.push(created.clone());
        categories.sort_by(|a, b| a.category_name.cmp(&b.category_name));
        info!(category = %created.category_name, "category created");
        Ok(created)
    }

    /// Creates a product after local validation (name, price, size triple,
    /// duplicate code). The code is normalized to uppercase.
    pub async fn create_product(&self, mut draft: NewProduct) -> TerminalResult<Product> {
        draft.code = validation::validate_code(&draft.code)?;
        {
            let catalog = self.catalog.lock().expect("catalog mutex poisoned");
            validation::validate_new_product(&draft, &catalog)?;
        }

        let created = self.store.create_product(&draft).await?;

        {
            let mut catalog = self.catalog.lock().expect("catalog mutex poisoned");
            if let Some(record) = created.stock {
                self.ledger
                    .lock()
                    .expect("ledger mutex poisoned")
                    .apply(record);
            }
            catalog.push(created.clone());
        }
        info!(product = %created.code, "product created");
        Ok(created)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Fetches recent sales and aggregates them for the given window,
    /// anchored at the current instant in the configured viewer timezone.
    pub async fn sales_report(&self, window: ReportWindow) -> TerminalResult<SalesReport> {
        let sales = self.store.list_sales(self.config.sales_fetch_limit).await?;
        let filtered = window.filter(&sales, Utc::now(), &self.config.timezone);
        debug!(
            fetched = sales.len(),
            kept = filtered.len(),
            "sales report generated"
        );
        Ok(SalesReport {
            window,
            summary: summarize(&filtered),
            by_product: group_by_product(&filtered),
            sales: filtered,
        })
    }

    pub(crate) fn store(&self) -> &dyn RemoteStore {
        self.store.as_ref()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
