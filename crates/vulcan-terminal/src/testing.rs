//! In-memory Remote Store fake for tests.
//!
//! Mimics the server's authoritative behavior: stock is checked and
//! decremented at sale creation, adjustments below zero are rejected, and
//! failure bodies surface a `detail`-style message.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use vulcan_core::{
    Category, DailyReportSummary, LowStockEntry, Money, NewProduct, Product, Sale, StockRecord,
};
use vulcan_store::{RemoteStore, StoreError, StoreResult};

pub(crate) fn product(id: i64, code: &str, price_cents: i64) -> Product {
    Product {
        id,
        code: code.to_string(),
        name: format!("Tire {code}"),
        width: None,
        ratio: None,
        rim: None,
        price: Money::from_cents(price_cents),
        category: None,
        stock: None,
    }
}

fn reject(message: impl Into<String>) -> StoreError {
    StoreError::Remote {
        status: 400,
        message: message.into(),
    }
}

#[derive(Default)]
pub(crate) struct FakeStore {
    products: Mutex<Vec<Product>>,
    stock: Mutex<HashMap<i64, i64>>,
    categories: Mutex<Vec<Category>>,
    sales: Mutex<Vec<Sale>>,
    next_id: AtomicI64,
    sale_delay_ms: AtomicU64,
}

impl FakeStore {
    pub(crate) fn new() -> Self {
        FakeStore {
            next_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    pub(crate) fn put_product(&self, product: Product, stock: i64) {
        self.stock.lock().unwrap().insert(product.id, stock);
        self.products.lock().unwrap().push(product);
    }

    pub(crate) fn put_category(&self, id: i64, name: &str) {
        self.categories.lock().unwrap().push(Category {
            id,
            category_name: name.to_string(),
        });
    }

    pub(crate) fn product(&self, id: i64) -> Product {
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .unwrap()
    }

    pub(crate) fn stock_of(&self, product_id: i64) -> i64 {
        self.stock
            .lock()
            .unwrap()
            .get(&product_id)
            .copied()
            .unwrap_or(0)
    }

    /// Simulates another terminal selling the product out.
    pub(crate) fn drain_stock(&self, product_id: i64) {
        self.stock.lock().unwrap().insert(product_id, 0);
    }

    pub(crate) fn sales_for(&self, product_id: i64) -> usize {
        self.sales
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.product_id == product_id)
            .count()
    }

    /// Makes every `create_sale` take this long (paused-clock tests).
    pub(crate) fn set_sale_delay(&self, delay: Duration) {
        self.sale_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    fn fresh_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteStore for FakeStore {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let stock = self.stock.lock().unwrap().clone();
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .cloned()
            .map(|mut p| {
                p.stock = Some(StockRecord {
                    product_id: p.id,
                    quantity: stock.get(&p.id).copied().unwrap_or(0),
                });
                p
            })
            .collect())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn create_category(&self, category_name: &str) -> StoreResult<Category> {
        let category = Category {
            id: self.fresh_id(),
            category_name: category_name.to_string(),
        };
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn create_product(&self, draft: &NewProduct) -> StoreResult<Product> {
        let created = Product {
            id: self.fresh_id(),
            code: draft.code.clone(),
            name: draft.name.clone(),
            width: draft.width,
            ratio: draft.ratio,
            rim: draft.rim,
            price: draft.price,
            category: None,
            stock: None,
        };
        self.put_product(created.clone(), 0);
        let mut with_stock = created;
        with_stock.stock = Some(StockRecord {
            product_id: with_stock.id,
            quantity: 0,
        });
        Ok(with_stock)
    }

    async fn list_sales(&self, limit: u32) -> StoreResult<Vec<Sale>> {
        let sales = self.sales.lock().unwrap();
        Ok(sales.iter().rev().take(limit as usize).cloned().collect())
    }

    async fn create_sale(&self, product_id: i64, quantity: i64) -> StoreResult<Sale> {
        let delay = self.sale_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let product = self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| reject(format!("Product {product_id} not found")))?;

        {
            let mut stock = self.stock.lock().unwrap();
            let available = stock.get(&product_id).copied().unwrap_or(0);
            if available < quantity {
                return Err(reject(format!("Insufficient stock for {}", product.code)));
            }
            stock.insert(product_id, available - quantity);
        }

        let sale = Sale {
            id: self.fresh_id(),
            product_id,
            quantity,
            unit_price: product.price,
            total_price: product.price.multiply_quantity(quantity),
            sale_date: Utc::now(),
            product: Some(product),
        };
        self.sales.lock().unwrap().push(sale.clone());
        Ok(sale)
    }

    async fn daily_report(&self) -> StoreResult<DailyReportSummary> {
        let total_revenue = self
            .sales
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.total_price)
            .sum();
        Ok(DailyReportSummary { total_revenue })
    }

    async fn low_stock(&self, threshold: i64) -> StoreResult<Vec<LowStockEntry>> {
        let products = self.products.lock().unwrap().clone();
        Ok(self
            .stock
            .lock()
            .unwrap()
            .iter()
            .filter(|&(_, &quantity)| quantity < threshold)
            .map(|(&product_id, &quantity)| LowStockEntry {
                product_id,
                quantity,
                product: products.iter().find(|p| p.id == product_id).cloned(),
            })
            .collect())
    }

    async fn set_stock(&self, product_id: i64, quantity: i64) -> StoreResult<StockRecord> {
        if !(0..=9999).contains(&quantity) {
            return Err(reject("Invalid quantity"));
        }
        self.stock.lock().unwrap().insert(product_id, quantity);
        Ok(StockRecord {
            product_id,
            quantity,
        })
    }

    async fn adjust_stock(&self, product_id: i64, adjustment: i64) -> StoreResult<StockRecord> {
        let mut stock = self.stock.lock().unwrap();
        let current = stock.get(&product_id).copied().unwrap_or(0);
        let quantity = current + adjustment;
        if quantity < 0 {
            return Err(reject(format!(
                "Cannot remove {}: only {current} in stock",
                -adjustment
            )));
        }
        stock.insert(product_id, quantity);
        Ok(StockRecord {
            product_id,
            quantity,
        })
    }
}
