//! Minimal terminal session against a running Remote Store.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example terminal
//! ```

use std::sync::Arc;

use vulcan_terminal::{Debouncer, PeriodicTask, Session, SessionConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = SessionConfig::default();
    let session = Arc::new(Session::connect(config.clone()));

    session.refresh_catalog().await?;
    session.refresh_categories().await?;

    // background stock-mirror refresh; overlapping runs are skipped
    let refresher = {
        let session = session.clone();
        PeriodicTask::spawn("catalog-refresh", config.catalog_refresh(), move || {
            let session = session.clone();
            async move {
                if let Err(err) = session.refresh_catalog().await {
                    tracing::warn!(%err, "catalog refresh failed");
                }
            }
        })
    };

    let dashboard = session.dashboard().await?;
    println!(
        "{} products, {} low on stock, {} revenue today",
        dashboard.product_count, dashboard.low_stock_count, dashboard.today_revenue
    );

    // search-as-you-type: only the last keystroke in the burst executes
    let search = Debouncer::new(config.search_debounce());
    for query in ["2", "20", "205"] {
        let session = session.clone();
        search.submit(async move {
            let hits = session.search_products(query);
            println!("{} products match '{query}'", hits.len());
        });
    }
    tokio::time::sleep(config.search_debounce() * 2).await;

    refresher.stop().await;
    Ok(())
}
