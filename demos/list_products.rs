//! List the catalog and the comments of its first product.
//!
//! ```text
//! CATALOG_PRODUCTS_URL=http://localhost:3001/products \
//! CATALOG_COMMENTS_URL=http://localhost:5001/comments \
//! RUST_LOG=catalog_sdk=debug cargo run --example list_products -- count
//! ```

use catalog_sdk::{Catalog, CatalogConfig, SortKey};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> catalog_sdk::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let key: SortKey = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => SortKey::default(),
    };

    let catalog = Catalog::builder().config(CatalogConfig::from_env()?).build()?;
    tracing::info!("{catalog}");

    let products = catalog.products();
    if let Err(err) = products.fetch_all().await {
        tracing::error!(error = %err, "could not load products");
        return Err(err);
    }

    let sorted = products.sorted(key);
    tracing::info!(count = sorted.len(), sort = %key, "products loaded");
    for p in &sorted {
        tracing::info!(
            id = p.id,
            name = %p.name,
            count = p.count,
            size = %format!("{}x{}", p.size.width, p.size.height),
            weight = %p.weight,
            "product"
        );
    }

    if let Some(first) = sorted.first() {
        catalog.comments().fetch_by_product(first.id).await?;
        for c in catalog.comments().select_by_product(first.id) {
            tracing::info!(product = %first.name, date = %c.date, "{}", c.description);
        }
    }

    Ok(())
}
