//! Product catalog SDK for Rust.
//!
//! Provides client-side stores over the catalog REST API: a product store
//! (list, create, update, delete) and a comment store (per-product fetch,
//! create). Stores only ever hold what the server has confirmed, and
//! expose their fetch lifecycle as a [`Status`].
//!
//! # Quick start
//!
//! ```no_run
//! use catalog_sdk::{Catalog, SortKey};
//!
//! # async fn example() -> catalog_sdk::Result<()> {
//! let catalog = Catalog::builder().build()?;
//!
//! catalog.products().fetch_all().await?;
//! let by_count = catalog.products().sorted(SortKey::Count);
//!
//! if let Some(first) = by_count.first() {
//!     catalog.comments().fetch_by_product(first.id).await?;
//!     catalog.comments().submit(first.id, "Arrived in one piece").await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod resource;
pub mod store;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use models::{Comment, CommentId, NewComment, NewProduct, Product, ProductId, Size};
pub use resource::{CommentResource, HttpCommentResource, HttpProductResource, ProductResource};
pub use store::{CommentStore, ProductStore, Snapshot, Status};
pub use view::{sort_products, SortKey};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// CatalogBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Catalog`].
///
/// Use [`Catalog::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CatalogBuilder::build).
pub struct CatalogBuilder {
    config: CatalogConfig,
    clock: Arc<dyn Clock>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self {
            config: CatalogConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl CatalogBuilder {
    /// Replace the whole configuration, e.g. with [`CatalogConfig::from_env`].
    pub fn config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the URL of the `products` collection.
    pub fn products_url(mut self, url: impl Into<String>) -> Self {
        self.config.products_url = url.into();
        self
    }

    /// Set the URL of the `comments` collection.
    pub fn comments_url(mut self, url: impl Into<String>) -> Self {
        self.config.comments_url = url.into();
        self
    }

    /// Set the HTTP request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the clock used to date submitted comments.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Build the catalog. No request is made until a store is used.
    pub fn build(self) -> Result<Catalog> {
        let client = resource::build_client(self.config.timeout)?;
        let products = ProductStore::new(HttpProductResource::new(
            client.clone(),
            &self.config.products_url,
        ));
        let comments = CommentStore::with_shared_clock(
            HttpCommentResource::new(client, &self.config.comments_url),
            self.clock,
        );
        tracing::debug!(
            products_url = %self.config.products_url,
            comments_url = %self.config.comments_url,
            "catalog built"
        );
        Ok(Catalog { products, comments })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Owns one product store and one comment store talking to the HTTP API.
///
/// The stores are independent of each other. Hand them to whatever needs
/// them; cloning a store shares its state.
#[derive(Clone)]
pub struct Catalog {
    products: ProductStore,
    comments: CommentStore,
}

impl Catalog {
    /// Create a new builder for configuring the catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Access the product store.
    pub fn products(&self) -> &ProductStore {
        &self.products
    }

    /// Access the comment store.
    pub fn comments(&self) -> &CommentStore {
        &self.comments
    }

    /// Split into the two stores.
    pub fn into_stores(self) -> (ProductStore, CommentStore) {
        (self.products, self.comments)
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Catalog(products={} [{}], comments={} [{}])",
            self.products.resource().url(),
            self.products.status(),
            self.comments.resource().url(),
            self.comments.status()
        )
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("products", &self.products)
            .field("comments", &self.comments)
            .finish()
    }
}
