//! Store for the `products` collection.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::models::{NewProduct, Product, ProductId};
use crate::resource::{HttpProductResource, ProductResource};
use crate::store::{lock, Snapshot, Status, StoreState};
use crate::view::{sort_products, SortKey};

// ---------------------------------------------------------------------------
// ProductStore
// ---------------------------------------------------------------------------

/// Server-confirmed list of products plus its fetch lifecycle.
///
/// Cloning yields another handle onto the same state. Operations take
/// `&self`, so several may be in flight together; each commits when its
/// response arrives. The status field gates the initial fetch only and
/// does not serialize anything.
pub struct ProductStore<R = HttpProductResource> {
    resource: Arc<R>,
    state: Arc<Mutex<StoreState<Product>>>,
}

impl<R> Clone for ProductStore<R> {
    fn clone(&self) -> Self {
        Self {
            resource: Arc::clone(&self.resource),
            state: Arc::clone(&self.state),
        }
    }
}

impl<R: ProductResource> ProductStore<R> {
    /// Create an empty, `idle` store backed by `resource`.
    pub fn new(resource: R) -> Self {
        Self {
            resource: Arc::new(resource),
            state: Arc::new(Mutex::new(StoreState::default())),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    // -- Commands ----------------------------------------------------------

    /// Load the whole collection if nothing has been requested yet.
    ///
    /// Only an `idle` store issues the read; in any other state this
    /// returns `Ok(())` without touching the network. On success the
    /// collection is replaced wholesale; on failure it is left as it was.
    pub async fn fetch_all(&self) -> Result<()> {
        let started = lock(&self.state).begin_initial_fetch();
        if !started {
            tracing::debug!(status = %self.status(), "products already requested; skipping fetch");
            return Ok(());
        }
        self.load().await
    }

    /// Re-read the whole collection regardless of the current status.
    pub async fn refresh(&self) -> Result<()> {
        lock(&self.state).status = Status::Loading;
        self.load().await
    }

    async fn load(&self) -> Result<()> {
        match self.resource.list().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "products loaded");
                lock(&self.state).fetch_succeeded(products);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "product fetch failed");
                lock(&self.state).record_failure(&err);
                Err(err)
            }
        }
    }

    /// Persist a draft and append the returned product to the end.
    ///
    /// A draft that fails validation is rejected before any request and
    /// leaves the store untouched.
    pub async fn create(&self, draft: NewProduct) -> Result<Product> {
        draft.validate()?;
        match self.resource.create(&draft).await {
            Ok(product) => {
                tracing::debug!(id = product.id, "product created");
                lock(&self.state).items.push(product.clone());
                Ok(product)
            }
            Err(err) => {
                tracing::warn!(error = %err, "product create failed");
                lock(&self.state).record_failure(&err);
                Err(err)
            }
        }
    }

    /// Send `product` as a full replacement and swap it in place.
    ///
    /// The entry is located by the returned product's `id`. When no entry
    /// matches, the collection is left unchanged.
    pub async fn update(&self, product: Product) -> Result<Product> {
        NewProduct::from(&product).validate()?;
        match self.resource.update(&product).await {
            Ok(updated) => {
                let mut state = lock(&self.state);
                match state.items.iter_mut().find(|p| p.id == updated.id) {
                    Some(slot) => *slot = updated.clone(),
                    None => tracing::debug!(id = updated.id, "updated product not in collection"),
                }
                Ok(updated)
            }
            Err(err) => {
                tracing::warn!(id = product.id, error = %err, "product update failed");
                lock(&self.state).record_failure(&err);
                Err(err)
            }
        }
    }

    /// Delete by `id` and drop every matching entry once confirmed.
    pub async fn delete(&self, id: ProductId) -> Result<()> {
        match self.resource.delete(id).await {
            Ok(()) => {
                tracing::debug!(id, "product deleted");
                lock(&self.state).items.retain(|p| p.id != id);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "product delete failed");
                lock(&self.state).record_failure(&err);
                Err(err)
            }
        }
    }
}

impl<R> ProductStore<R> {
    // -- Queries -----------------------------------------------------------

    pub fn products(&self) -> Vec<Product> {
        lock(&self.state).items.clone()
    }

    pub fn status(&self) -> Status {
        lock(&self.state).status
    }

    /// Message of the last failure, if any operation has failed.
    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn snapshot(&self) -> Snapshot<Product> {
        lock(&self.state).snapshot()
    }

    /// Look up a product in the current collection.
    pub fn find(&self, id: ProductId) -> Option<Product> {
        lock(&self.state).items.iter().find(|p| p.id == id).cloned()
    }

    /// The current collection ordered by `key`.
    pub fn sorted(&self, key: SortKey) -> Vec<Product> {
        sort_products(&lock(&self.state).items, key)
    }
}

impl<R> fmt::Debug for ProductStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("ProductStore")
            .field("status", &state.status)
            .field("products", &state.items.len())
            .field("error", &state.error)
            .finish()
    }
}
