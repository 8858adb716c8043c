//! Store for the `comments` collection.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::models::{Comment, NewComment, ProductId};
use crate::resource::{CommentResource, HttpCommentResource};
use crate::store::{lock, Snapshot, Status, StoreState};

// ---------------------------------------------------------------------------
// CommentStore
// ---------------------------------------------------------------------------

/// Server-confirmed comments plus their fetch lifecycle.
///
/// A fetch for one product replaces the entire in-memory collection, so
/// comments loaded earlier for another product are discarded. Use
/// [`select_by_product`](Self::select_by_product) to view one product's
/// comments out of whatever is currently held.
pub struct CommentStore<R = HttpCommentResource> {
    resource: Arc<R>,
    clock: Arc<dyn Clock>,
    state: Arc<Mutex<StoreState<Comment>>>,
}

impl<R> Clone for CommentStore<R> {
    fn clone(&self) -> Self {
        Self {
            resource: Arc::clone(&self.resource),
            clock: Arc::clone(&self.clock),
            state: Arc::clone(&self.state),
        }
    }
}

impl<R: CommentResource> CommentStore<R> {
    /// Create an empty, `idle` store dated by the system clock.
    pub fn new(resource: R) -> Self {
        Self::with_clock(resource, SystemClock)
    }

    pub fn with_clock(resource: R, clock: impl Clock + 'static) -> Self {
        Self::with_shared_clock(resource, Arc::new(clock))
    }

    pub fn with_shared_clock(resource: R, clock: Arc<dyn Clock>) -> Self {
        Self {
            resource: Arc::new(resource),
            clock,
            state: Arc::new(Mutex::new(StoreState::default())),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    // -- Commands ----------------------------------------------------------

    /// Load the comments of `product_id` if nothing has been requested yet.
    ///
    /// Only an `idle` store issues the read. The response replaces the
    /// whole collection, not just the entries of `product_id`.
    pub async fn fetch_by_product(&self, product_id: ProductId) -> Result<()> {
        let started = lock(&self.state).begin_initial_fetch();
        if !started {
            tracing::debug!(product_id, status = %self.status(), "comments already requested; skipping fetch");
            return Ok(());
        }
        self.load(product_id).await
    }

    /// Re-read the comments of `product_id` regardless of the current status.
    pub async fn refresh_for_product(&self, product_id: ProductId) -> Result<()> {
        lock(&self.state).status = Status::Loading;
        self.load(product_id).await
    }

    async fn load(&self, product_id: ProductId) -> Result<()> {
        match self.resource.list_by_product(product_id).await {
            Ok(comments) => {
                tracing::debug!(product_id, count = comments.len(), "comments loaded");
                lock(&self.state).fetch_succeeded(comments);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(product_id, error = %err, "comment fetch failed");
                lock(&self.state).record_failure(&err);
                Err(err)
            }
        }
    }

    /// Persist a dated draft and append the returned comment.
    pub async fn create(&self, draft: NewComment) -> Result<Comment> {
        draft.validate()?;
        match self.resource.create(&draft).await {
            Ok(comment) => {
                tracing::debug!(id = comment.id, product_id = comment.product_id, "comment created");
                lock(&self.state).items.push(comment.clone());
                Ok(comment)
            }
            Err(err) => {
                tracing::warn!(product_id = draft.product_id, error = %err, "comment create failed");
                lock(&self.state).record_failure(&err);
                Err(err)
            }
        }
    }

    /// Stamp `description` with the store's clock and create it.
    pub async fn submit(
        &self,
        product_id: ProductId,
        description: impl Into<String>,
    ) -> Result<Comment> {
        let draft = NewComment::stamped(product_id, description, self.clock.as_ref());
        self.create(draft).await
    }
}

impl<R> CommentStore<R> {
    // -- Queries -----------------------------------------------------------

    pub fn comments(&self) -> Vec<Comment> {
        lock(&self.state).items.clone()
    }

    /// Comments held for `product_id`, in collection order. No request is made.
    pub fn select_by_product(&self, product_id: ProductId) -> Vec<Comment> {
        lock(&self.state)
            .items
            .iter()
            .filter(|c| c.product_id == product_id)
            .cloned()
            .collect()
    }

    pub fn status(&self) -> Status {
        lock(&self.state).status
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn snapshot(&self) -> Snapshot<Comment> {
        lock(&self.state).snapshot()
    }
}

impl<R> fmt::Debug for CommentStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("CommentStore")
            .field("status", &state.status)
            .field("comments", &state.items.len())
            .field("error", &state.error)
            .finish()
    }
}
