//! Client-side stores mirroring the remote collections.
//!
//! A store holds only server-confirmed entities. Every mutation is applied
//! after its request succeeds, in the order responses arrive; a failed
//! request leaves the collection as it was and records the failure.

pub mod comments;
pub mod products;

pub use comments::CommentStore;
pub use products::ProductStore;

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle of the most recent bulk fetch of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Succeeded => "succeeded",
            Status::Failed => "failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Point-in-time copy of a store, suitable for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub items: Vec<T>,
    pub status: Status,
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// StoreState
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub(crate) struct StoreState<T> {
    pub(crate) items: Vec<T>,
    pub(crate) status: Status,
    pub(crate) error: Option<String>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: Status::Idle,
            error: None,
        }
    }
}

impl<T: Clone> StoreState<T> {
    /// Move from `idle` to `loading`. Returns `false` for any other state.
    pub(crate) fn begin_initial_fetch(&mut self) -> bool {
        if self.status == Status::Idle {
            self.status = Status::Loading;
            true
        } else {
            false
        }
    }

    pub(crate) fn fetch_succeeded(&mut self, items: Vec<T>) {
        self.status = Status::Succeeded;
        self.items = items;
    }

    pub(crate) fn record_failure(&mut self, err: &CatalogError) {
        self.status = Status::Failed;
        self.error = Some(err.failure_message());
    }

    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            items: self.items.clone(),
            status: self.status,
            error: self.error.clone(),
        }
    }
}

/// Lock store state, recovering it if a panicking thread poisoned the lock.
pub(crate) fn lock<T>(state: &Mutex<StoreState<T>>) -> MutexGuard<'_, StoreState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
