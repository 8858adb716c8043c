use serde::{Deserialize, Serialize};

use crate::clock::{format_comment_date, Clock};
use crate::error::{CatalogError, Result};
use crate::models::ProductId;

/// Identifier assigned by the comments resource.
pub type CommentId = u64;

// ---------------------------------------------------------------------------
// Comment — a persisted comment attached to a product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub product_id: ProductId,
    pub description: String,
    pub date: String,
}

// ---------------------------------------------------------------------------
// NewComment — draft with a client-stamped date
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub product_id: ProductId,
    pub description: String,
    pub date: String,
}

impl NewComment {
    /// Build a draft dated with the current time of `clock`.
    pub fn stamped(product_id: ProductId, description: impl Into<String>, clock: &dyn Clock) -> Self {
        Self {
            product_id,
            description: description.into(),
            date: format_comment_date(&clock.now()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.description.is_empty() {
            return Err(CatalogError::InvalidArgument("comment text is required".into()));
        }
        Ok(())
    }
}
