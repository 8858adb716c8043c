use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// Identifier assigned by the products resource.
pub type ProductId = u64;

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

// ---------------------------------------------------------------------------
// Product — a server-confirmed catalog entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub image_url: String,
    pub name: String,
    pub count: u32,
    pub size: Size,
    pub weight: String,
}

impl Product {
    /// Overlay edited form fields on this product, keeping its `id`.
    pub fn with_changes(&self, changes: NewProduct) -> Product {
        Product {
            id: self.id,
            image_url: changes.image_url,
            name: changes.name,
            count: changes.count,
            size: changes.size,
            weight: changes.weight,
        }
    }
}

// ---------------------------------------------------------------------------
// NewProduct — draft sent on create, no id yet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub image_url: String,
    pub name: String,
    pub count: u32,
    pub size: Size,
    pub weight: String,
}

impl NewProduct {
    /// Check the form rules a draft must satisfy before it is sent.
    ///
    /// `count` cannot go negative by construction; the dimensions are
    /// floats and are checked here.
    pub fn validate(&self) -> Result<()> {
        if self.image_url.is_empty() {
            return Err(CatalogError::InvalidArgument("image URL is required".into()));
        }
        if self.name.is_empty() {
            return Err(CatalogError::InvalidArgument("product name is required".into()));
        }
        if self.weight.is_empty() {
            return Err(CatalogError::InvalidArgument("weight is required".into()));
        }
        for (field, value) in [("width", self.size.width), ("height", self.size.height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CatalogError::InvalidArgument(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl From<&Product> for NewProduct {
    fn from(product: &Product) -> Self {
        Self {
            image_url: product.image_url.clone(),
            name: product.name.clone(),
            count: product.count,
            size: product.size,
            weight: product.weight.clone(),
        }
    }
}
