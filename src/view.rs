//! Derived orderings of the product list.
//!
//! Sorting never touches the store: it copies the current collection and
//! orders the copy. Both orderings are stable, so products with equal keys
//! keep their collection order. Names are ordered with the Unicode
//! collation rules of the root locale, so accented Latin letters sort with
//! their base letter and Ukrainian `ґ`, `є`, `і`, `ї` sit in alphabet order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending by name, using locale collation.
    #[default]
    Name,
    /// Descending by count.
    Count,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Count => "count",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "count" => Ok(SortKey::Count),
            other => Err(CatalogError::InvalidArgument(format!(
                "unknown sort key {other:?}, expected \"name\" or \"count\""
            ))),
        }
    }
}

/// Build the collator used for product names.
///
/// Returns `None` only if the bundled collation data cannot be loaded.
fn name_collator() -> Option<CollatorBorrowed<'static>> {
    match Collator::try_new(Default::default(), CollatorOptions::default()) {
        Ok(collator) => Some(collator),
        Err(err) => {
            tracing::warn!(error = %err, "collation data unavailable; ordering names by code point");
            None
        }
    }
}

fn compare_with(collator: Option<&CollatorBorrowed<'static>>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    }
}

/// Compare display names the way a user reads an alphabetical list.
///
/// Accents and case only break ties between otherwise equal names, and
/// lowercase sorts before uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    compare_with(name_collator().as_ref(), a, b)
}

/// Return a copy of `products` ordered by `key`.
pub fn sort_products(products: &[Product], key: SortKey) -> Vec<Product> {
    let mut sorted = products.to_vec();
    match key {
        SortKey::Name => {
            let collator = name_collator();
            sorted.sort_by(|a, b| compare_with(collator.as_ref(), &a.name, &b.name));
        }
        SortKey::Count => sorted.sort_by(|a, b| b.count.cmp(&a.count)),
    }
    sorted
}
