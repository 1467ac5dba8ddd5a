//! Catalog item read models
//!
//! These are lookup results from the catalog collaborator; the storefront
//! never mutates them. Catalog administration is a separate surface.

use serde::{Deserialize, Serialize};

/// Catalog item (brand-level entry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub is_active: bool,
}

/// A purchasable size/price instance of an item (elsewhere called a SKU)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemVariant {
    pub id: String,
    /// Parent item reference (String ID)
    pub item: String,
    /// Sample size in millilitres
    pub volume_ml: u32,
    /// Display label for the size, e.g. "5 ml"
    pub size_label: String,
    /// Price in minor currency units
    pub price: i64,
    pub is_active: bool,
}

/// A variant joined with its parent item for display fields
///
/// The shape the catalog lookup collaborator returns for batched lookups;
/// snapshots are denormalized from this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDetail {
    pub variant: ItemVariant,
    pub item: Item,
}
