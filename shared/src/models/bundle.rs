//! Bundle configuration models

use serde::{Deserialize, Serialize};

/// Bundle template defining a fixed slot count, per-slot sample size and a
/// flat price
///
/// Owned by catalog managers; read-only for the storefront. The flat
/// `base_price` is independent of whichever items end up in the slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleConfig {
    pub id: String,
    pub name: String,
    /// Number of slots to fill; always >= 1
    pub total_slots: u32,
    /// Sample size of every slot in millilitres
    pub volume_ml: u32,
    /// Flat price in minor currency units, independent of slot contents
    pub base_price: i64,
    /// Whether customers may fill the slots themselves
    pub is_customizable: bool,
    pub is_active: bool,
}

/// Fixed slot association of a predefined bundle
///
/// Catalog managers pin a variant to each slot; resolved at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleSlotLink {
    pub slot_index: u32,
    /// Variant reference (String ID)
    pub variant: String,
}
