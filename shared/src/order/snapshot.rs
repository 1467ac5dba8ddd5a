//! Denormalized order item snapshots
//!
//! A snapshot is an immutable copy of display data embedded in a persisted
//! order item. The invariant: the snapshot alone must be sufficient to
//! render the order, independent of later catalog state. Catalog rows may
//! be renamed, repriced or deleted afterwards without affecting history.

use serde::{Deserialize, Serialize};

/// Display snapshot embedded in a persisted order item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemSnapshot {
    /// A single variant, copied from the cart line's cached fields
    Single {
        name: String,
        brand: String,
        image: String,
        size_label: String,
    },
    /// A bundle with one entry per slot, ascending by slot index
    Bundle {
        name: String,
        volume_ml: u32,
        slots: Vec<SlotSnapshot>,
    },
}

/// Per-slot resolution outcome inside a bundle snapshot
///
/// A sum type rather than nullable fields: rendering code has to handle the
/// unresolved arm explicitly, so a historical order shows "slot 3: unknown
/// item" instead of silently losing the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotSnapshot {
    /// The reference matched a catalog variant
    Resolved {
        slot_index: u32,
        variant_id: String,
        name: String,
        brand: String,
        image: String,
        size_label: String,
    },
    /// The reference matched nothing; the raw reference is retained
    Unresolved { slot_index: u32, reference: String },
}

impl SlotSnapshot {
    pub fn slot_index(&self) -> u32 {
        match self {
            Self::Resolved { slot_index, .. } | Self::Unresolved { slot_index, .. } => *slot_index,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}
