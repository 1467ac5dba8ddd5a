//! Persisted order module
//!
//! This module provides the append-only order shapes:
//! - Headers: totals fixed at creation time
//! - Items: one row per cart line with a denormalized snapshot
//! - Snapshots: self-contained display data, immune to catalog drift

pub mod snapshot;
pub mod types;

// Re-exports
pub use snapshot::{ItemSnapshot, SlotSnapshot};
pub use types::{ContactInfo, Order, OrderItem, OrderItemKind};
