//! Shared types for the Essenza storefront
//!
//! Common types used across the workspace: catalog read models, cart line
//! types, persisted order and snapshot types, and the coded error system.

pub mod cart;
pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use cart::{CartLine, LineIdentity, SlotChoice};
pub use error::{AppError, AppResult, ErrorCode};
