//! Persisted order types
//!
//! Orders and their items are created exactly once at checkout and never
//! updated or deleted by this subsystem. Totals are computed at creation
//! and never recomputed.

use super::snapshot::ItemSnapshot;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Kind of a persisted order item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderItemKind {
    Single,
    FixedBundle,
    CustomBundle,
}

/// One persisted order item with its immutable display snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub kind: OrderItemKind,
    /// Variant reference for single items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    /// Bundle configuration reference for bundle items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_id: Option<String>,
    pub quantity: u32,
    /// Unit price in minor currency units; for bundles this is always the
    /// configuration's flat base price
    pub unit_price: i64,
    /// `unit_price * quantity` in minor currency units
    pub line_total: i64,
    pub snapshot: ItemSnapshot,
}

/// Customer contact details captured with the order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContactInfo {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(custom(function = validate_phone))]
    pub phone: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 3, message = "postal code is too short"))]
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Accepts digits with common separators, 6 to 15 digits total
fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let chars_ok = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    if (6..=15).contains(&digits) && chars_ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("invalid phone number".into());
        Err(err)
    }
}

/// A persisted order header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub contact: ContactInfo,
    /// Selected shipping method id
    pub shipping_method: String,
    /// Sum of line totals in minor currency units
    pub subtotal: i64,
    /// Flat shipping fee in minor currency units
    pub shipping_fee: i64,
    /// `subtotal + shipping_fee`
    pub total: i64,
    /// Tax portion already included in `total`; display only, never added
    pub tax_included: i64,
    /// Creation timestamp, UTC epoch milliseconds
    pub created_at: i64,
}
