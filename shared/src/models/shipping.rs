//! Shipping method table

use serde::{Deserialize, Serialize};

/// A shipping method with a flat fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub id: String,
    pub label: String,
    /// Flat fee in minor currency units
    pub fee: i64,
}

/// The static shipping method table
///
/// Small and fixed; a carrier integration would replace this wholesale.
pub fn shipping_methods() -> Vec<ShippingMethod> {
    vec![
        ShippingMethod {
            id: "standard".to_string(),
            label: "Standard (3-5 days)".to_string(),
            fee: 499,
        },
        ShippingMethod {
            id: "express".to_string(),
            label: "Express (24-48h)".to_string(),
            fee: 999,
        },
        ShippingMethod {
            id: "pickup".to_string(),
            label: "Store pickup".to_string(),
            fee: 0,
        },
    ]
}

/// Look up a shipping method by id
pub fn shipping_method(id: &str) -> Option<ShippingMethod> {
    shipping_methods().into_iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_method_lookup() {
        let method = shipping_method("express").unwrap();
        assert_eq!(method.fee, 999);
        assert!(shipping_method("drone").is_none());
    }
}
