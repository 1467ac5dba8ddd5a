//! Cart line types
//!
//! A cart is a list of [`CartLine`]s persisted client-side until removed or
//! consumed by checkout. Lines are a tagged union: single variants carry
//! cached display fields so checkout needs no catalog requery for them;
//! bundle lines carry only references and are resolved at order time.

use crate::models::{BundleConfig, VariantDetail};
use serde::{Deserialize, Serialize};

/// A slot filled by the customer, captured when the selection was made
///
/// `reference` is either a variant id or the parent item's id depending on
/// which catalog surface produced the selection; the stored line does not
/// record which. Resolution happens at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotChoice {
    pub slot_index: u32,
    pub reference: String,
}

/// One line of the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartLine {
    /// A single variant with cached display fields
    Single {
        line_id: String,
        item_id: String,
        variant_id: String,
        name: String,
        brand: String,
        image: String,
        size_label: String,
        /// Unit price in minor currency units, cached at add time
        unit_price: i64,
        quantity: u32,
    },
    /// A predefined bundle; slot contents live in the configuration
    FixedBundle {
        line_id: String,
        config_id: String,
        quantity: u32,
    },
    /// A customer-composed bundle with captured slot choices
    CustomBundle {
        line_id: String,
        config_id: String,
        choices: Vec<SlotChoice>,
        quantity: u32,
    },
}

/// Coalescing key for cart lines
///
/// Single lines merge on `(item, variant)`. Bundle lines only merge on an
/// exact repeat of the same line id; two separately added bundles are
/// distinct instances even when their contents are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineIdentity {
    Single { item_id: String, variant_id: String },
    Bundle { line_id: String },
}

impl CartLine {
    /// Create a single-variant line, caching the display fields
    pub fn single(detail: &VariantDetail, quantity: u32) -> Self {
        Self::Single {
            line_id: uuid::Uuid::new_v4().to_string(),
            item_id: detail.item.id.clone(),
            variant_id: detail.variant.id.clone(),
            name: detail.item.name.clone(),
            brand: detail.item.brand.clone(),
            image: detail.item.image.clone(),
            size_label: detail.variant.size_label.clone(),
            unit_price: detail.variant.price,
            quantity,
        }
    }

    /// Create a predefined-bundle line
    pub fn fixed_bundle(config: &BundleConfig, quantity: u32) -> Self {
        Self::FixedBundle {
            line_id: uuid::Uuid::new_v4().to_string(),
            config_id: config.id.clone(),
            quantity,
        }
    }

    /// Create a custom-bundle line from captured slot choices
    pub fn custom_bundle(config_id: impl Into<String>, choices: Vec<SlotChoice>, quantity: u32) -> Self {
        Self::CustomBundle {
            line_id: uuid::Uuid::new_v4().to_string(),
            config_id: config_id.into(),
            choices,
            quantity,
        }
    }

    /// The client-generated id of this line
    pub fn line_id(&self) -> &str {
        match self {
            Self::Single { line_id, .. }
            | Self::FixedBundle { line_id, .. }
            | Self::CustomBundle { line_id, .. } => line_id,
        }
    }

    pub fn quantity(&self) -> u32 {
        match self {
            Self::Single { quantity, .. }
            | Self::FixedBundle { quantity, .. }
            | Self::CustomBundle { quantity, .. } => *quantity,
        }
    }

    pub fn set_quantity(&mut self, value: u32) {
        match self {
            Self::Single { quantity, .. }
            | Self::FixedBundle { quantity, .. }
            | Self::CustomBundle { quantity, .. } => *quantity = value,
        }
    }

    pub fn add_quantity(&mut self, amount: u32) {
        self.set_quantity(self.quantity().saturating_add(amount));
    }

    /// The coalescing identity of this line
    pub fn identity(&self) -> LineIdentity {
        match self {
            Self::Single {
                item_id, variant_id, ..
            } => LineIdentity::Single {
                item_id: item_id.clone(),
                variant_id: variant_id.clone(),
            },
            Self::FixedBundle { line_id, .. } | Self::CustomBundle { line_id, .. } => {
                LineIdentity::Bundle {
                    line_id: line_id.clone(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, ItemVariant};

    fn detail(item_id: &str, variant_id: &str) -> VariantDetail {
        VariantDetail {
            variant: ItemVariant {
                id: variant_id.to_string(),
                item: item_id.to_string(),
                volume_ml: 5,
                size_label: "5 ml".to_string(),
                price: 1200,
                is_active: true,
            },
            item: Item {
                id: item_id.to_string(),
                name: "Vetiver Extraordinaire".to_string(),
                brand: "Maison Test".to_string(),
                image: "vetiver.webp".to_string(),
                is_active: true,
            },
        }
    }

    #[test]
    fn test_single_identity_ignores_line_id() {
        let a = CartLine::single(&detail("item-1", "var-1"), 1);
        let b = CartLine::single(&detail("item-1", "var-1"), 2);
        assert_ne!(a.line_id(), b.line_id());
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn test_bundle_identity_is_line_scoped() {
        let config = BundleConfig {
            id: "set-3".to_string(),
            name: "Discovery Trio".to_string(),
            total_slots: 3,
            volume_ml: 5,
            base_price: 4500,
            is_customizable: true,
            is_active: true,
        };
        let a = CartLine::fixed_bundle(&config, 1);
        let b = CartLine::fixed_bundle(&config, 1);
        assert_ne!(a.identity(), b.identity());
        assert_eq!(a.identity(), a.clone().identity());
    }

    #[test]
    fn test_serde_roundtrip() {
        let line = CartLine::custom_bundle(
            "set-3",
            vec![
                SlotChoice {
                    slot_index: 0,
                    reference: "var-9".to_string(),
                },
                SlotChoice {
                    slot_index: 1,
                    reference: "item-4".to_string(),
                },
            ],
            2,
        );
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"type\":\"CUSTOM_BUNDLE\""));
        let back: CartLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back, line);
    }

    #[test]
    fn test_quantity_mutators() {
        let mut line = CartLine::single(&detail("item-1", "var-1"), 1);
        line.add_quantity(2);
        assert_eq!(line.quantity(), 3);
        line.set_quantity(7);
        assert_eq!(line.quantity(), 7);
    }
}
