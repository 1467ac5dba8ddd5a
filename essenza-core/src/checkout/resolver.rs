//! Cart line resolution
//!
//! Runs once per checkout, after submission is triggered, expanding each
//! cart line into a persisted order item with a denormalized snapshot.
//!
//! Custom bundles are the hard case: a stored slot choice carries a raw
//! reference that is either a variant id or the parent item's id, depending
//! on which catalog surface produced the selection, and the two cannot be
//! told apart from the id's shape. Both interpretations are tried with one
//! batched lookup each; per reference the variant-id hit wins, then the
//! item-id hit, else the slot is kept as unresolved with its raw reference.
//!
//! Degradation rules:
//! - a fixed-bundle slot whose pinned variant is gone is dropped with a
//!   warning; the order is still created with a partial snapshot
//! - a custom-bundle slot that matches nothing is RETAINED as unresolved,
//!   so the historical order still shows the slot
//! - a lookup transport failure degrades to unresolved/dropped slots
//! - a missing bundle configuration is fatal: without it there is no price

use crate::catalog::{Catalog, CatalogError};
use futures::stream::{self, StreamExt, TryStreamExt};
use shared::cart::CartLine;
use shared::models::{BundleConfig, VariantDetail};
use shared::order::{ItemSnapshot, OrderItem, OrderItemKind, SlotSnapshot};
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

/// Fatal resolution failure; aborts the submission
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("bundle configuration {0} not found")]
    ConfigMissing(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Expands cart lines into order items against a catalog collaborator
pub struct LineResolver<'a> {
    catalog: &'a dyn Catalog,
    concurrency: usize,
}

impl<'a> LineResolver<'a> {
    pub fn new(catalog: &'a dyn Catalog, concurrency: usize) -> Self {
        Self {
            catalog,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolve every cart line, preserving cart order
    ///
    /// Lines share no mutable state and resolve concurrently, bounded to
    /// avoid overwhelming the catalog collaborator.
    pub async fn resolve_cart(
        &self,
        order_id: &str,
        lines: &[CartLine],
    ) -> Result<Vec<OrderItem>, ResolveError> {
        stream::iter(lines.iter().map(|line| self.resolve_line(order_id, line)))
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    /// Resolve a single cart line into an order item
    pub async fn resolve_line(
        &self,
        order_id: &str,
        line: &CartLine,
    ) -> Result<OrderItem, ResolveError> {
        match line {
            CartLine::Single {
                variant_id,
                name,
                brand,
                image,
                size_label,
                unit_price,
                quantity,
                ..
            } => Ok(OrderItem {
                id: uuid::Uuid::new_v4().to_string(),
                order_id: order_id.to_string(),
                kind: OrderItemKind::Single,
                variant_id: Some(variant_id.clone()),
                config_id: None,
                quantity: *quantity,
                unit_price: *unit_price,
                line_total: unit_price * *quantity as i64,
                // Display fields were cached on the line at add time; no
                // catalog requery for single variants
                snapshot: ItemSnapshot::Single {
                    name: name.clone(),
                    brand: brand.clone(),
                    image: image.clone(),
                    size_label: size_label.clone(),
                },
            }),
            CartLine::FixedBundle {
                config_id, quantity, ..
            } => self.resolve_fixed(order_id, config_id, *quantity).await,
            CartLine::CustomBundle {
                config_id,
                choices,
                quantity,
                ..
            } => {
                self.resolve_custom(order_id, config_id, choices, *quantity)
                    .await
            }
        }
    }

    async fn resolve_fixed(
        &self,
        order_id: &str,
        config_id: &str,
        quantity: u32,
    ) -> Result<OrderItem, ResolveError> {
        let (config, mut links) = self
            .catalog
            .bundle_with_links(config_id)
            .await?
            .ok_or_else(|| ResolveError::ConfigMissing(config_id.to_string()))?;
        links.sort_by_key(|link| link.slot_index);

        let ids: Vec<String> = links.iter().map(|link| link.variant.clone()).collect();
        let found = match self.catalog.variants_by_ids(&ids).await {
            Ok(details) => by_variant_id(details),
            Err(err) => {
                warn!(config = %config_id, error = %err, "variant lookup failed for fixed bundle");
                HashMap::new()
            }
        };

        let slots: Vec<SlotSnapshot> = links
            .iter()
            .filter_map(|link| match found.get(&link.variant) {
                Some(detail) => Some(resolved_slot(link.slot_index, detail)),
                None => {
                    warn!(
                        config = %config_id,
                        slot = link.slot_index,
                        variant = %link.variant,
                        "dropping fixed-bundle slot with unresolvable variant"
                    );
                    None
                }
            })
            .collect();

        Ok(bundle_item(
            order_id,
            OrderItemKind::FixedBundle,
            &config,
            slots,
            quantity,
        ))
    }

    async fn resolve_custom(
        &self,
        order_id: &str,
        config_id: &str,
        choices: &[shared::cart::SlotChoice],
        quantity: u32,
    ) -> Result<OrderItem, ResolveError> {
        let (config, _links) = self
            .catalog
            .bundle_with_links(config_id)
            .await?
            .ok_or_else(|| ResolveError::ConfigMissing(config_id.to_string()))?;

        let refs: Vec<String> = choices.iter().map(|c| c.reference.clone()).collect();

        // Both interpretations run against their own lookup table; neither
        // can be ruled out from the id alone.
        let (as_variants, as_items) = futures::join!(
            self.catalog.variants_by_ids(&refs),
            self.catalog.variants_for_items(&refs, config.volume_ml)
        );
        let variant_hits = match as_variants {
            Ok(details) => by_variant_id(details),
            Err(err) => {
                warn!(config = %config_id, error = %err, "variant-id lookup failed; slots degrade to unresolved");
                HashMap::new()
            }
        };
        let item_hits: HashMap<String, VariantDetail> = match as_items {
            Ok(details) => details
                .into_iter()
                .map(|d| (d.variant.item.clone(), d))
                .collect(),
            Err(err) => {
                warn!(config = %config_id, error = %err, "item-id lookup failed; slots degrade to unresolved");
                HashMap::new()
            }
        };

        let mut ordered = choices.to_vec();
        ordered.sort_by_key(|choice| choice.slot_index);

        let slots: Vec<SlotSnapshot> = ordered
            .iter()
            .map(|choice| {
                match variant_hits
                    .get(&choice.reference)
                    .or_else(|| item_hits.get(&choice.reference))
                {
                    Some(detail) => resolved_slot(choice.slot_index, detail),
                    None => {
                        warn!(
                            config = %config_id,
                            slot = choice.slot_index,
                            reference = %choice.reference,
                            "slot reference matched no catalog entry; kept as unresolved"
                        );
                        SlotSnapshot::Unresolved {
                            slot_index: choice.slot_index,
                            reference: choice.reference.clone(),
                        }
                    }
                }
            })
            .collect();

        Ok(bundle_item(
            order_id,
            OrderItemKind::CustomBundle,
            &config,
            slots,
            quantity,
        ))
    }
}

fn by_variant_id(details: Vec<VariantDetail>) -> HashMap<String, VariantDetail> {
    details
        .into_iter()
        .map(|d| (d.variant.id.clone(), d))
        .collect()
}

fn resolved_slot(slot_index: u32, detail: &VariantDetail) -> SlotSnapshot {
    SlotSnapshot::Resolved {
        slot_index,
        variant_id: detail.variant.id.clone(),
        name: detail.item.name.clone(),
        brand: detail.item.brand.clone(),
        image: detail.item.image.clone(),
        size_label: detail.variant.size_label.clone(),
    }
}

fn bundle_item(
    order_id: &str,
    kind: OrderItemKind,
    config: &BundleConfig,
    slots: Vec<SlotSnapshot>,
    quantity: u32,
) -> OrderItem {
    OrderItem {
        id: uuid::Uuid::new_v4().to_string(),
        order_id: order_id.to_string(),
        kind,
        variant_id: None,
        config_id: Some(config.id.clone()),
        quantity,
        // Flat bundle pricing: the configuration's base price, never a sum
        // of constituent variant prices
        unit_price: config.base_price,
        line_total: config.base_price * quantity as i64,
        snapshot: ItemSnapshot::Bundle {
            name: config.name.clone(),
            volume_ml: config.volume_ml,
            slots,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use async_trait::async_trait;
    use shared::cart::SlotChoice;
    use shared::models::{BundleSlotLink, Item, ItemVariant};

    fn seed_catalog() -> MemoryCatalog {
        let catalog = MemoryCatalog::new();
        for (item_id, name) in [
            ("item-a", "Ambre Nuit"),
            ("item-b", "Bois d'Hiver"),
            ("item-c", "Cuir Sauvage"),
        ] {
            catalog.insert_item(Item {
                id: item_id.to_string(),
                name: name.to_string(),
                brand: "Maison Test".to_string(),
                image: format!("{}.webp", item_id),
                is_active: true,
            });
            for volume in [5u32, 10] {
                catalog.insert_variant(ItemVariant {
                    id: format!("{}-{}ml", item_id, volume),
                    item: item_id.to_string(),
                    volume_ml: volume,
                    size_label: format!("{} ml", volume),
                    price: 1000 * volume as i64,
                    is_active: true,
                });
            }
        }
        catalog.insert_bundle(
            BundleConfig {
                id: "set-custom".to_string(),
                name: "Discovery Trio".to_string(),
                total_slots: 3,
                volume_ml: 5,
                base_price: 4500,
                is_customizable: true,
                is_active: true,
            },
            vec![],
        );
        catalog.insert_bundle(
            BundleConfig {
                id: "set-fixed".to_string(),
                name: "House Classics".to_string(),
                total_slots: 3,
                volume_ml: 5,
                base_price: 3900,
                is_customizable: false,
                is_active: true,
            },
            vec![
                BundleSlotLink {
                    slot_index: 0,
                    variant: "item-a-5ml".to_string(),
                },
                BundleSlotLink {
                    slot_index: 1,
                    variant: "item-b-5ml".to_string(),
                },
                BundleSlotLink {
                    slot_index: 2,
                    variant: "item-c-5ml".to_string(),
                },
            ],
        );
        catalog
    }

    fn choices(refs: &[(u32, &str)]) -> Vec<SlotChoice> {
        refs.iter()
            .map(|(slot_index, reference)| SlotChoice {
                slot_index: *slot_index,
                reference: reference.to_string(),
            })
            .collect()
    }

    fn custom_line(refs: &[(u32, &str)]) -> CartLine {
        CartLine::custom_bundle("set-custom", choices(refs), 1)
    }

    fn slot_variant_ids(item: &OrderItem) -> Vec<Option<String>> {
        match &item.snapshot {
            ItemSnapshot::Bundle { slots, .. } => slots
                .iter()
                .map(|s| match s {
                    SlotSnapshot::Resolved { variant_id, .. } => Some(variant_id.clone()),
                    SlotSnapshot::Unresolved { .. } => None,
                })
                .collect(),
            other => panic!("expected bundle snapshot, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_variant_id_references_resolve_directly() {
        let catalog = seed_catalog();
        let resolver = LineResolver::new(&catalog, 4);

        // 10 ml variant ids resolve as-is even though the config says 5 ml;
        // the volume filter only applies to the item-id interpretation
        let line = custom_line(&[(0, "item-a-10ml"), (1, "item-b-5ml"), (2, "item-c-10ml")]);
        let item = resolver.resolve_line("order-1", &line).await.unwrap();

        assert_eq!(
            slot_variant_ids(&item),
            vec![
                Some("item-a-10ml".to_string()),
                Some("item-b-5ml".to_string()),
                Some("item-c-10ml".to_string()),
            ]
        );
        assert_eq!(item.unit_price, 4500);
    }

    #[tokio::test]
    async fn test_item_id_references_resolve_at_config_volume() {
        let catalog = seed_catalog();
        let resolver = LineResolver::new(&catalog, 4);

        let line = custom_line(&[(0, "item-a"), (1, "item-b"), (2, "item-c")]);
        let item = resolver.resolve_line("order-1", &line).await.unwrap();

        assert_eq!(
            slot_variant_ids(&item),
            vec![
                Some("item-a-5ml".to_string()),
                Some("item-b-5ml".to_string()),
                Some("item-c-5ml".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_reference_kept_as_unresolved() {
        let catalog = seed_catalog();
        let resolver = LineResolver::new(&catalog, 4);

        let line = custom_line(&[(0, "item-a-5ml"), (1, "discontinued-9"), (2, "item-c")]);
        let item = resolver.resolve_line("order-1", &line).await.unwrap();

        match &item.snapshot {
            ItemSnapshot::Bundle { slots, .. } => {
                assert_eq!(slots.len(), 3);
                match &slots[1] {
                    SlotSnapshot::Unresolved {
                        slot_index,
                        reference,
                    } => {
                        assert_eq!(*slot_index, 1);
                        assert_eq!(reference, "discontinued-9");
                    }
                    other => panic!("expected unresolved slot, got {:?}", other),
                }
            }
            other => panic!("expected bundle snapshot, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slots_ascend_regardless_of_input_order() {
        let catalog = seed_catalog();
        let resolver = LineResolver::new(&catalog, 4);

        let line = custom_line(&[(2, "item-c"), (0, "item-a-5ml"), (1, "nope")]);
        let item = resolver.resolve_line("order-1", &line).await.unwrap();

        match &item.snapshot {
            ItemSnapshot::Bundle { slots, .. } => {
                let indices: Vec<u32> = slots.iter().map(SlotSnapshot::slot_index).collect();
                assert_eq!(indices, vec![0, 1, 2]);
            }
            other => panic!("expected bundle snapshot, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fixed_bundle_drops_broken_slot() {
        let catalog = seed_catalog();
        catalog.remove_variant("item-b-5ml");
        let resolver = LineResolver::new(&catalog, 4);

        let line = CartLine::FixedBundle {
            line_id: "line-1".to_string(),
            config_id: "set-fixed".to_string(),
            quantity: 1,
        };
        let item = resolver.resolve_line("order-1", &line).await.unwrap();

        assert_eq!(item.kind, OrderItemKind::FixedBundle);
        assert_eq!(item.unit_price, 3900);
        assert_eq!(
            slot_variant_ids(&item),
            vec![
                Some("item-a-5ml".to_string()),
                Some("item-c-5ml".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_config_is_fatal() {
        let catalog = seed_catalog();
        let resolver = LineResolver::new(&catalog, 4);

        let line = CartLine::FixedBundle {
            line_id: "line-1".to_string(),
            config_id: "set-ghost".to_string(),
            quantity: 1,
        };
        let result = resolver.resolve_line("order-1", &line).await;
        assert!(matches!(result, Err(ResolveError::ConfigMissing(id)) if id == "set-ghost"));
    }

    #[tokio::test]
    async fn test_single_line_needs_no_catalog() {
        // An empty catalog: single lines must resolve from cached fields
        let catalog = MemoryCatalog::new();
        let resolver = LineResolver::new(&catalog, 4);

        let line = CartLine::Single {
            line_id: "line-1".to_string(),
            item_id: "item-a".to_string(),
            variant_id: "item-a-5ml".to_string(),
            name: "Ambre Nuit".to_string(),
            brand: "Maison Test".to_string(),
            image: "item-a.webp".to_string(),
            size_label: "5 ml".to_string(),
            unit_price: 1200,
            quantity: 3,
        };
        let item = resolver.resolve_line("order-1", &line).await.unwrap();

        assert_eq!(item.kind, OrderItemKind::Single);
        assert_eq!(item.variant_id.as_deref(), Some("item-a-5ml"));
        assert_eq!(item.line_total, 3600);
        assert_eq!(
            item.snapshot,
            ItemSnapshot::Single {
                name: "Ambre Nuit".to_string(),
                brand: "Maison Test".to_string(),
                image: "item-a.webp".to_string(),
                size_label: "5 ml".to_string(),
            }
        );
    }

    /// Catalog whose variant lookups fail at the transport level
    struct FlakyCatalog {
        inner: MemoryCatalog,
    }

    #[async_trait]
    impl Catalog for FlakyCatalog {
        async fn variants_by_ids(
            &self,
            _ids: &[String],
        ) -> Result<Vec<VariantDetail>, CatalogError> {
            Err(CatalogError::Unavailable("connection reset".to_string()))
        }

        async fn variants_for_items(
            &self,
            _item_ids: &[String],
            _volume_ml: u32,
        ) -> Result<Vec<VariantDetail>, CatalogError> {
            Err(CatalogError::Unavailable("connection reset".to_string()))
        }

        async fn bundle_with_links(
            &self,
            config_id: &str,
        ) -> Result<Option<(BundleConfig, Vec<BundleSlotLink>)>, CatalogError> {
            self.inner.bundle_with_links(config_id).await
        }
    }

    #[tokio::test]
    async fn test_lookup_outage_degrades_to_unresolved() {
        let catalog = FlakyCatalog {
            inner: seed_catalog(),
        };
        let resolver = LineResolver::new(&catalog, 4);

        let line = custom_line(&[(0, "item-a-5ml"), (1, "item-b")]);
        let item = resolver.resolve_line("order-1", &line).await.unwrap();

        match &item.snapshot {
            ItemSnapshot::Bundle { slots, .. } => {
                assert_eq!(slots.len(), 2);
                assert!(slots.iter().all(|s| !s.is_resolved()));
            }
            other => panic!("expected bundle snapshot, got {:?}", other),
        }
        // The order line itself survives at the configuration price
        assert_eq!(item.unit_price, 4500);
    }

    #[tokio::test]
    async fn test_resolve_cart_preserves_line_order() {
        let catalog = seed_catalog();
        let resolver = LineResolver::new(&catalog, 2);

        let lines = vec![
            CartLine::Single {
                line_id: "line-1".to_string(),
                item_id: "item-a".to_string(),
                variant_id: "item-a-5ml".to_string(),
                name: "Ambre Nuit".to_string(),
                brand: "Maison Test".to_string(),
                image: "item-a.webp".to_string(),
                size_label: "5 ml".to_string(),
                unit_price: 5000,
                quantity: 2,
            },
            custom_line(&[(0, "item-a"), (1, "item-b"), (2, "item-c")]),
            CartLine::FixedBundle {
                line_id: "line-3".to_string(),
                config_id: "set-fixed".to_string(),
                quantity: 1,
            },
        ];
        let items = resolver.resolve_cart("order-1", &lines).await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].kind, OrderItemKind::Single);
        assert_eq!(items[1].kind, OrderItemKind::CustomBundle);
        assert_eq!(items[2].kind, OrderItemKind::FixedBundle);
        assert!(items.iter().all(|i| i.order_id == "order-1"));
    }
}
