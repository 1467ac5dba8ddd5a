//! In-memory catalog implementation
//!
//! Backs tests and embedded/demo deployments where the catalog fits in
//! memory. Seeded up front; lookups never fail with a transport error.

use super::{Catalog, CatalogError};
use async_trait::async_trait;
use shared::models::{BundleConfig, BundleSlotLink, Item, ItemVariant, VariantDetail};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
struct Inner {
    items: HashMap<String, Item>,
    variants: HashMap<String, ItemVariant>,
    bundles: HashMap<String, (BundleConfig, Vec<BundleSlotLink>)>,
}

/// Catalog backed by in-memory maps
#[derive(Default)]
pub struct MemoryCatalog {
    inner: RwLock<Inner>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_item(&self, item: Item) {
        self.inner.write().unwrap().items.insert(item.id.clone(), item);
    }

    pub fn insert_variant(&self, variant: ItemVariant) {
        self.inner
            .write()
            .unwrap()
            .variants
            .insert(variant.id.clone(), variant);
    }

    pub fn insert_bundle(&self, config: BundleConfig, links: Vec<BundleSlotLink>) {
        self.inner
            .write()
            .unwrap()
            .bundles
            .insert(config.id.clone(), (config, links));
    }

    /// Remove a variant, simulating catalog drift after a line was captured
    pub fn remove_variant(&self, variant_id: &str) {
        self.inner.write().unwrap().variants.remove(variant_id);
    }

    fn join(inner: &Inner, variant: &ItemVariant) -> Option<VariantDetail> {
        inner.items.get(&variant.item).map(|item| VariantDetail {
            variant: variant.clone(),
            item: item.clone(),
        })
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn variants_by_ids(&self, ids: &[String]) -> Result<Vec<VariantDetail>, CatalogError> {
        let inner = self.inner.read().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| inner.variants.get(id))
            .filter_map(|v| Self::join(&inner, v))
            .collect())
    }

    async fn variants_for_items(
        &self,
        item_ids: &[String],
        volume_ml: u32,
    ) -> Result<Vec<VariantDetail>, CatalogError> {
        let inner = self.inner.read().unwrap();
        Ok(item_ids
            .iter()
            .filter_map(|item_id| {
                inner
                    .variants
                    .values()
                    .find(|v| &v.item == item_id && v.volume_ml == volume_ml && v.is_active)
            })
            .filter_map(|v| Self::join(&inner, v))
            .collect())
    }

    async fn bundle_with_links(
        &self,
        config_id: &str,
    ) -> Result<Option<(BundleConfig, Vec<BundleSlotLink>)>, CatalogError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.bundles.get(config_id).cloned())
    }
}
