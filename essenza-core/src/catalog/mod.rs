//! Catalog lookup collaborator
//!
//! The engine never owns catalog data; it issues batched lookups against
//! whatever backend the embedding application wires in. Resolution
//! correctness depends on exactly these three lookup shapes.

pub mod memory;

use async_trait::async_trait;
use shared::models::{BundleConfig, BundleSlotLink, VariantDetail};
use thiserror::Error;

pub use memory::MemoryCatalog;

/// Catalog lookup failure
///
/// Transport-level only: an id that matches nothing is not an error, it is
/// simply absent from the result.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Batched catalog lookups
///
/// Unknown ids are omitted from results rather than reported as errors;
/// callers decide how to degrade.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Look up variants by variant id, joined with their parent items
    async fn variants_by_ids(&self, ids: &[String]) -> Result<Vec<VariantDetail>, CatalogError>;

    /// Look up each item's variant at the given sample size
    ///
    /// An item may carry many variants at different sizes; the volume filter
    /// picks the one matching the bundle configuration.
    async fn variants_for_items(
        &self,
        item_ids: &[String],
        volume_ml: u32,
    ) -> Result<Vec<VariantDetail>, CatalogError>;

    /// Look up a bundle configuration together with its fixed slot links
    async fn bundle_with_links(
        &self,
        config_id: &str,
    ) -> Result<Option<(BundleConfig, Vec<BundleSlotLink>)>, CatalogError>;
}
