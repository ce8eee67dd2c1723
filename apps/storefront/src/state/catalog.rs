//! # Catalog State
//!
//! The collection and promotion table, loaded once at startup.
//!
//! Both are immutable after construction, so they are shared as `Arc`s
//! without a lock. The cart state holds clones of the same `Arc`s.

use std::path::Path;
use std::sync::Arc;

use constantine_core::{Catalog, PromotionTable};
use tracing::info;

use crate::error::StartupError;

/// Read-only reference data.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
    promotions: Arc<PromotionTable>,
}

impl CatalogState {
    /// Wraps an already-built catalog and promotion table.
    pub fn new(catalog: Catalog, promotions: PromotionTable) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
            promotions: Arc::new(promotions),
        }
    }

    /// The built-in collection and promotion codes.
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin(), PromotionTable::builtin())
    }

    /// Loads the collection from a JSON file, keeping the built-in codes.
    pub fn from_file(path: &Path) -> Result<Self, StartupError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Catalog::from_json(&json)?;
        info!(?path, products = catalog.len(), "Catalog loaded from file");
        Ok(Self::new(catalog, PromotionTable::builtin()))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_arc(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn promotions_arc(&self) -> Arc<PromotionTable> {
        Arc::clone(&self.promotions)
    }
}
