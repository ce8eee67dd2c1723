//! # Catalog Commands
//!
//! Collection page and product page queries.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  COLLECTION          [ TOUT ]  [ T-SHIRTS ]  [ HOODIES ]                │
//! │                          │           │            │                     │
//! │                        "all"     "tshirt"     "hoodie"                  │
//! │                          └───────────┴────────────┘                     │
//! │                                      ▼                                  │
//! │                     invoke('list_products', { filter })                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use constantine_core::{CategoryFilter, Product};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CatalogState;

/// Lists products in catalog order, optionally filtered by category slug.
///
/// ## Arguments
/// * `filter` - `"all"`, a category slug, or `None` for everything
///
/// ## Errors
/// `VALIDATION_ERROR` for an unknown category slug.
pub fn list_products(
    catalog: &CatalogState,
    filter: Option<&str>,
) -> Result<Vec<Product>, ApiError> {
    debug!(?filter, "list_products command");

    let filter = match filter {
        Some(raw) => raw.parse::<CategoryFilter>()?,
        None => CategoryFilter::All,
    };

    Ok(catalog
        .catalog()
        .by_category(filter)
        .into_iter()
        .cloned()
        .collect())
}

/// Gets one product for the product page.
///
/// ## Errors
/// `NOT_FOUND` if the id is unknown.
pub fn get_product(catalog: &CatalogState, id: &str) -> Result<Product, ApiError> {
    debug!(product_id = %id, "get_product command");
    Ok(catalog.catalog().require(id)?.clone())
}

#[cfg(test)]
mod tests {
    use constantine_core::Category;

    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_list_products_filters() {
        let state = CatalogState::builtin();

        let all = list_products(&state, None).unwrap();
        assert_eq!(all.len(), state.catalog().len());
        assert_eq!(list_products(&state, Some("all")).unwrap().len(), all.len());

        let tees = list_products(&state, Some("tshirt")).unwrap();
        assert!(!tees.is_empty());
        assert!(tees.iter().all(|p| p.category == Category::Tshirt));

        let err = list_products(&state, Some("chaussures")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_get_product() {
        let state = CatalogState::builtin();
        assert_eq!(
            get_product(&state, "hoodie-atelier").unwrap().name,
            "Hoodie Atelier"
        );
        assert_eq!(
            get_product(&state, "ghost").unwrap_err().code,
            ErrorCode::NotFound
        );
    }
}
