//! # Catalog Module
//!
//! The static product collection, indexed by product id.
//!
//! ## Lookup Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog                                         │
//! │                                                                         │
//! │   order: [tee-noir, tee-ecru, hoodie-atelier, ...]   (display order)    │
//! │                                                                         │
//! │   index: HashMap<ProductId, Product>                 (O(1) lookup)      │
//! │          "hoodie-atelier" ──► Product { price_cents: 12000, ... }       │
//! │                                                                         │
//! │   Loaded once at startup, never mutated. Shared as Arc<Catalog>.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Category, CategoryFilter, Product, ProductId, Size};
use crate::validation::validate_product;

/// Immutable product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    index: HashMap<ProductId, Product>,
    order: Vec<ProductId>,
}

impl Catalog {
    /// Builds a catalog from a list of products.
    ///
    /// ## Errors
    /// - `CoreError::Validation` if an entry is malformed
    /// - `CoreError::DuplicateProduct` if two entries share an id
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        let mut catalog = Catalog::default();

        for product in products {
            validate_product(&product)?;

            if catalog.index.contains_key(&product.id) {
                return Err(CoreError::DuplicateProduct(product.id.to_string()));
            }

            catalog.order.push(product.id.clone());
            catalog.index.insert(product.id.clone(), product);
        }

        Ok(catalog)
    }

    /// Parses a JSON array of products (same shape as [`Product`]'s serde form).
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Catalog::new(products)
    }

    /// The Maison Constantine collection shipped with the storefront.
    pub fn builtin() -> Self {
        let mut catalog = Catalog::default();
        for product in builtin_products() {
            catalog.order.push(product.id.clone());
            catalog.index.insert(product.id.clone(), product);
        }
        catalog
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id)
    }

    /// Looks up a product by id, failing with `ProductNotFound`.
    pub fn require(&self, id: &str) -> CoreResult<&Product> {
        self.get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Returns the unit price of a product, if it exists.
    pub fn price_of(&self, id: &str) -> Option<Money> {
        self.get(id).map(Product::price)
    }

    /// Returns true if the catalog knows this id.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates over products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> + '_ {
        self.order.iter().filter_map(|id| self.index.get(id))
    }

    /// Products passing the collection page filter, in catalog order.
    pub fn by_category(&self, filter: CategoryFilter) -> Vec<&Product> {
        self.iter().filter(|p| filter.matches(p.category)).collect()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Checks if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// =============================================================================
// Built-in Collection
// =============================================================================

fn builtin_products() -> Vec<Product> {
    fn item(
        id: &str,
        name: &str,
        price_euros: i64,
        description: &str,
        colors: &[&str],
        sizes: &[&str],
        category: Category,
        in_stock: bool,
    ) -> Product {
        Product {
            id: ProductId::from(id),
            name: name.to_string(),
            price_cents: Money::from_euros(price_euros).cents(),
            description: description.to_string(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
            sizes: sizes.iter().map(|s| Size::from(*s)).collect(),
            images: (1..=3)
                .map(|n| format!("/images/products/{}-{}.jpg", id, n))
                .collect(),
            in_stock,
            category,
        }
    }

    const APPAREL: &[&str] = &["S", "M", "L", "XL"];

    vec![
        item(
            "tee-heritage-noir",
            "T-shirt Héritage Noir",
            45,
            "Coton peigné 240 g, broderie ton sur ton au cœur.",
            &["Noir"],
            APPAREL,
            Category::Tshirt,
            true,
        ),
        item(
            "tee-heritage-ecru",
            "T-shirt Héritage Écru",
            45,
            "Coton peigné 240 g, teinture naturelle écrue.",
            &["Écru"],
            APPAREL,
            Category::Tshirt,
            true,
        ),
        item(
            "hoodie-atelier",
            "Hoodie Atelier",
            120,
            "Molleton gratté 450 g, capuche doublée, finitions main.",
            &["Noir", "Anthracite"],
            APPAREL,
            Category::Hoodie,
            true,
        ),
        item(
            "hoodie-constantine",
            "Hoodie Constantine",
            135,
            "Édition signature, monogramme brodé or.",
            &["Noir"],
            APPAREL,
            Category::Hoodie,
            false,
        ),
        item(
            "pull-maille-sable",
            "Pull Maille Sable",
            95,
            "Maille côtelée en laine mérinos.",
            &["Sable", "Crème"],
            APPAREL,
            Category::Pull,
            true,
        ),
        item(
            "casquette-monogramme",
            "Casquette Monogramme",
            35,
            "Sergé de coton, fermoir laiton.",
            &["Noir", "Beige"],
            &["TU"],
            Category::Accessory,
            true,
        ),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================
