//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ProductId) │◄──│  product_id     │   │  Tshirt         │       │
//! │  │  name           │   │  size (Size)    │   │  Hoodie         │       │
//! │  │  price_cents    │   │  quantity       │   │  Accessory      │       │
//! │  │  sizes, images  │   └─────────────────┘   │  Pull           │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `CartLine` is identified by `(product_id, size)`. It only *references* a
//! product: the reference may dangle, in which case the line is worth nothing.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Identifiers
// =============================================================================

/// Catalog identifier of a product (e.g. `"hoodie-atelier"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    /// Wraps a product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

/// Lets the catalog index be queried with a plain `&str`.
impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A garment size label as shown on the product page (`"S"`, `"XL"`, `"TU"`).
///
/// Sizes are compared exactly: `"M"` and `"m"` are different lines.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Size(String);

impl Size {
    /// Wraps a size label.
    pub fn new(label: impl Into<String>) -> Self {
        Size(label.into())
    }

    /// Returns the label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Size {
    fn from(label: &str) -> Self {
        Size::new(label)
    }
}

impl From<String> for Size {
    fn from(label: String) -> Self {
        Size(label)
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category, a fixed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// T-shirts.
    Tshirt,
    /// Hoodies.
    Hoodie,
    /// Caps, bags and other accessories.
    Accessory,
    /// Knit pullovers.
    Pull,
}

impl Category {
    /// All categories, in collection page order.
    pub const ALL: [Category; 4] = [
        Category::Tshirt,
        Category::Hoodie,
        Category::Accessory,
        Category::Pull,
    ];

    /// Lowercase slug used in URLs, filters and serialized data.
    pub const fn slug(&self) -> &'static str {
        match self {
            Category::Tshirt => "tshirt",
            Category::Hoodie => "hoodie",
            Category::Accessory => "accessory",
            Category::Pull => "pull",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("unknown category '{}'", s),
            })
    }
}

/// Filter applied on the collection page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Only products of the given category.
    Only(Category),
}

impl CategoryFilter {
    /// Returns true if `category` passes this filter.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product of the collection. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price in euro cents.
    pub price_cents: i64,

    /// Marketing copy for the product page.
    pub description: String,

    /// Available colors, in display order.
    pub colors: Vec<String>,

    /// Available sizes, in display order.
    pub sizes: Vec<Size>,

    /// Image URLs; the first one is the primary image.
    pub images: Vec<String>,

    /// Whether the product can currently be ordered.
    pub in_stock: bool,

    /// Product category.
    pub category: Category,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the primary image (the first of the sequence).
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Returns true if the product is offered in `size`.
    pub fn offers_size(&self, size: &Size) -> bool {
        self.sizes.contains(size)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One (product, size) pairing in a cart, with its quantity.
///
/// ## Invariants
/// - Identity is `(product_id, size)`; a cart never holds two lines with the
///   same key
/// - `quantity` is at least 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Referenced product (may be absent from the catalog).
    pub product_id: ProductId,

    /// Selected size.
    pub size: Size,

    /// Number of units.
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line with a quantity of one.
    pub fn new(product_id: ProductId, size: Size) -> Self {
        CartLine {
            product_id,
            size,
            quantity: 1,
        }
    }

    /// Returns true if this line has the key `(product_id, size)`.
    pub fn has_key(&self, product_id: &ProductId, size: &Size) -> bool {
        self.product_id == *product_id && self.size == *size
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
