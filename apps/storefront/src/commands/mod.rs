//! # Commands Module
//!
//! Every operation the UI host can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Collection filter, product page
//! ├── cart.rs     ◄─── Cart drawer and promotion codes
//! ├── quote.rs    ◄─── Quote e-mail request
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn list_products(catalog: &CatalogState, filter: Option<&str>)
//!
//! // Only needs the cart
//! fn get_cart(cart: &CartState)
//!
//! // Needs both cart and quote desk
//! async fn request_quote(cart: &CartState, quote: &QuoteState, email: &str)
//! ```
//!
//! Commands return `Result<T, ApiError>` when they can fail; responses and
//! errors serialize to camelCase JSON for the front-end.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod quote;
