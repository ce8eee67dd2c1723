//! # State Module
//!
//! Session state for the storefront, split by concern so each command
//! takes only what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐ │
//! │  │ CatalogState │  │  CartState   │  │  QuoteState  │  │ ConfigState │ │
//! │  │              │  │              │  │              │  │             │ │
//! │  │  Arc<Catalog>│  │  Arc<Mutex<  │  │  Arc<Quote   │  │  store name │ │
//! │  │  Arc<Promo   │  │  CartService │  │    Desk>     │  │  notify     │ │
//! │  │    Table>    │  │  >>          │  │              │  │  e-mail     │ │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └─────────────┘ │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: immutable, shared by Arc                              │
//! │  • CartState: Arc<Mutex<T>>, never locked across an await              │
//! │  • QuoteState: loading flag is an AtomicBool inside QuoteDesk          │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod quote;

pub use cart::CartState;
pub use catalog::CatalogState;
pub use config::{ConfigState, QuoteDelivery, STORE_NAME};
pub use quote::QuoteState;
