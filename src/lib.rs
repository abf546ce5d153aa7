//! Storefront Pricing
//!
//! Price and variant resolution for the gadget storefront.
//!
//! ## Features
//! - Default variant selection across basic, network and region products
//! - Regular / offer price derivation with discount badges
//! - Cart line pricing by price type, with add-time snapshots
//! - Checkout order drafts priced from the current catalog
//! - Stateless HTTP service over all of the above

pub mod api;
pub mod config;
pub mod domain;

pub use api::{app, ApiError};
pub use config::{ConfigError, ServiceConfig};
pub use domain::aggregates::{Cart, CartError, OrderDraft, OrderError, Product, ProductCatalog, ProductKind};
pub use domain::services::{display_price, is_out_of_stock, price_for_cart_line, resolve_price, ResolvedPrice};
pub use domain::value_objects::{PriceType, SelectedVariants};
