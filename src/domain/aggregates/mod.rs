//! Aggregates module
pub mod product;
pub mod cart;
pub mod order;

pub use product::{default_entry, Color, DefaultFlag, Network, Product, ProductKind, Region, Storage, StoragePrice, VariantGroup};
pub use cart::{Cart, CartError, CartItem};
pub use order::{OrderDraft, OrderError, OrderLine, ProductCatalog};
