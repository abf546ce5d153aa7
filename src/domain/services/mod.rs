//! Domain services
pub mod price_resolver;

pub use price_resolver::{display_price, is_out_of_stock, price_for_cart_line, resolve_price, ResolvedPrice};
