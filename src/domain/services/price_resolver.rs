//! Variant price resolution.
//!
//! Picks a product's default configuration and derives what the storefront
//! shows and bills for it. Every function here is pure and total: missing or
//! malformed data degrades to zeros, which callers render as "price
//! unavailable" or "out of stock".

use serde::{Deserialize, Serialize};
use crate::domain::aggregates::product::{default_entry, Color, Product, ProductKind, VariantGroup};
use crate::domain::value_objects::{PriceType, SelectedVariants};

/// Prices and stock of a product's default variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrice {
    pub regular_price: f64,
    /// Equals `regular_price` when there is no discount.
    pub discount_price: f64,
    pub has_discount: bool,
    /// Whole percent, 0-100.
    pub discount: u32,
    pub stock_quantity: f64,
}

impl ResolvedPrice {
    pub fn price_for(&self, price_type: PriceType) -> f64 {
        match price_type {
            PriceType::Regular => self.regular_price,
            PriceType::Offer => self.discount_price,
        }
    }

    pub fn is_out_of_stock(&self) -> bool { self.stock_quantity == 0.0 }
}

#[derive(Clone, Copy, Debug, Default)]
struct VariantQuote {
    regular: f64,
    discount: f64,
    stock: f64,
}

pub fn resolve_price(product: &Product) -> ResolvedPrice {
    let mut quote = match product.kind() {
        ProductKind::Network => storage_quote(&product.networks),
        ProductKind::Region => storage_quote(&product.regions),
        ProductKind::Basic => color_quote(&product.direct_colors),
    };

    if quote.regular == 0.0 && quote.discount == 0.0 {
        quote = legacy_quote(product);
        tracing::debug!(
            product_id = product.id().unwrap_or_default(),
            kind = product.kind().as_str(),
            regular = quote.regular,
            "variant prices missing, using flat product fields"
        );
    }

    if quote.discount == 0.0 {
        quote.discount = quote.regular;
    }

    let has_discount = quote.regular > 0.0 && quote.discount > 0.0 && quote.discount < quote.regular;
    let discount = if has_discount {
        percent(((quote.regular - quote.discount) / quote.regular) * 100.0)
    } else {
        product.discount_percent.map(percent).unwrap_or(0)
    };

    ResolvedPrice {
        regular_price: quote.regular,
        discount_price: quote.discount,
        has_discount,
        discount,
        stock_quantity: quote.stock,
    }
}

/// Listing-card price.
pub fn display_price(product: &Product) -> f64 { resolve_price(product).discount_price }

/// Unit price for a cart line, honouring an explicit choice of the regular price.
pub fn price_for_cart_line(product: &Product, selected: &SelectedVariants) -> f64 {
    resolve_price(product).price_for(selected.price_type())
}

pub fn is_out_of_stock(product: &Product) -> bool { resolve_price(product).is_out_of_stock() }

fn storage_quote(groups: &[VariantGroup]) -> VariantQuote {
    let storage = default_entry(groups).and_then(|group| default_entry(&group.default_storages));
    let Some(storage) = storage else { return VariantQuote::default() };
    let Some(price) = storage.price.as_ref() else { return VariantQuote::default() };
    VariantQuote {
        regular: price.regular_amount().unwrap_or(0.0),
        discount: price.discount_amount().unwrap_or(0.0),
        stock: price.stock_quantity.or(storage.stock).unwrap_or(0.0),
    }
}

fn color_quote(colors: &[Color]) -> VariantQuote {
    default_entry(colors)
        .map(|color| VariantQuote {
            regular: color.regular_price.unwrap_or(0.0),
            discount: color.discount_price.unwrap_or(0.0),
            stock: color.stock_quantity.unwrap_or(0.0),
        })
        .unwrap_or_default()
}

fn legacy_quote(product: &Product) -> VariantQuote {
    VariantQuote {
        regular: product.price.or(product.regular_price).unwrap_or(0.0),
        discount: product.discount_price.unwrap_or(0.0),
        stock: product.stock.or(product.stock_quantity).unwrap_or(0.0),
    }
}

fn percent(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}
