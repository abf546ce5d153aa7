//! Cart Aggregate

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;
use crate::domain::aggregates::product::Product;
use crate::domain::events::{CartEvent, DomainEvent};
use crate::domain::services::price_resolver::resolve_price;
use crate::domain::value_objects::SelectedVariants;

#[derive(Clone, Debug)]
pub struct Cart {
    id: String,
    customer_id: Option<String>,
    items: Vec<CartItem>,
    subtotal: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

/// A cart line. `unit_price` is the price snapshot taken when the line was added.
#[derive(Clone, Debug, PartialEq)]
pub struct CartItem {
    pub line_id: String,
    pub product_id: String,
    pub name: String,
    pub selected_variants: SelectedVariants,
    pub quantity: u32,
    pub unit_price: f64,
}

impl CartItem {
    pub fn line_total(&self) -> f64 { self.unit_price * f64::from(self.quantity) }
}

impl Cart {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(), customer_id: None, items: vec![], subtotal: 0.0,
            created_at: now, updated_at: now, events: vec![],
        }
    }

    pub fn for_customer(customer_id: impl Into<String>) -> Self {
        let mut cart = Self::new();
        cart.customer_id = Some(customer_id.into());
        cart
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn customer_id(&self) -> Option<&str> { self.customer_id.as_deref() }
    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn subtotal(&self) -> f64 { self.subtotal }
    pub fn item_count(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    /// Adds `quantity` of the product's default variant, snapshotting the
    /// price picked by `selected.price_type`. Returns the line id.
    pub fn add_product(&mut self, product: &Product, selected: SelectedVariants, quantity: u32) -> Result<String, CartError> {
        if quantity == 0 { return Err(CartError::InvalidQuantity); }
        let product_id = product.id().ok_or(CartError::MissingProductId)?.to_string();
        let resolved = resolve_price(product);
        if resolved.is_out_of_stock() {
            tracing::debug!(cart_id = %self.id, %product_id, "rejected out-of-stock product");
            return Err(CartError::OutOfStock(product_id));
        }

        let price_type = selected.price_type();
        let (line_id, unit_price) = match self.items.iter_mut().find(|i| i.product_id == product_id && i.selected_variants == selected) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(quantity);
                (existing.line_id.clone(), existing.unit_price)
            }
            None => {
                let item = CartItem {
                    line_id: Uuid::new_v4().to_string(),
                    product_id: product_id.clone(),
                    name: product.name().to_string(),
                    selected_variants: selected,
                    quantity,
                    unit_price: resolved.price_for(price_type),
                };
                let ids = (item.line_id.clone(), item.unit_price);
                self.items.push(item);
                ids
            }
        };

        self.recalculate();
        self.raise_event(DomainEvent::Cart(CartEvent::ItemAdded {
            cart_id: self.id.clone(), line_id: line_id.clone(), product_id, quantity, unit_price, price_type,
        }));
        Ok(line_id)
    }

    pub fn update_quantity(&mut self, line_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 { return self.remove_item(line_id); }
        let item = self.items.iter_mut().find(|i| i.line_id == line_id).ok_or_else(|| CartError::ItemNotFound(line_id.to_string()))?;
        item.quantity = quantity;
        self.recalculate();
        Ok(())
    }

    pub fn remove_item(&mut self, line_id: &str) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|i| i.line_id != line_id);
        if self.items.len() == before { return Err(CartError::ItemNotFound(line_id.to_string())); }
        self.recalculate();
        self.raise_event(DomainEvent::Cart(CartEvent::ItemRemoved { cart_id: self.id.clone(), line_id: line_id.to_string() }));
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
        self.raise_event(DomainEvent::Cart(CartEvent::Cleared { cart_id: self.id.clone() }));
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }

    // Amounts stay f64 like the catalog API's JSON numbers; no currency rounding here.
    fn recalculate(&mut self) {
        self.subtotal = self.items.iter().map(CartItem::line_total).sum();
        self.updated_at = Utc::now();
    }
}

impl Default for Cart {
    fn default() -> Self { Self::new() }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Quantity must be at least 1")]
    InvalidQuantity,
    #[error("Product has no id")]
    MissingProductId,
    #[error("Product {0} is out of stock")]
    OutOfStock(String),
    #[error("Cart line {0} not found")]
    ItemNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PriceType;
    use serde_json::json;

    fn phone() -> Product {
        Product::from_json(json!({
            "id": "P1", "name": "Galaxy S24",
            "directColors": [{"id": "black", "regularPrice": 1000, "discountPrice": 800, "stockQuantity": 3}]
        }))
    }

    #[test]
    fn test_cart_operations() {
        let mut cart = Cart::for_customer("CUST001");
        cart.add_product(&phone(), SelectedVariants::default(), 2).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal(), 1600.0);
        let line = cart.add_product(&phone(), SelectedVariants::default(), 1).unwrap();
        assert_eq!(cart.items()[0].quantity, 3); // Merged
        assert_eq!(cart.items()[0].line_id, line);
        assert_eq!(cart.subtotal(), 2400.0);
    }

    #[test]
    fn test_regular_price_is_a_separate_line() {
        let mut cart = Cart::new();
        cart.add_product(&phone(), SelectedVariants::default(), 1).unwrap();
        cart.add_product(&phone(), SelectedVariants::with_price_type(PriceType::Regular), 1).unwrap();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.items()[1].unit_price, 1000.0);
        assert_eq!(cart.subtotal(), 1800.0);
    }

    #[test]
    fn test_rejections() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_product(&phone(), SelectedVariants::default(), 0), Err(CartError::InvalidQuantity));
        let anonymous = Product::from_json(json!({"price": 10, "stock": 1}));
        assert_eq!(cart.add_product(&anonymous, SelectedVariants::default(), 1), Err(CartError::MissingProductId));
        let sold_out = Product::from_json(json!({"id": "P2", "productType": "region", "regions": []}));
        assert_eq!(cart.add_product(&sold_out, SelectedVariants::default(), 1), Err(CartError::OutOfStock("P2".into())));
        assert!(cart.is_empty());
        assert!(cart.take_events().is_empty());
    }

    #[test]
    fn test_update_remove_and_events() {
        let mut cart = Cart::new();
        let line = cart.add_product(&phone(), SelectedVariants::default(), 1).unwrap();
        cart.update_quantity(&line, 5).unwrap();
        assert_eq!(cart.subtotal(), 4000.0);
        assert!(matches!(cart.update_quantity("missing", 1), Err(CartError::ItemNotFound(_))));
        cart.update_quantity(&line, 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0.0);

        let events = cart.take_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], DomainEvent::Cart(CartEvent::ItemAdded { unit_price, .. }) if *unit_price == 800.0));
        assert!(matches!(&events[1], DomainEvent::Cart(CartEvent::ItemRemoved { .. })));
    }
}
