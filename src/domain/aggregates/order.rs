//! Order draft built at checkout
//!
//! Cart lines carry the price seen when they were added. At checkout every
//! line is priced again from the current catalog record, using the line's own
//! price type, so the submitted order reflects what the shopper will be billed.

use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;
use crate::domain::aggregates::cart::Cart;
use crate::domain::aggregates::product::Product;
use crate::domain::events::{DomainEvent, OrderEvent};
use crate::domain::services::price_resolver::{is_out_of_stock, price_for_cart_line, resolve_price};
use crate::domain::value_objects::{PriceType, SelectedVariants};

/// Source of current product records, keyed by product id.
pub trait ProductCatalog {
    fn product(&self, id: &str) -> Option<&Product>;
}

impl ProductCatalog for HashMap<String, Product> {
    fn product(&self, id: &str) -> Option<&Product> { self.get(id) }
}

impl ProductCatalog for [Product] {
    fn product(&self, id: &str) -> Option<&Product> { self.iter().find(|p| p.id() == Some(id)) }
}

impl ProductCatalog for Vec<Product> {
    fn product(&self, id: &str) -> Option<&Product> { self.as_slice().product(id) }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    id: String,
    cart_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_id: Option<String>,
    lines: Vec<OrderLine>,
    subtotal: f64,
    regular_total: f64,
    savings: f64,
    created_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price_type: PriceType,
    pub selected_variants: SelectedVariants,
    pub unit_price: f64,
    pub regular_unit_price: f64,
    pub line_total: f64,
    /// Price captured when the line entered the cart.
    pub snapshot_price: f64,
    pub price_changed: bool,
}

impl OrderDraft {
    pub fn from_cart<C: ProductCatalog + ?Sized>(cart: &Cart, catalog: &C) -> Result<Self, OrderError> {
        if cart.is_empty() { return Err(OrderError::EmptyCart); }

        let mut lines = Vec::with_capacity(cart.item_count());
        for item in cart.items() {
            let product = catalog.product(&item.product_id).ok_or_else(|| OrderError::UnknownProduct(item.product_id.clone()))?;
            if is_out_of_stock(product) {
                tracing::warn!(product_id = %item.product_id, "product sold out before checkout");
                return Err(OrderError::Unavailable(item.product_id.clone()));
            }
            let unit_price = price_for_cart_line(product, &item.selected_variants);
            lines.push(OrderLine {
                product_id: item.product_id.clone(),
                name: item.name.clone(),
                quantity: item.quantity,
                price_type: item.selected_variants.price_type(),
                selected_variants: item.selected_variants.clone(),
                unit_price,
                regular_unit_price: resolve_price(product).regular_price,
                line_total: unit_price * f64::from(item.quantity),
                snapshot_price: item.unit_price,
                price_changed: unit_price != item.unit_price,
            });
        }

        // Same f64 arithmetic as `Cart::recalculate`.
        let subtotal: f64 = lines.iter().map(|l| l.line_total).sum();
        let regular_total: f64 = lines.iter().map(|l| l.regular_unit_price * f64::from(l.quantity)).sum();
        let repriced_lines = lines.iter().filter(|l| l.price_changed).count();
        let id = Uuid::new_v4().to_string();
        tracing::debug!(order_id = %id, cart_id = cart.id(), subtotal, repriced_lines, "order draft built");

        let mut draft = Self {
            id: id.clone(), cart_id: cart.id().to_string(), customer_id: cart.customer_id().map(str::to_string),
            lines, subtotal, regular_total, savings: regular_total - subtotal, created_at: Utc::now(), events: vec![],
        };
        draft.raise_event(DomainEvent::Order(OrderEvent::Drafted { order_id: id, cart_id: cart.id().to_string(), subtotal, repriced_lines }));
        Ok(draft)
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn lines(&self) -> &[OrderLine] { &self.lines }
    pub fn subtotal(&self) -> f64 { self.subtotal }
    pub fn regular_total(&self) -> f64 { self.regular_total }
    pub fn savings(&self) -> f64 { self.savings }
    pub fn has_price_changes(&self) -> bool { self.lines.iter().any(|l| l.price_changed) }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Product {0} is not in the catalog")]
    UnknownProduct(String),
    #[error("Product {0} is no longer available")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tablet(regular: u32, discount: u32, stock: u32) -> Product {
        Product::from_json(json!({
            "id": "T1", "name": "iPad Air", "productType": "region",
            "regions": [{"id": "global", "defaultStorages": [
                {"id": "128", "isDefault": true, "price": {"regular": regular, "discount": discount, "stockQuantity": stock}}
            ]}]
        }))
    }

    #[test]
    fn test_order_draft_reprices_per_price_type() {
        let mut cart = Cart::for_customer("CUST001");
        cart.add_product(&tablet(60000, 55000, 4), SelectedVariants::default(), 2).unwrap();
        cart.add_product(&tablet(60000, 55000, 4), SelectedVariants::with_price_type(PriceType::Regular), 1).unwrap();

        let catalog = vec![tablet(60000, 52000, 4)];
        let mut draft = OrderDraft::from_cart(&cart, &catalog).unwrap();
        assert_eq!(draft.lines().len(), 2);
        assert_eq!(draft.lines()[0].unit_price, 52000.0);
        assert_eq!(draft.lines()[0].snapshot_price, 55000.0);
        assert!(draft.lines()[0].price_changed);
        assert_eq!(draft.lines()[1].price_type, PriceType::Regular);
        assert_eq!(draft.lines()[1].unit_price, 60000.0);
        assert!(!draft.lines()[1].price_changed);
        assert_eq!(draft.subtotal(), 164000.0);
        assert_eq!(draft.regular_total(), 180000.0);
        assert_eq!(draft.savings(), 16000.0);
        assert!(draft.has_price_changes());
        assert!(matches!(draft.take_events().as_slice(), [DomainEvent::Order(OrderEvent::Drafted { repriced_lines: 1, .. })]));
    }

    #[test]
    fn test_order_draft_failures() {
        let catalog: HashMap<String, Product> = HashMap::new();
        assert_eq!(OrderDraft::from_cart(&Cart::new(), &catalog).unwrap_err(), OrderError::EmptyCart);

        let mut cart = Cart::new();
        cart.add_product(&tablet(100, 90, 1), SelectedVariants::default(), 1).unwrap();
        assert_eq!(OrderDraft::from_cart(&cart, &catalog).unwrap_err(), OrderError::UnknownProduct("T1".into()));

        let sold_out: HashMap<String, Product> = [("T1".to_string(), tablet(100, 90, 0))].into_iter().collect();
        assert_eq!(OrderDraft::from_cart(&cart, &sold_out).unwrap_err(), OrderError::Unavailable("T1".into()));
    }

    #[test]
    fn test_order_draft_serializes_camel_case() {
        let mut cart = Cart::new();
        cart.add_product(&tablet(100, 80, 1), SelectedVariants::default(), 1).unwrap();
        let draft = OrderDraft::from_cart(&cart, &[tablet(100, 80, 1)][..]).unwrap();
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["lines"][0]["priceType"], "offer");
        assert_eq!(body["lines"][0]["unitPrice"], 80.0);
        assert_eq!(body["regularTotal"], 100.0);
        assert!(body.get("customerId").is_none());
    }
}
