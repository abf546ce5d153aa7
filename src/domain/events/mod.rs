//! Domain events
use crate::domain::value_objects::PriceType;

#[derive(Clone, Debug, PartialEq)]
pub enum DomainEvent {
    Cart(CartEvent),
    Order(OrderEvent),
}

#[derive(Clone, Debug, PartialEq)]
pub enum CartEvent {
    ItemAdded { cart_id: String, line_id: String, product_id: String, quantity: u32, unit_price: f64, price_type: PriceType },
    ItemRemoved { cart_id: String, line_id: String },
    Cleared { cart_id: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum OrderEvent {
    Drafted { order_id: String, cart_id: String, subtotal: f64, repriced_lines: usize },
}
