//! HTTP surface over the pricing domain.
//!
//! Every handler decodes products leniently, so a malformed catalog record
//! prices as "unavailable" instead of failing the request.

use axum::{http::StatusCode, response::{IntoResponse, Response}, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use validator::{Validate, ValidationErrors};
use crate::domain::aggregates::{Cart, CartError, OrderDraft, OrderError, Product, ProductCatalog};
use crate::domain::services::price_resolver::{price_for_cart_line, resolve_price, ResolvedPrice};
use crate::domain::value_objects::{lenient, PriceType, SelectedVariants};

pub fn app() -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({"status": "healthy", "service": "storefront-pricing"})) }))
        .route("/api/v1/pricing/resolve", post(resolve))
        .route("/api/v1/pricing/listing", post(listing))
        .route("/api/v1/pricing/cart-line", post(cart_line))
        .route("/api/v1/checkout/preview", post(checkout_preview))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive())
}

async fn resolve(Json(product): Json<Value>) -> Json<ResolvedPrice> {
    Json(resolve_price(&Product::from_json(product)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPrice {
    pub id: Option<String>,
    pub display_price: f64,
    pub has_discount: bool,
    pub discount: u32,
    pub out_of_stock: bool,
}

async fn listing(Json(products): Json<Vec<Value>>) -> Json<Vec<ListingPrice>> {
    let cards = products
        .into_iter()
        .map(|value| {
            let product = Product::from_json(value);
            let resolved = resolve_price(&product);
            ListingPrice {
                id: product.id().map(str::to_string),
                display_price: resolved.discount_price,
                has_discount: resolved.has_discount,
                discount: resolved.discount,
                out_of_stock: resolved.is_out_of_stock(),
            }
        })
        .collect();
    Json(cards)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRequest {
    #[serde(default)]
    pub product: Value,
    #[serde(default)]
    pub selected_variants: SelectedVariants,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinePrice {
    pub price: f64,
    pub price_type: PriceType,
}

async fn cart_line(Json(req): Json<CartLineRequest>) -> Json<CartLinePrice> {
    let product = Product::from_json(req.product);
    Json(CartLinePrice {
        price: price_for_cart_line(&product, &req.selected_variants),
        price_type: req.selected_variants.price_type(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPreviewRequest {
    #[serde(default, deserialize_with = "lenient::text")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub products: Vec<Value>,
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: String,
    #[validate(range(min = 1, max = 999))]
    pub quantity: u32,
    #[serde(default)]
    pub selected_variants: SelectedVariants,
}

async fn checkout_preview(Json(req): Json<CheckoutPreviewRequest>) -> Result<Json<OrderDraft>, ApiError> {
    for item in &req.items { item.validate()?; }
    let catalog: Vec<Product> = req.products.into_iter().map(Product::from_json).collect();
    let mut cart = match req.customer_id {
        Some(customer_id) => Cart::for_customer(customer_id),
        None => Cart::new(),
    };
    for item in &req.items {
        let product = catalog.product(&item.product_id).ok_or_else(|| OrderError::UnknownProduct(item.product_id.clone()))?;
        cart.add_product(product, item.selected_variants.clone(), item.quantity)?;
    }
    Ok(Json(OrderDraft::from_cart(&cart, &catalog)?))
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Order(#[from] OrderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Cart(_) | ApiError::Order(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        tracing::warn!(error = %self, "request rejected");
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
