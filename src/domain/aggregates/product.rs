//! Product record as served by the catalog API

use serde::Deserialize;
use serde_json::Value;
use crate::domain::value_objects::lenient;

/// Shape of a product's variant data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProductKind {
    /// Flat list of colors, each priced directly.
    #[default]
    Basic,
    /// Networks, each with colors and priced storages.
    Network,
    /// Regions, each with colors and priced storages.
    Region,
}

impl ProductKind {
    /// Exact, case-sensitive match; anything unrecognised is `Basic`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "network" => Self::Network,
            "region" => Self::Region,
            _ => Self::Basic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Network => "network",
            Self::Region => "region",
        }
    }
}

/// Entries that can be flagged as the preselected choice of their list.
pub trait DefaultFlag {
    fn is_default(&self) -> bool;
}

/// The flagged entry, else the first one. List order is significant.
pub fn default_entry<T: DefaultFlag>(items: &[T]) -> Option<&T> {
    items.iter().find(|item| item.is_default()).or_else(|| items.first())
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, rename = "_id", deserialize_with = "lenient::text")]
    pub document_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub product_type: Option<String>,
    /// Discriminator used by older catalog records.
    #[serde(default, rename = "type", deserialize_with = "lenient::text")]
    pub legacy_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub direct_colors: Vec<Color>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub networks: Vec<Network>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub regions: Vec<Region>,
    // Flat pricing fields from the pre-variant schema.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub regular_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub discount_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub stock: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub stock_quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub discount_percent: Option<f64>,
}

impl Product {
    /// Decodes any JSON value; a non-object yields an empty product.
    pub fn from_json(value: Value) -> Self {
        match value {
            v @ Value::Object(_) => serde_json::from_value(v).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().or(self.document_id.as_deref())
    }

    pub fn name(&self) -> &str { self.name.as_deref().unwrap_or_default() }

    pub fn kind(&self) -> ProductKind {
        self.product_type
            .as_deref()
            .or(self.legacy_type.as_deref())
            .map(ProductKind::from_label)
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_default: bool,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub regular_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub discount_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub stock_quantity: Option<f64>,
}

/// A storage option's price block. The API uses two naming conventions for
/// the same amounts, so every alias is kept and probed in order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePrice {
    #[serde(default, deserialize_with = "lenient::amount")]
    pub regular: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub regular_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub discount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub discount_price: Option<f64>,
    #[serde(default, rename = "final", deserialize_with = "lenient::amount")]
    pub final_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub stock_quantity: Option<f64>,
}

impl StoragePrice {
    pub fn regular_amount(&self) -> Option<f64> { self.regular.or(self.regular_price) }

    pub fn discount_amount(&self) -> Option<f64> {
        self.discount.or(self.discount_price).or(self.final_price)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storage {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_default: bool,
    #[serde(default, deserialize_with = "lenient::object")]
    pub price: Option<StoragePrice>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub stock: Option<f64>,
}

/// A network or region: colors plus the storage options priced under it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantGroup {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_default: bool,
    #[serde(default, deserialize_with = "lenient::list")]
    pub colors: Vec<Color>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub default_storages: Vec<Storage>,
}

pub type Network = VariantGroup;
pub type Region = VariantGroup;

impl DefaultFlag for Color {
    fn is_default(&self) -> bool { self.is_default }
}

impl DefaultFlag for Storage {
    fn is_default(&self) -> bool { self.is_default }
}

impl DefaultFlag for VariantGroup {
    fn is_default(&self) -> bool { self.is_default }
}
