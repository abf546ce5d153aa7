//! Value Objects for storefront pricing

pub mod lenient;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of a variant's two billable amounts a shopper pays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    /// Discounted cash price.
    #[default]
    Offer,
    /// Undiscounted price, kept for installment (EMI) eligibility.
    Regular,
}

impl PriceType {
    /// Only the exact label `"regular"` selects the regular price.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("regular") => Self::Regular,
            _ => Self::Offer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offer => "offer",
            Self::Regular => "regular",
        }
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// The shopper's selection attached to a cart line.
///
/// Ids are carried through untouched; pricing only looks at `price_type`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedVariants {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub price_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub storage_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
}

impl SelectedVariants {
    pub fn with_price_type(price_type: PriceType) -> Self {
        Self { price_type: Some(price_type.as_str().to_string()), ..Self::default() }
    }

    pub fn price_type(&self) -> PriceType { PriceType::from_label(self.price_type.as_deref()) }
}
