//! Forgiving field decoders for storefront API payloads.
//!
//! The catalog API is loose about types: prices arrive as numbers or numeric
//! strings, flags may be missing or null, and collections are sometimes absent.
//! These helpers plug into `#[serde(deserialize_with = ...)]` and never reject a
//! value; anything unusable decodes as "absent".

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a finite number from a JSON number or numeric string.
pub fn as_amount(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

pub fn amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(as_amount(&Value::deserialize(deserializer)?))
}

/// Only a literal JSON `true` sets a flag.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// Identifiers and labels. Numbers are stringified, empty strings dropped.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Arrays keep their length and order: an element that is not an object, or
/// fails to decode, becomes `T::default()` in its original slot.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                v @ Value::Object(_) => serde_json::from_value(v).unwrap_or_default(),
                _ => T::default(),
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Nested objects; anything other than a JSON object is absent.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        v @ Value::Object(_) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Probe {
        #[serde(default, deserialize_with = "amount")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "amount")]
        stock: Option<f64>,
        #[serde(default, deserialize_with = "flag")]
        on: bool,
        #[serde(default, deserialize_with = "text")]
        id: Option<String>,
        #[serde(default, deserialize_with = "list")]
        items: Vec<Probe>,
    }

    #[test]
    fn test_amount_accepts_numeric_strings() {
        assert_eq!(as_amount(&json!("1200.5")), Some(1200.5));
        assert_eq!(as_amount(&json!(" 99 ")), Some(99.0));
        assert_eq!(as_amount(&json!("n/a")), None);
        assert_eq!(as_amount(&json!(true)), None);
        assert_eq!(as_amount(&Value::Null), None);
    }

    #[test]
    fn test_malformed_fields_decode_as_absent() {
        let p: Probe = serde_json::from_value(json!({
            "price": {"amount": 3},
            "stock": 4.9,
            "on": "true",
            "id": 42,
            "items": "nope"
        }))
        .unwrap();
        assert_eq!(p.price, None);
        assert_eq!(p.stock, Some(4.9));
        assert!(!p.on);
        assert_eq!(p.id.as_deref(), Some("42"));
        assert!(p.items.is_empty());
    }

    #[test]
    fn test_list_keeps_positions_of_bad_elements() {
        let p: Probe = serde_json::from_value(json!({
            "items": [null, {"price": 5, "on": true}, 7, [1.5, 2, true, "x"]]
        }))
        .unwrap();
        assert_eq!(p.items.len(), 4);
        assert_eq!(p.items[0], Probe::default());
        assert_eq!(p.items[1].price, Some(5.0));
        assert!(p.items[1].on);
        assert_eq!(p.items[2], Probe::default());
        // Derived structs would otherwise accept a positional array.
        assert_eq!(p.items[3], Probe::default());
    }
}
