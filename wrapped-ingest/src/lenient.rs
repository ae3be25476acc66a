//! Forgiving field decoders for exported receipt JSON.
//!
//! Exports are inconsistent about types (numbers as strings, item numbers as
//! integers). None of these decoders fail; unusable values become `None`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;
use wrapped_core::error::json_kind;

use crate::types::RawItem;

/// Finite number from a JSON number or numeric string
pub fn number<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    Ok(as_number(&value))
}

/// String from a JSON string or number
pub fn text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    Ok(as_text(&value))
}

/// Item list. A non-array value decodes as an empty list and elements that
/// are not objects decode as empty items.
pub fn items<'de, D>(de: D) -> Result<Option<Vec<RawItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    let elements = match value {
        Value::Null => return Ok(None),
        Value::Array(elements) => elements,
        other => {
            warn!(found = json_kind(&other), "itemArray is not an array, treating as empty");
            return Ok(Some(Vec::new()));
        }
    };

    let items = elements
        .into_iter()
        .enumerate()
        .map(|(i, element)| {
            if !element.is_object() {
                warn!(index = i, found = json_kind(&element), "item is not an object");
                return RawItem::default();
            }
            serde_json::from_value(element).unwrap_or_default()
        })
        .collect();

    Ok(Some(items))
}

pub(crate) fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
