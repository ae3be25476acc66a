use serde::{Deserialize, Serialize};

use crate::lenient;

/// A receipt record exactly as exported by the point-of-sale system.
///
/// Every field is optional and decoded leniently: numbers may arrive as JSON
/// numbers or numeric strings, and anything unusable is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    #[serde(default, deserialize_with = "lenient::text")]
    pub transaction_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub transaction_date_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub sub_total: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub taxes: Option<f64>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub item_array: Option<Vec<RawItem>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub warehouse_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub warehouse_short_name: Option<String>,
}

/// A line item as exported, with two redundant description fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(rename = "itemDescription01", default, deserialize_with = "lenient::text")]
    pub item_description01: Option<String>,
    #[serde(rename = "itemDescription02", default, deserialize_with = "lenient::text")]
    pub item_description02: Option<String>,
    #[serde(rename = "itemNumber", default, deserialize_with = "lenient::text")]
    pub item_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub unit: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: Option<f64>,
}

#[cfg(test)]
impl RawItem {
    pub fn new(description: impl Into<String>, unit: f64, amount: f64) -> Self {
        Self {
            item_description01: Some(description.into()),
            unit: Some(unit),
            amount: Some(amount),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_record() {
        let raw: RawReceipt = serde_json::from_value(json!({
            "transactionDate": "2024-03-01",
            "transactionDateTime": "2024-03-01T10:15:00",
            "total": 12.5,
            "subTotal": "11.75",
            "taxes": 0.75,
            "warehouseName": "ISSAQUAH",
            "itemArray": [
                {"itemDescription01": "ORGANIC BANANA", "itemDescription02": "3 LB", "itemNumber": 30669, "unit": 3, "amount": 4.5}
            ]
        }))
        .unwrap();

        assert_eq!(raw.transaction_date.as_deref(), Some("2024-03-01"));
        assert_eq!(raw.sub_total, Some(11.75));
        assert_eq!(raw.warehouse_name.as_deref(), Some("ISSAQUAH"));
        let items = raw.item_array.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_number.as_deref(), Some("30669"));
        assert_eq!(items[0].unit, Some(3.0));
    }

    #[test]
    fn test_decode_sparse_record() {
        let raw: RawReceipt = serde_json::from_value(json!({"unrelated": true})).unwrap();
        assert_eq!(raw, RawReceipt::default());
    }

    #[test]
    fn test_wrong_types_become_absent() {
        let raw: RawReceipt = serde_json::from_value(json!({
            "transactionDate": null,
            "total": "n/a",
            "taxes": {"state": 1.0},
            "itemArray": [{"unit": "two", "amount": [1, 2]}]
        }))
        .unwrap();

        assert_eq!(raw.transaction_date, None);
        assert_eq!(raw.total, None);
        assert_eq!(raw.taxes, None);
        let items = raw.item_array.unwrap();
        assert_eq!(items[0], RawItem::default());
    }
}
