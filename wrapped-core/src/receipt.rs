//! Canonical receipt types shared by the normalizer and the aggregator

use serde::{Deserialize, Serialize};

/// Name used when an item carries no usable description or number
pub const UNKNOWN_ITEM: &str = "Unknown Item";

/// One purchase transaction in canonical form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Receipt {
    /// Transaction date ("YYYY-MM-DD" or a date-time starting with it), empty if unknown
    pub date: String,
    /// Receipt total, always finite
    pub total: f64,
    /// Line items in receipt order
    pub items: Vec<Item>,
    /// Warehouse label, when the source record carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
}

/// One canonical line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Cleaned display name, never empty
    pub name: String,
    /// Purchased quantity (defaults to 1)
    pub qty: f64,
    /// Line amount; `None` when the source had none
    pub price: Option<f64>,
}

impl Receipt {
    /// Create a new Receipt without warehouse information
    pub fn new(date: impl Into<String>, total: f64, items: Vec<Item>) -> Self {
        Self {
            date: date.into(),
            total: if total.is_finite() { total } else { 0.0 },
            items,
            warehouse: None,
        }
    }

    /// Attach a warehouse label
    pub fn with_warehouse(mut self, warehouse: impl Into<String>) -> Self {
        self.warehouse = Some(warehouse.into());
        self
    }

    /// Month bucket for this receipt: the first seven characters of the date,
    /// or "unknown" when the date is empty.
    pub fn month_key(&self) -> String {
        month_of(&self.date).unwrap_or_else(|| "unknown".to_string())
    }

    /// Day bucket for this receipt: the exact date, or "unknown" when empty.
    pub fn day_key(&self) -> &str {
        if self.date.is_empty() {
            "unknown"
        } else {
            &self.date
        }
    }

    /// Sum of item quantities on this receipt
    pub fn item_count(&self) -> f64 {
        self.items.iter().map(|i| i.qty).sum()
    }
}

impl Item {
    /// Create a new Item. Empty names fall back to "Unknown Item".
    pub fn new(name: impl Into<String>, qty: f64, price: Option<f64>) -> Self {
        let name = name.into();
        Self {
            name: if name.trim().is_empty() {
                UNKNOWN_ITEM.to_string()
            } else {
                name
            },
            qty,
            price,
        }
    }

    /// Price with absent values counted as zero spend
    pub fn spend(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }
}

/// "YYYY-MM" prefix of a date string, `None` for empty dates.
pub fn month_of(date: &str) -> Option<String> {
    if date.is_empty() {
        return None;
    }
    Some(date.chars().take(7).collect())
}
