//! Raw receipt records → canonical receipts.
//!
//! Total and order preserving: output receipt `i` comes from input record `i`
//! and missing data always degrades to a default instead of failing.

use tracing::debug;
use wrapped_core::{Item, Receipt};

use crate::names::clean_name;
use crate::types::{RawItem, RawReceipt};

/// Normalize every raw record, preserving order
pub fn normalize(raw: &[RawReceipt]) -> Vec<Receipt> {
    let receipts: Vec<Receipt> = raw.iter().map(normalize_receipt).collect();
    debug!(
        receipts = receipts.len(),
        items = receipts.iter().map(|r| r.items.len()).sum::<usize>(),
        "normalized receipts"
    );
    receipts
}

/// Normalize one raw record
pub fn normalize_receipt(raw: &RawReceipt) -> Receipt {
    let date = first_present(&[&raw.transaction_date, &raw.transaction_date_time])
        .unwrap_or_default();

    let items = raw
        .item_array
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(normalize_item)
        .collect();

    let mut receipt = Receipt::new(date, resolve_total(raw), items);
    receipt.warehouse = first_present(&[&raw.warehouse_name, &raw.warehouse_short_name]);
    receipt
}

/// Normalize one raw line item
pub fn normalize_item(raw: &RawItem) -> Item {
    let name = clean_name(
        raw.item_description01.as_deref(),
        raw.item_description02.as_deref(),
        raw.item_number.as_deref(),
    );
    let qty = truthy(raw.unit).unwrap_or(1.0);
    let price = truthy(raw.amount);
    Item::new(name, qty, price)
}

/// Explicit total, else subtotal plus taxes when both exist, else zero.
///
/// A zero total counts as missing, so a genuine $0.00 receipt falls through
/// to the subtotal/taxes branch. Downstream consumers depend on this.
fn resolve_total(raw: &RawReceipt) -> f64 {
    if let Some(total) = truthy(raw.total) {
        return total;
    }
    match (raw.sub_total, raw.taxes) {
        (Some(sub), Some(taxes)) => sub + taxes,
        _ => 0.0,
    }
}

/// Zero counts as absent
fn truthy(n: Option<f64>) -> Option<f64> {
    n.filter(|v| *v != 0.0)
}

/// First non-empty string in priority order
fn first_present(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
