//! CSV export of the per-item table

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use wrapped_metrics::ItemAggregate;

#[derive(Debug, Serialize)]
struct ItemRow<'a> {
    name: &'a str,
    qty: f64,
    total_spent: f64,
    purchases: usize,
    months: usize,
    min_price: Option<f64>,
    max_price: Option<f64>,
    avg_price: Option<f64>,
}

/// Write one CSV row per item, in first-encountered order
pub fn write_items_csv<W: Write>(items: &[ItemAggregate], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for it in items {
        wtr.serialize(ItemRow {
            name: &it.name,
            qty: it.qty,
            total_spent: it.total_spent,
            purchases: it.dates.len(),
            months: it.distinct_months(),
            min_price: it.min_price(),
            max_price: it.max_price(),
            avg_price: it.avg_price(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}
