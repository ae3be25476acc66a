//! Dashboard metrics bundle.
//!
//! Field names are serialized in camelCase and form the contract with the
//! dashboard renderer; renaming one is a breaking change.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use wrapped_core::{Category, Receipt};
use wrapped_ingest::{RawReceipt, normalize};

use crate::options::{AggregateOptions, EXPENSIVE_DAYS_LIMIT, TREND_LIMIT};
use crate::table::{Accumulated, ItemAggregate};

/// Days per month used for price-trend periods
pub const DAYS_PER_MONTH: f64 = 30.5;

/// Every summary view the dashboard renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsBundle {
    pub receipts: usize,
    pub total_items: f64,
    pub total_spent: f64,
    pub unique_items: usize,
    /// "YYYY-MM" (or "unknown") → summed receipt totals
    pub monthly: BTreeMap<String, f64>,
    pub category_breakdown: Vec<CategorySpend>,
    pub most_purchased: Vec<ItemAggregate>,
    pub most_expensive: Vec<ExpensiveItem>,
    pub most_total_spent: Vec<ItemAggregate>,
    pub repeat_purchases: Vec<RepeatPurchase>,
    pub price_increases: Vec<PriceIncrease>,
    pub expensive_days: Vec<DaySpend>,
    /// Only present when some receipt names its warehouse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse_totals: Option<BTreeMap<String, f64>>,
    /// The full per-item table in first-encountered order
    pub item_stats: Vec<ItemAggregate>,
}

/// Serialized as a `[category, total]` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "(Category, f64)", from = "(Category, f64)")]
pub struct CategorySpend {
    pub category: Category,
    pub total: f64,
}

impl From<CategorySpend> for (Category, f64) {
    fn from(c: CategorySpend) -> Self {
        (c.category, c.total)
    }
}

impl From<(Category, f64)> for CategorySpend {
    fn from((category, total): (Category, f64)) -> Self {
        Self { category, total }
    }
}

/// Serialized as a `[date, total]` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "(String, f64)", from = "(String, f64)")]
pub struct DaySpend {
    pub date: String,
    pub total: f64,
}

impl From<DaySpend> for (String, f64) {
    fn from(d: DaySpend) -> Self {
        (d.date, d.total)
    }
}

impl From<(String, f64)> for DaySpend {
    fn from((date, total): (String, f64)) -> Self {
        Self { date, total }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatPurchase {
    pub name: String,
    /// Distinct calendar months the item was bought in
    pub months: usize,
    pub qty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceIncrease {
    pub name: String,
    pub min_price: f64,
    pub max_price: f64,
    pub increase: f64,
    /// Earliest to latest purchase, in 30.5-day months
    pub period_months: f64,
    /// `increase / period_months`, zero for a zero-length period
    pub rate_per_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensiveItem {
    pub name: String,
    pub avg_price: f64,
    pub max_price: f64,
    pub total_spent: f64,
    pub qty: f64,
}

/// Aggregate canonical receipts with default options
pub fn aggregate(receipts: &[Receipt]) -> MetricsBundle {
    aggregate_with(receipts, &AggregateOptions::default())
}

/// Normalize raw records, then aggregate them
pub fn aggregate_raw(raw: &[RawReceipt], options: &AggregateOptions) -> MetricsBundle {
    aggregate_with(&normalize(raw), options)
}

/// Aggregate canonical receipts into the dashboard bundle
pub fn aggregate_with(receipts: &[Receipt], options: &AggregateOptions) -> MetricsBundle {
    let acc = Accumulated::collect(receipts, options);
    let limit = options.dashboard_limit;

    let category_breakdown = acc
        .category_spend
        .ranked()
        .into_iter()
        .map(CategorySpend::from)
        .collect();

    let expensive_days = acc
        .days
        .ranked()
        .into_iter()
        .take(EXPENSIVE_DAYS_LIMIT)
        .map(DaySpend::from)
        .collect();

    let warehouse_totals = acc
        .warehouses
        .as_ref()
        .map(|w| w.entries().iter().cloned().collect());

    let bundle = MetricsBundle {
        receipts: acc.receipts,
        total_items: acc.total_items,
        total_spent: acc.total_spent,
        unique_items: acc.items.len(),
        monthly: acc.monthly,
        category_breakdown,
        most_purchased: most_purchased(&acc.items, limit),
        most_expensive: most_expensive(&acc.items, limit),
        most_total_spent: most_total_spent(&acc.items, limit),
        repeat_purchases: repeat_purchases(&acc.items, TREND_LIMIT),
        price_increases: price_increases(&acc.items, TREND_LIMIT),
        expensive_days,
        warehouse_totals,
        item_stats: acc.items,
    };

    debug!(
        receipts = bundle.receipts,
        unique_items = bundle.unique_items,
        total_spent = bundle.total_spent,
        "aggregated dashboard metrics"
    );
    bundle
}

/// Items by quantity, descending; ties keep first-encountered order
pub fn most_purchased(items: &[ItemAggregate], limit: usize) -> Vec<ItemAggregate> {
    let mut ranked = items.to_vec();
    ranked.sort_by(|a, b| b.qty.total_cmp(&a.qty));
    ranked.truncate(limit);
    ranked
}

/// Items by total spend, descending
pub fn most_total_spent(items: &[ItemAggregate], limit: usize) -> Vec<ItemAggregate> {
    let mut ranked = items.to_vec();
    ranked.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
    ranked.truncate(limit);
    ranked
}

/// Items with at least one observed price, by average price descending
pub fn most_expensive(items: &[ItemAggregate], limit: usize) -> Vec<ExpensiveItem> {
    let mut ranked: Vec<ExpensiveItem> = items
        .iter()
        .filter_map(|it| {
            Some(ExpensiveItem {
                name: it.name.clone(),
                avg_price: it.avg_price()?,
                max_price: it.max_price()?,
                total_spent: it.total_spent,
                qty: it.qty,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.avg_price.total_cmp(&a.avg_price));
    ranked.truncate(limit);
    ranked
}

/// Items by number of distinct purchase months, descending
pub fn repeat_purchases(items: &[ItemAggregate], limit: usize) -> Vec<RepeatPurchase> {
    let mut ranked: Vec<RepeatPurchase> = items
        .iter()
        .map(|it| RepeatPurchase {
            name: it.name.clone(),
            months: it.distinct_months(),
            qty: it.qty,
        })
        .collect();
    ranked.sort_by(|a, b| b.months.cmp(&a.months));
    ranked.truncate(limit);
    ranked
}

/// Items seen at two or more distinct prices, by absolute increase descending
pub fn price_increases(items: &[ItemAggregate], limit: usize) -> Vec<PriceIncrease> {
    let mut ranked: Vec<PriceIncrease> = items
        .iter()
        .filter_map(|it| {
            let min_price = it.min_price()?;
            let max_price = it.max_price()?;
            if max_price <= min_price {
                return None;
            }
            let increase = max_price - min_price;
            let period_months = period_months(&it.dates);
            let rate_per_month = if period_months != 0.0 {
                increase / period_months
            } else {
                0.0
            };
            Some(PriceIncrease {
                name: it.name.clone(),
                min_price,
                max_price,
                increase,
                period_months,
                rate_per_month,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.increase.total_cmp(&a.increase));
    ranked.truncate(limit);
    ranked
}

/// Months between the earliest and latest non-empty date.
///
/// Dates are ordered as strings, like the ISO timestamps they are. Zero when
/// fewer than two dates exist or either end does not parse.
pub fn period_months(dates: &[String]) -> f64 {
    let mut sorted: Vec<&str> = dates
        .iter()
        .map(String::as_str)
        .filter(|d| !d.is_empty())
        .collect();
    if sorted.len() < 2 {
        return 0.0;
    }
    sorted.sort_unstable();

    let (Some(first), Some(last)) = (
        parse_instant(sorted[0]),
        parse_instant(sorted[sorted.len() - 1]),
    ) else {
        return 0.0;
    };
    let millis = (last - first).num_milliseconds() as f64;
    millis / (1000.0 * 60.0 * 60.0 * 24.0 * DAYS_PER_MONTH)
}

fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
