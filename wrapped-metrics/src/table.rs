//! Single accumulation pass over canonical receipts.
//!
//! Everything here is rebuilt per call and dropped once the bundles are
//! projected out of it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use wrapped_core::{Category, Receipt, categorize, month_of};
use wrapped_ingest::strip_organic;

use crate::options::AggregateOptions;

/// Accumulated statistics for one distinct item name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAggregate {
    pub name: String,
    pub qty: f64,
    pub total_spent: f64,
    /// Observed prices in encounter order; lines without a price add nothing
    pub prices: Vec<f64>,
    /// Receipt date of every line, in encounter order
    pub dates: Vec<String>,
}

impl ItemAggregate {
    fn new(name: String) -> Self {
        Self {
            name,
            qty: 0.0,
            total_spent: 0.0,
            prices: Vec::new(),
            dates: Vec::new(),
        }
    }

    pub fn min_price(&self) -> Option<f64> {
        self.prices.iter().copied().reduce(f64::min)
    }

    pub fn max_price(&self) -> Option<f64> {
        self.prices.iter().copied().reduce(f64::max)
    }

    /// Mean of observed prices
    pub fn avg_price(&self) -> Option<f64> {
        if self.prices.is_empty() {
            return None;
        }
        Some(self.prices.iter().sum::<f64>() / self.prices.len() as f64)
    }

    /// Number of distinct "YYYY-MM" months among non-empty dates
    pub fn distinct_months(&self) -> usize {
        let mut months: Vec<String> = self.dates.iter().filter_map(|d| month_of(d)).collect();
        months.sort_unstable();
        months.dedup();
        months.len()
    }
}

/// Insertion-ordered sum per key
#[derive(Debug, Clone)]
pub(crate) struct Tally<K> {
    entries: Vec<(K, f64)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn add(&mut self, key: K, amount: f64) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    /// Entries in first-encountered order
    pub fn entries(&self) -> &[(K, f64)] {
        &self.entries
    }

    /// Entries sorted descending by amount; ties keep first-encountered order
    pub fn ranked(&self) -> Vec<(K, f64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// Everything one pass over the receipts collects
#[derive(Debug, Clone)]
pub(crate) struct Accumulated {
    pub receipts: usize,
    pub total_items: f64,
    pub total_spent: f64,
    pub items: Vec<ItemAggregate>,
    pub monthly: BTreeMap<String, f64>,
    pub days: Tally<String>,
    pub category_spend: Tally<Category>,
    pub category_counts: Tally<Category>,
    pub warehouses: Option<Tally<String>>,
}

impl Accumulated {
    pub fn collect(receipts: &[Receipt], options: &AggregateOptions) -> Self {
        let mut items: Vec<ItemAggregate> = Vec::new();
        let mut item_index: HashMap<String, usize> = HashMap::new();
        let mut monthly = BTreeMap::new();
        let mut days = Tally::new();
        let mut category_spend = Tally::new();
        let mut category_counts = Tally::new();
        let mut total_items = 0.0;
        let mut total_spent = 0.0;

        let has_warehouses = receipts.iter().any(|r| r.warehouse.is_some());
        let mut warehouses = has_warehouses.then(Tally::new);

        for receipt in receipts {
            total_spent += receipt.total;
            *monthly.entry(receipt.month_key()).or_insert(0.0) += receipt.total;
            days.add(receipt.day_key().to_string(), receipt.total);
            if let Some(w) = warehouses.as_mut() {
                let label = receipt.warehouse.as_deref().unwrap_or("Unknown");
                w.add(label.to_string(), receipt.total);
            }

            for item in &receipt.items {
                total_items += item.qty;

                // categories always see the canonical name
                let category = categorize(&item.name);
                category_counts.add(category, item.qty);
                if !category.is_catch_all() {
                    category_spend.add(category, item.spend());
                }

                let key = if options.strip_organic {
                    strip_organic(&item.name)
                } else {
                    item.name.clone()
                };
                let slot = match item_index.get(&key) {
                    Some(&i) => i,
                    None => {
                        item_index.insert(key.clone(), items.len());
                        items.push(ItemAggregate::new(key));
                        items.len() - 1
                    }
                };

                let record = &mut items[slot];
                record.qty += item.qty;
                record.total_spent += item.spend();
                if let Some(price) = item.price {
                    record.prices.push(price);
                }
                record.dates.push(receipt.date.clone());
            }
        }

        Self {
            receipts: receipts.len(),
            total_items,
            total_spent,
            items,
            monthly,
            days,
            category_spend,
            category_counts,
            warehouses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapped_core::Item;

    fn receipts() -> Vec<Receipt> {
        vec![
            Receipt::new(
                "2024-03-01",
                12.5,
                vec![
                    Item::new("ORGANIC BANANA", 3.0, Some(4.5)),
                    Item::new("PAPER TOWEL", 1.0, None),
                ],
            ),
            Receipt::new(
                "2024-04-01",
                20.0,
                vec![Item::new("BANANA", 2.0, Some(3.0))],
            ),
        ]
    }

    #[test]
    fn test_items_keyed_by_name() {
        let acc = Accumulated::collect(&receipts(), &AggregateOptions::default());
        assert_eq!(acc.items.len(), 3);
        assert_eq!(acc.items[0].name, "ORGANIC BANANA");
        assert_eq!(acc.items[1].prices, Vec::<f64>::new());
        assert_eq!(acc.items[1].dates, vec!["2024-03-01"]);
        assert_eq!(acc.total_items, 6.0);
        assert!(acc.warehouses.is_none());
    }

    #[test]
    fn test_strip_organic_merges_keys() {
        let options = AggregateOptions {
            strip_organic: true,
            ..Default::default()
        };
        let acc = Accumulated::collect(&receipts(), &options);
        assert_eq!(acc.items.len(), 2);
        let banana = &acc.items[0];
        assert_eq!(banana.name, "BANANA");
        assert_eq!(banana.qty, 5.0);
        assert_eq!(banana.total_spent, 7.5);
        assert_eq!(banana.prices, vec![4.5, 3.0]);
        assert_eq!(banana.distinct_months(), 2);
    }

    #[test]
    fn test_category_tallies() {
        let acc = Accumulated::collect(&receipts(), &AggregateOptions::default());
        assert_eq!(acc.category_spend.entries(), &[(Category::Produce, 7.5)]);
        assert_eq!(
            acc.category_counts.entries(),
            &[(Category::Produce, 5.0), (Category::Miscellaneous, 1.0)]
        );
    }

    #[test]
    fn test_tally_ranked_is_stable() {
        let mut t = Tally::new();
        t.add("a", 1.0);
        t.add("b", 3.0);
        t.add("c", 1.0);
        t.add("a", 2.0);
        assert_eq!(t.ranked(), vec![("a", 3.0), ("b", 3.0), ("c", 1.0)]);
    }

    #[test]
    fn test_price_helpers() {
        let mut agg = ItemAggregate::new("EGGS".into());
        assert_eq!(agg.avg_price(), None);
        agg.prices = vec![6.0, 4.0, 8.0];
        assert_eq!(agg.min_price(), Some(4.0));
        assert_eq!(agg.max_price(), Some(8.0));
        assert_eq!(agg.avg_price(), Some(6.0));
    }

    #[test]
    fn test_distinct_months_ignores_empty_dates() {
        let mut agg = ItemAggregate::new("EGGS".into());
        agg.dates = vec![
            "2024-01-03".into(),
            "".into(),
            "2024-01-20T10:00:00".into(),
            "2024-02-01".into(),
        ];
        assert_eq!(agg.distinct_months(), 2);
    }
}
