//! Reduced bundle for the year-in-review slides.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wrapped_core::{Category, Receipt};

use crate::dashboard::most_purchased;
use crate::options::AggregateOptions;
use crate::table::Accumulated;

/// Food court picks for the closing slide
pub const DELI_ITEMS: [&str; 7] = [
    "Chicken Bake 🍗",
    "$1.50 Hot Dog 🌭",
    "Combo Pizza 🍕",
    "Pepperoni Pizza 🍕",
    "Cheese Pizza 🍕",
    "Sundae 🍦",
    "Chicken Caesar Salad 🥗",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedSlides {
    pub total_spend: f64,
    /// Categories by item count (not spend), Miscellaneous included
    pub top_categories: Vec<CategoryCount>,
    pub top_items: Vec<ItemCount>,
    pub monthly_labels: Vec<String>,
    pub monthly_values: Vec<f64>,
    pub most_expensive_day: Option<ExpensiveDay>,
    pub deli_favorite: String,
}

/// Serialized as a `[category, count]` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "(Category, f64)", from = "(Category, f64)")]
pub struct CategoryCount {
    pub category: Category,
    pub count: f64,
}

impl From<CategoryCount> for (Category, f64) {
    fn from(c: CategoryCount) -> Self {
        (c.category, c.count)
    }
}

impl From<(Category, f64)> for CategoryCount {
    fn from((category, count): (Category, f64)) -> Self {
        Self { category, count }
    }
}

/// Serialized as a `[name, qty]` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "(String, f64)", from = "(String, f64)")]
pub struct ItemCount {
    pub name: String,
    pub qty: f64,
}

impl From<ItemCount> for (String, f64) {
    fn from(it: ItemCount) -> Self {
        (it.name, it.qty)
    }
}

impl From<(String, f64)> for ItemCount {
    fn from((name, qty): (String, f64)) -> Self {
        Self { name, qty }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensiveDay {
    pub date: String,
    pub amount: f64,
}

/// Build the slide bundle with default options
pub fn slides(receipts: &[Receipt]) -> WrappedSlides {
    slides_with(receipts, &AggregateOptions::default())
}

pub fn slides_with(receipts: &[Receipt], options: &AggregateOptions) -> WrappedSlides {
    let acc = Accumulated::collect(receipts, options);
    let limit = options.slide_limit;

    let top_categories = acc
        .category_counts
        .ranked()
        .into_iter()
        .take(limit)
        .map(CategoryCount::from)
        .collect();

    let top_items = most_purchased(&acc.items, limit)
        .into_iter()
        .map(|it| ItemCount {
            name: it.name,
            qty: it.qty,
        })
        .collect();

    // first strictly larger positive day wins
    let mut most_expensive_day: Option<ExpensiveDay> = None;
    for (date, total) in acc.days.entries() {
        let best = most_expensive_day.as_ref().map_or(0.0, |d| d.amount);
        if *total > best {
            most_expensive_day = Some(ExpensiveDay {
                date: date.clone(),
                amount: *total,
            });
        }
    }

    let (monthly_labels, monthly_values) = acc.monthly.into_iter().unzip();

    debug!(
        total_spend = acc.total_spent,
        receipts = acc.receipts,
        "built wrapped slides"
    );

    WrappedSlides {
        total_spend: acc.total_spent,
        top_categories,
        top_items,
        monthly_labels,
        monthly_values,
        most_expensive_day,
        deli_favorite: pick_deli_favorite(acc.total_spent).to_string(),
    }
}

/// `DELI_ITEMS[floor(|total_spend|) mod 7]`. Cosmetic, but stable for a given total.
pub fn pick_deli_favorite(total_spend: f64) -> &'static str {
    if !total_spend.is_finite() {
        return DELI_ITEMS[0];
    }
    let whole = total_spend.abs().floor();
    let index = whole.rem_euclid(DELI_ITEMS.len() as f64) as usize;
    DELI_ITEMS[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapped_core::Item;

    fn sample() -> Vec<Receipt> {
        vec![
            Receipt::new(
                "2024-05-02",
                60.0,
                vec![
                    Item::new("Rotisserie Chicken", 2.0, Some(9.98)),
                    Item::new("Sourdough Bread", 1.0, Some(5.49)),
                    Item::new("Tire Rotation", 1.0, Some(25.0)),
                ],
            ),
            Receipt::new(
                "2024-05-09",
                80.0,
                vec![
                    Item::new("Whole Milk", 3.0, Some(10.47)),
                    Item::new("Greek Yogurt", 2.0, Some(11.98)),
                    Item::new("Pork Shoulder", 1.0, Some(18.0)),
                ],
            ),
            Receipt::new(
                "2024-04-28",
                80.0,
                vec![Item::new("Bagels", 1.0, Some(6.99))],
            ),
        ]
    }

    #[test]
    fn test_top_categories_by_count() {
        let s = slides(&sample());
        assert_eq!(
            s.top_categories,
            vec![
                CategoryCount { category: Category::Dairy, count: 5.0 },
                CategoryCount { category: Category::Meat, count: 3.0 },
                CategoryCount { category: Category::Bakery, count: 2.0 },
                CategoryCount { category: Category::Miscellaneous, count: 1.0 },
            ]
        );
    }

    #[test]
    fn test_top_items_limit() {
        let options = AggregateOptions {
            slide_limit: 2,
            ..Default::default()
        };
        let s = slides_with(&sample(), &options);
        assert_eq!(
            s.top_items,
            vec![
                ItemCount { name: "Whole Milk".into(), qty: 3.0 },
                ItemCount { name: "Rotisserie Chicken".into(), qty: 2.0 },
            ]
        );
        assert_eq!(s.top_categories.len(), 2);
    }

    #[test]
    fn test_most_expensive_day_first_max_wins() {
        let s = slides(&sample());
        assert_eq!(
            s.most_expensive_day,
            Some(ExpensiveDay {
                date: "2024-05-09".into(),
                amount: 80.0
            })
        );
    }

    #[test]
    fn test_no_positive_day() {
        let receipts = vec![Receipt::new("2024-01-01", -4.0, vec![])];
        assert_eq!(slides(&receipts).most_expensive_day, None);
        assert_eq!(slides(&[]).most_expensive_day, None);
    }

    #[test]
    fn test_monthly_series_sorted() {
        let s = slides(&sample());
        assert_eq!(s.monthly_labels, vec!["2024-04", "2024-05"]);
        assert_eq!(s.monthly_values, vec![80.0, 140.0]);
        assert_eq!(s.total_spend, 220.0);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(slides(&sample())).unwrap();
        assert_eq!(json["topCategories"][0], serde_json::json!(["Dairy", 5.0]));
        assert_eq!(json["topItems"][0], serde_json::json!(["Whole Milk", 3.0]));
        assert_eq!(
            json["mostExpensiveDay"],
            serde_json::json!({"date": "2024-05-09", "amount": 80.0})
        );
        assert_eq!(json["monthlyLabels"], serde_json::json!(["2024-04", "2024-05"]));
    }

    #[test]
    fn test_deli_favorite() {
        // 220 mod 7 = 3
        assert_eq!(slides(&sample()).deli_favorite, "Pepperoni Pizza 🍕");
        assert_eq!(pick_deli_favorite(0.0), "Chicken Bake 🍗");
        assert_eq!(pick_deli_favorite(5.99), "Sundae 🍦");
        assert_eq!(pick_deli_favorite(7.0), "Chicken Bake 🍗");
        assert_eq!(pick_deli_favorite(-13.5), "Chicken Caesar Salad 🥗");
        assert_eq!(pick_deli_favorite(f64::NAN), "Chicken Bake 🍗");
    }
}
