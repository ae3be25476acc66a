//! wrapped-metrics: item aggregation, the dashboard metrics bundle and the slide bundle

pub mod dashboard;
pub mod options;
pub mod slides;
pub mod table;

pub use dashboard::{
    CategorySpend, DaySpend, ExpensiveItem, MetricsBundle, PriceIncrease, RepeatPurchase,
    aggregate, aggregate_raw, aggregate_with,
};
pub use options::AggregateOptions;
pub use slides::{CategoryCount, DELI_ITEMS, ExpensiveDay, ItemCount, WrappedSlides, pick_deli_favorite, slides, slides_with};
pub use table::ItemAggregate;
