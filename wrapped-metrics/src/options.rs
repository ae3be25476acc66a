use serde::{Deserialize, Serialize};

/// Rows kept in the repeat-purchase and price-increase tables
pub const TREND_LIMIT: usize = 10;
/// Rows kept in the expensive-days table
pub const EXPENSIVE_DAYS_LIMIT: usize = 5;

/// Knobs for one aggregation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateOptions {
    /// Drop standalone ORG/ORGANIC tokens before grouping items by name
    pub strip_organic: bool,
    /// Rows in the dashboard item rankings
    pub dashboard_limit: usize,
    /// Rows in the slide rankings
    pub slide_limit: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            strip_organic: false,
            dashboard_limit: 10,
            slide_limit: 5,
        }
    }
}
