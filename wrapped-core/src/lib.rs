//! wrapped-core: canonical receipt types, spend categories and the keyword categorizer

pub mod category;
pub mod error;
pub mod receipt;

pub use category::{Category, CategoryRule, RULES, categorize, categorize_with};
pub use error::{Error, Result};
pub use receipt::{Item, Receipt, UNKNOWN_ITEM, month_of};
