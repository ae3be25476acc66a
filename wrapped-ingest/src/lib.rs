//! wrapped-ingest: raw receipt decoding, the JSON input boundary, and normalization
//! into canonical receipts.

pub mod json;
pub mod lenient;
pub mod names;
pub mod normalize;
pub mod types;

pub use json::{load_receipts, parse_receipts, parse_receipts_value};
pub use names::{clean_name, looks_like_sku, strip_hash_codes, strip_organic};
pub use normalize::{normalize, normalize_item, normalize_receipt};
pub use types::{RawItem, RawReceipt};
