//! JSON input boundary.
//!
//! This is the only place input is rejected: the document must be an array
//! whose elements are objects. Everything below that level is defaulted.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;
use wrapped_core::error::{Error, Result, json_kind};

use crate::types::RawReceipt;

/// Read and decode a receipt export from disk
pub fn load_receipts(path: impl AsRef<Path>) -> Result<Vec<RawReceipt>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "read receipt export");
    parse_receipts(&text)
}

/// Decode a receipt export from JSON text
pub fn parse_receipts(text: &str) -> Result<Vec<RawReceipt>> {
    let value: Value = serde_json::from_str(text)?;
    parse_receipts_value(value)
}

/// Decode an already-parsed JSON document
pub fn parse_receipts_value(value: Value) -> Result<Vec<RawReceipt>> {
    let elements = match value {
        Value::Array(elements) => elements,
        other => return Err(Error::NotAnArray(json_kind(&other))),
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            if !element.is_object() {
                return Err(Error::InvalidRecord {
                    index,
                    found: json_kind(&element),
                });
            }
            Ok(serde_json::from_value(element)?)
        })
        .collect()
}
