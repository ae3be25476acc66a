//! Error types for Wrapped

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of receipts, found {0}")]
    NotAnArray(&'static str),

    #[error("Receipt {index} is not a JSON object (found {found})")]
    InvalidRecord { index: usize, found: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Short JSON type name used in error messages
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
