//! Item name cleaning.
//!
//! Receipts carry two description fields per line. Either may hold a real
//! product name, a bare SKU code, or trailing `#` codes; these helpers pick
//! the most readable one.

use regex::Regex;
use std::sync::LazyLock;
use wrapped_core::UNKNOWN_ITEM;

static SKU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{6,}$").expect("SKU pattern is valid"));

static ORGANIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:ORG|ORGANIC)\b").expect("organic pattern is valid"));

/// Drop everything from the first `#` on, then trim.
/// Returns `None` when nothing readable is left.
pub fn strip_hash_codes(s: &str) -> Option<&str> {
    let head = s.split('#').next().unwrap_or("").trim();
    (!head.is_empty()).then_some(head)
}

/// Six or more uppercase letters/digits once internal whitespace is removed
pub fn looks_like_sku(s: &str) -> bool {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    SKU_RE.is_match(&compact)
}

/// Pick a display name from the two description fields and the item number.
///
/// Precedence:
/// 1. description 1, unless it looks like a SKU
/// 2. description 2, unless it looks like a SKU
/// 3. both descriptions joined as "desc1 — desc2"
/// 4. whichever of desc1, desc2, item number is non-empty
/// 5. "Unknown Item"
pub fn clean_name(desc1: Option<&str>, desc2: Option<&str>, item_number: Option<&str>) -> String {
    let d1 = desc1.and_then(strip_hash_codes);
    let d2 = desc2.and_then(strip_hash_codes);

    let readable = [d1, d2]
        .into_iter()
        .flatten()
        .find(|d| !looks_like_sku(d));
    if let Some(name) = readable {
        return name.to_string();
    }

    if let (Some(a), Some(b)) = (d1, d2) {
        return format!("{a} — {b}");
    }

    let number = item_number.map(str::trim).filter(|n| !n.is_empty());
    d1.or(d2)
        .or(number)
        .unwrap_or(UNKNOWN_ITEM)
        .to_string()
}

/// Remove standalone "ORG"/"ORGANIC" tokens (any case) and collapse whitespace.
///
/// Names made only of those tokens are returned unchanged so the result is
/// never empty.
pub fn strip_organic(name: &str) -> String {
    let stripped = ORGANIC_RE.replace_all(name, " ");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        name.trim().to_string()
    } else {
        collapsed
    }
}
