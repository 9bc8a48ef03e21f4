use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::Row;

/// Known header misspellings and the canonical field they stand for.
static HEADER_CORRECTIONS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| HashMap::from([("city_namte", "city_name")]));

/// Trim and lowercase a header, then apply the correction table.
pub fn normalize_field_name(header: &str) -> String {
    let normalized = header.trim().to_lowercase();

    match HEADER_CORRECTIONS.get(normalized.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => normalized,
    }
}

/// Re-key a decoded row by canonical field names. Unknown headers survive
/// with only trim + lowercase applied.
pub fn normalize_row(row: Row) -> Row {
    row.into_iter()
        .map(|(key, value)| (normalize_field_name(&key), value))
        .collect()
}
