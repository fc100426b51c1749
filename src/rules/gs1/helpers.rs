use crate::FieldValue;
use crate::expiry::Expiry;
use regex::Captures;

/// Capture group `idx` as a text value.
pub fn group_text(caps: &Captures<'_>, idx: usize) -> Option<FieldValue> {
    caps.get(idx).map(|m| FieldValue::Text(m.as_str().to_string()))
}

/// Build an expiry from the year and month capture groups, kept verbatim.
pub fn group_expiry(caps: &Captures<'_>, year_idx: usize, month_idx: usize) -> Option<FieldValue> {
    let year = caps.get(year_idx)?.as_str().to_string();
    let month = caps.get(month_idx)?.as_str().to_string();
    Some(FieldValue::Expiry(Expiry { month, year }))
}
