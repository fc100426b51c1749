//! Strict matching: map tokenized GS1 elements onto record fields.
//!
//! AI (01) fills `PC`, AI (21) `SN`, AI (10) `LOT` and AI (17) `EXP`. Only the
//! elements read before the first malformed one are used.

use crate::element_string::{Element, scan};
use crate::expiry::Expiry;
use crate::{FieldKind, FieldValue, Hit, Range};
use tracing::debug;

pub fn element_hits(input: &str) -> Vec<Hit> {
    let (elements, error) = scan(input);
    if let Some(err) = error {
        debug!(%err, parsed = elements.len(), "element string stopped early");
    }

    elements.iter().filter_map(element_hit).collect()
}

fn element_hit(element: &Element) -> Option<Hit> {
    let (field, rule_name, value) = match element.ai {
        "01" => (FieldKind::ProductCode, "AI (01) GTIN", FieldValue::Text(element.value.clone())),
        "21" => (FieldKind::SerialNumber, "AI (21) serial", FieldValue::Text(element.value.clone())),
        "10" => (FieldKind::Lot, "AI (10) batch/lot", FieldValue::Text(element.value.clone())),
        "17" => {
            // YYMMDD, numeric-checked by the tokenizer.
            let expiry = Expiry { year: element.value[0..2].to_string(), month: element.value[2..4].to_string() };
            (FieldKind::Expiration, "AI (17) expiry", FieldValue::Expiry(expiry))
        }
        _ => return None,
    };

    Some(Hit { range: Range { start: element.start, end: element.end }, field, value, rule_name })
}
