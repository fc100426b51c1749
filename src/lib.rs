//! GS1 DataMatrix payload decoding for medicine packaging.
//!
//! A scanned DataMatrix on a medicine pack decodes to a GS1 element string:
//! Application Identifiers (AIs) followed by their data, with the ASCII Group
//! Separator (GS, `0x1D`) terminating variable-length fields. This crate pulls
//! the four fields a pharmacy reminder needs out of that string:
//!
//! | Field | AI | Shape |
//! |-------|----|-------|
//! | `PC`  | 01 | GS + `01` + 14 characters |
//! | `SN`  | 21 | `21` + 14 characters |
//! | `LOT` | 10 | `3010` + 6 characters |
//! | `EXP` | 17 | GS + `17` + YY + MM |
//!
//! ```
//! use medscan::{decode, Field};
//!
//! let data = decode("\u{1d}0100012345678905\u{1d}17260831\u{1d}3010A1B2C3");
//! assert_eq!(data.pc, Field::Found("00012345678905".to_string()));
//!
//! let exp = data.exp.as_option().unwrap();
//! assert_eq!((exp.year.as_str(), exp.month.as_str()), ("26", "08"));
//! assert_eq!(medscan::full_year(&exp.year, 2025), "2026");
//! ```
//!
//! Absence of a field is never an error: every field is looked up on its own
//! and comes back as [`Field::Absent`] when it is not there.

use regex::{Captures, Regex};

#[macro_use]
mod macros;
mod api;
mod element_string;
mod engine;
mod error;
mod expiry;
mod gtin;
mod medicine;
mod reminder;
mod rules;

pub use api::{
    Context, DecodeDetails, DecodeVerbose, FieldHit, Matching, Options, ResolvedExpiry, RuleTiming, decode,
    decode_verbose_with, decode_with,
};
pub use element_string::{AiDefinition, DataLength, Element, GROUP_SEPARATOR, lookup_ai, parse_element_strings};
pub use error::{Error, Result};
pub use expiry::{Expiry, full_year};
pub use gtin::{compute_check_digit, gtin_check_digit_valid};
pub use medicine::{Field, MedicineData};
pub use reminder::{ReminderDraft, ReminderMethod, ReminderOverride};

use crate::engine::Signals;

// --- Internal types ---------------------------------------------------------

/// The record slot a rule fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum FieldKind {
    ProductCode,
    SerialNumber,
    Lot,
    Expiration,
}

impl FieldKind {
    /// Short label used in the JSON record and in reports.
    pub(crate) fn code(self) -> &'static str {
        match self {
            FieldKind::ProductCode => "PC",
            FieldKind::SerialNumber => "SN",
            FieldKind::Lot => "LOT",
            FieldKind::Expiration => "EXP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldValue {
    Text(String),
    Expiry(Expiry),
}

impl FieldValue {
    pub(crate) fn preview(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Expiry(exp) => format!("year={} month={}", exp.year, exp.month),
        }
    }
}

pub(crate) type Production = fn(&Captures<'_>) -> Option<FieldValue>;

/// An extraction rule: a name, the field it fills, a regex searched anywhere
/// in the payload, and a production that turns the first match into a value.
///
/// `signals` lists the input characteristics the pattern cannot match
/// without; rules whose signals are missing from the input are skipped.
pub(crate) struct Rule {
    pub name: &'static str,
    pub field: FieldKind,
    pub pattern: &'static Regex,
    pub production: Production,
    pub signals: Signals,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("field", &self.field)
            .field("pattern", &self.pattern.as_str())
            .field("production", &"<function>")
            .field("signals", &self.signals)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

/// A field value found in the payload, with the span of the whole match
/// (identifier included) and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Hit {
    pub range: Range,
    pub field: FieldKind,
    pub value: FieldValue,
    pub rule_name: &'static str,
}
