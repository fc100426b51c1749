//! Expiration date values and two-digit year resolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::Context;

/// Century prefixes tried, in order, when widening a two-digit year.
const CENTURIES: std::ops::RangeInclusive<u32> = 20..=98;

/// Expiration year and month exactly as printed in AI (17), e.g. `"26"` and
/// `"08"`. Leading zeros are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expiry {
    pub month: String,
    pub year: String,
}

impl Expiry {
    /// Four-digit year for this expiry relative to `context`.
    pub fn full_year(&self, context: &Context) -> String {
        context.full_year(&self.year)
    }

    /// Calendar month number, if the raw month is `01..=12`.
    pub fn month_number(&self) -> Option<u32> {
        if self.month.len() != 2 || !self.month.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.month.parse().ok().filter(|m| (1..=12).contains(m))
    }

    /// `MM/YYYY` label with the year resolved against `context`.
    pub fn label(&self, context: &Context) -> String {
        format!("{}/{}", self.month, self.full_year(context))
    }

    /// First day of the expiration month, or `None` when the month is not a
    /// calendar month or the year could not be widened.
    pub fn first_day(&self, context: &Context) -> Option<NaiveDate> {
        let year: i32 = self.full_year(context).parse().ok()?;
        NaiveDate::from_ymd_opt(year, self.month_number()?, 1)
    }
}

/// Widen a two-digit year to the closest four-digit year that is not before
/// `reference_year`.
///
/// Century prefixes 20 through 98 are tried in order and the first
/// `century ‖ year` at or after the reference year is returned. When none
/// qualifies the input comes back unchanged.
///
/// ```
/// assert_eq!(medscan::full_year("25", 2025), "2025");
/// assert_eq!(medscan::full_year("24", 2025), "2124");
/// ```
pub fn full_year(year: &str, reference_year: i32) -> String {
    for century in CENTURIES {
        let Ok(candidate) = format!("{century}{year}").parse::<i64>() else {
            continue;
        };
        if candidate >= i64::from(reference_year) {
            return candidate.to_string();
        }
    }

    year.to_string()
}
