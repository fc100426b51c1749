//! The four field rules.
//!
//! Every pattern is searched anywhere in the payload and only its first match
//! counts. A value character is anything but a line terminator (LF, CR,
//! U+2028, U+2029), so a Group Separator can be part of a captured value.
//! Lengths count characters. Digits are ASCII only.

use super::helpers::{group_expiry, group_text};
use crate::engine::Signals;
use crate::{FieldKind, Rule};

/// GS, `01`, then the 14-character product code.
pub fn rule_product_code() -> Rule {
    rule! {
        name: "GS 01 <product code>",
        field: FieldKind::ProductCode,
        pattern: r"\x1D01([^\n\r\x{2028}\x{2029}]{14})",
        signals: Signals::HAS_GROUP_SEPARATOR | Signals::HAS_DIGITS,
        prod: |caps| { group_text(caps, 1) }
    }
}

/// `21`, then a 14-character serial. No separator is required in front, so
/// this also fires on a `21` inside another field's data.
pub fn rule_serial_number() -> Rule {
    rule! {
        name: "21 <serial number>",
        field: FieldKind::SerialNumber,
        pattern: r"21([^\n\r\x{2028}\x{2029}]{14})",
        signals: Signals::HAS_DIGITS,
        prod: |caps| { group_text(caps, 1) }
    }
}

/// `3010`, then a 6-character lot: AI (10) as it follows AI (30) on the
/// labels this targets.
pub fn rule_lot() -> Rule {
    rule! {
        name: "3010 <lot>",
        field: FieldKind::Lot,
        pattern: r"3010([^\n\r\x{2028}\x{2029}]{6})",
        signals: Signals::HAS_DIGITS,
        prod: |caps| { group_text(caps, 1) }
    }
}

/// GS, `17`, then YY and MM. The day digits that follow are not read.
pub fn rule_expiration() -> Rule {
    rule! {
        name: "GS 17 <yy><mm>",
        field: FieldKind::Expiration,
        pattern: r"\x1D17([0-9]{2})([0-9]{2})",
        signals: Signals::HAS_GROUP_SEPARATOR | Signals::HAS_DIGITS,
        prod: |caps| { group_expiry(caps, 1, 2) }
    }
}

pub fn get() -> Vec<Rule> {
    vec![rule_product_code(), rule_serial_number(), rule_lot(), rule_expiration()]
}
