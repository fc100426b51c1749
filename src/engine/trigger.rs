//! Trigger scanning (input pre-classification).
//!
//! Every extraction pattern needs some digits and most need a Group
//! Separator. Scanning for those once lets the extractor skip rules that
//! cannot possibly match, e.g. all of them for a plain EAN-13 scan of
//! `"4006381333931"` except the ones keyed on digits alone.
//!
//! This is a heuristic pre-filter: a present signal does not imply a match,
//! but a missing signal always implies no match.

use crate::element_string::GROUP_SEPARATOR;

bitflags::bitflags! {
    /// Coarse characteristics of a payload.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Signals: u8 {
        const HAS_GROUP_SEPARATOR = 1 << 0;
        const HAS_DIGITS          = 1 << 1;
        const HAS_SYMBOLOGY_ID    = 1 << 2;
    }
}

#[derive(Debug, Clone)]
pub struct TriggerInfo {
    pub signals: Signals,
    /// Number of Group Separators in the payload.
    pub separators: usize,
}

impl TriggerInfo {
    pub fn scan(input: &str) -> Self {
        let mut signals = Signals::empty();

        let separators = input.matches(GROUP_SEPARATOR).count();
        if separators > 0 {
            signals |= Signals::HAS_GROUP_SEPARATOR;
        }
        if input.bytes().any(|b| b.is_ascii_digit()) {
            signals |= Signals::HAS_DIGITS;
        }
        if input.starts_with(']') {
            signals |= Signals::HAS_SYMBOLOGY_ID;
        }

        TriggerInfo { signals, separators }
    }

    /// Names of the signals that are set, for reports.
    pub fn signal_names(&self) -> Vec<&'static str> {
        self.signals.iter_names().map(|(name, _)| name).collect()
    }
}
