use crate::engine::{self, Extractor};
use crate::expiry::Expiry;
use crate::medicine::{Field, MedicineData};
use crate::{Hit, Rule};
use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use std::time::{Duration, Instant};
use tracing::debug;

static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(crate::rules::gs1::rules::get);

/// Decoding context.
///
/// Holds what is needed to interpret a decoded record, currently the date
/// two-digit expiration years are resolved against.
#[derive(Debug, Clone)]
pub struct Context {
    /// Reference date; only its year is used.
    pub reference_date: NaiveDate,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            Self { reference_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap() }
        } else {
            Self { reference_date: Local::now().date_naive() }
        }
    }
}

impl Context {
    pub fn reference_year(&self) -> i32 {
        self.reference_date.year()
    }

    /// Widen a two-digit year against this context's reference year.
    pub fn full_year(&self, year: &str) -> String {
        crate::expiry::full_year(year, self.reference_year())
    }
}

/// How fields are located in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Matching {
    /// Four independent patterns searched anywhere in the payload, first match
    /// wins. Serial and lot are fixed-length and need no separator.
    #[default]
    Lenient,
    /// Sequential GS1 element-string tokenization honoring each AI's length
    /// rules. Serial and lot are variable-length and end at a separator.
    Strict,
}

/// Options that affect decoding.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub matching: Matching,
}

/// One field found in the payload.
///
/// `start`/`end` are byte offsets of the whole match, identifier included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHit {
    /// `"PC"`, `"SN"`, `"LOT"` or `"EXP"`.
    pub field: &'static str,
    pub rule: String,
    pub value: String,
    pub start: usize,
    pub end: usize,
}

/// Time spent on one rule.
#[derive(Debug, Clone)]
pub struct RuleTiming {
    pub rule: String,
    pub duration: Duration,
    pub matched: bool,
}

/// The expiration of a decoded record interpreted against a [`Context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExpiry {
    pub year: String,
    pub month: String,
    /// `MM/YYYY`.
    pub label: String,
    /// First day of the expiration month, when the month is a calendar month.
    pub first_day: Option<NaiveDate>,
}

impl ResolvedExpiry {
    fn new(expiry: &Expiry, context: &Context) -> Self {
        ResolvedExpiry {
            year: expiry.full_year(context),
            month: expiry.month.clone(),
            label: expiry.label(context),
            first_day: expiry.first_day(context),
        }
    }
}

/// Additional details returned by [`decode_verbose_with`].
#[derive(Debug, Clone)]
pub struct DecodeDetails {
    pub total: Duration,
    pub matching: Matching,
    /// Names of the input signals found by the trigger scan.
    pub signals: Vec<&'static str>,
    /// Group Separators in the payload.
    pub separators: usize,
    /// Rules evaluated for this payload (lenient matching only).
    pub active_rules: Vec<String>,
    /// Rules skipped because the payload lacks a signal they need.
    pub skipped_rules: Vec<String>,
    pub hits: Vec<FieldHit>,
    pub timings: Vec<RuleTiming>,
    pub expiration: Option<ResolvedExpiry>,
}

/// Result from [`decode_verbose_with`].
#[derive(Debug, Clone)]
pub struct DecodeVerbose {
    pub text: String,
    pub data: MedicineData,
    pub details: DecodeDetails,
}

/// Decode `text` with default [`Options`].
///
/// # Example
/// ```
/// use medscan::{decode, Field};
///
/// let data = decode("\u{1d}0100012345678905\u{1d}1726083010A1B2C3");
/// assert_eq!(data.lot, Field::Found("A1B2C3".to_string()));
/// assert!(data.sn.is_absent());
/// ```
pub fn decode(text: &str) -> MedicineData {
    decode_with(text, &Options::default())
}

/// Decode `text` with the given `options`.
pub fn decode_with(text: &str, options: &Options) -> MedicineData {
    let hits = match options.matching {
        Matching::Lenient => Extractor::new(text, &DEFAULT_RULES).run(),
        Matching::Strict => engine::element_hits(text),
    };
    MedicineData::from_hits(&hits)
}

/// Decode `text` and return rule-level details, with the expiration resolved
/// against `context`.
///
/// The default [`decode_with`] path does not collect these.
pub fn decode_verbose_with(text: &str, context: &Context, options: &Options) -> DecodeVerbose {
    let started = Instant::now();
    let extractor = Extractor::new(text, &DEFAULT_RULES);
    let trigger = extractor.trigger().clone();

    let (hits, active_rules, skipped_rules, timings) = match options.matching {
        Matching::Lenient => {
            let run = extractor.run_with_metrics();
            let timings = run
                .metrics
                .rules
                .iter()
                .map(|m| RuleTiming { rule: m.rule.to_string(), duration: m.duration, matched: m.matched })
                .collect();
            (run.hits, names(extractor.active_rule_names()), names(extractor.skipped_rule_names()), timings)
        }
        Matching::Strict => (engine::element_hits(text), Vec::new(), Vec::new(), Vec::new()),
    };

    let data = MedicineData::from_hits(&hits);
    let expiration = match &data.exp {
        Field::Found(exp) => Some(ResolvedExpiry::new(exp, context)),
        Field::Absent => None,
    };
    debug!(pc = data.pc.is_found(), exp = expiration.is_some(), "decoded payload");

    let details = DecodeDetails {
        total: started.elapsed(),
        matching: options.matching,
        signals: trigger.signal_names(),
        separators: trigger.separators,
        active_rules,
        skipped_rules,
        hits: hits.iter().map(hit_to_field_hit).collect(),
        timings,
        expiration,
    };

    DecodeVerbose { text: text.to_string(), data, details }
}

fn names(rules: Vec<&'static str>) -> Vec<String> {
    rules.into_iter().map(str::to_string).collect()
}

fn hit_to_field_hit(hit: &Hit) -> FieldHit {
    FieldHit {
        field: hit.field.code(),
        rule: hit.rule_name.to_string(),
        value: hit.value.preview(),
        start: hit.range.start,
        end: hit.range.end,
    }
}
