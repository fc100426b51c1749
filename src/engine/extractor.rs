//! Rule-driven field extraction.
//!
//! Each rule searches the whole payload for its pattern and keeps the first
//! match. Rules are independent: one field failing to match never affects
//! another. When several rules target the same field, the earliest rule in
//! the list that produces a value wins.

use super::metrics::{RuleMetrics, RunMetrics, RunResult};
use super::trigger::TriggerInfo;
use crate::{FieldKind, Hit, Range, Rule};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, trace};

/// Applies a rule set to one payload.
///
/// Usage: `Extractor::new(input, &rules)` then `run()` or
/// `run_with_metrics()`.
#[derive(Debug)]
pub struct Extractor<'a> {
    input: &'a str,
    trigger: TriggerInfo,
    /// Rules whose required signals are all present, in rule-list order.
    active: Vec<&'a Rule>,
    /// Rules skipped by the trigger scan.
    skipped: Vec<&'a Rule>,
}

impl<'a> Extractor<'a> {
    pub fn new(input: &'a str, rules: &'a [Rule]) -> Self {
        let trigger = TriggerInfo::scan(input);
        debug!(signals = ?trigger.signals, separators = trigger.separators, "trigger scan");

        let (active, skipped): (Vec<&Rule>, Vec<&Rule>) =
            rules.iter().partition(|rule| trigger.signals.contains(rule.signals));

        debug!(active = active.len(), skipped = skipped.len(), "rule selection");
        for rule in &skipped {
            trace!(rule = rule.name, required = ?rule.signals, "rule skipped");
        }

        Extractor { input, trigger, active, skipped }
    }

    pub fn trigger(&self) -> &TriggerInfo {
        &self.trigger
    }

    pub fn active_rule_names(&self) -> Vec<&'static str> {
        self.active.iter().map(|rule| rule.name).collect()
    }

    pub fn skipped_rule_names(&self) -> Vec<&'static str> {
        self.skipped.iter().map(|rule| rule.name).collect()
    }

    pub fn run(&self) -> Vec<Hit> {
        let mut filled: HashSet<FieldKind> = HashSet::new();
        let mut hits = Vec::new();

        for rule in &self.active {
            if filled.contains(&rule.field) {
                continue;
            }
            if let Some(hit) = self.apply(rule) {
                filled.insert(hit.field);
                hits.push(hit);
            }
        }

        hits
    }

    pub fn run_with_metrics(&self) -> RunResult {
        let started = Instant::now();
        let mut filled: HashSet<FieldKind> = HashSet::new();
        let mut hits = Vec::new();
        let mut rules = Vec::with_capacity(self.active.len());

        for rule in &self.active {
            if filled.contains(&rule.field) {
                continue;
            }
            let rule_started = Instant::now();
            let hit = self.apply(rule);
            rules.push(RuleMetrics { rule: rule.name, duration: rule_started.elapsed(), matched: hit.is_some() });
            if let Some(hit) = hit {
                filled.insert(hit.field);
                hits.push(hit);
            }
        }

        RunResult { hits, metrics: RunMetrics { total: started.elapsed(), rules } }
    }

    /// Search the payload with one rule; the first match is the only one
    /// considered.
    fn apply(&self, rule: &Rule) -> Option<Hit> {
        let Some(caps) = rule.pattern.captures(self.input) else {
            trace!(rule = rule.name, "no match");
            return None;
        };
        let whole = caps.get(0)?;

        let Some(value) = (rule.production)(&caps) else {
            debug!(rule = rule.name, start = whole.start(), "production returned nothing");
            return None;
        };

        debug!(rule = rule.name, field = rule.field.code(), start = whole.start(), end = whole.end(), "hit");
        Some(Hit { range: Range { start: whole.start(), end: whole.end() }, field: rule.field, value, rule_name: rule.name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Signals;
    use crate::FieldValue;

    fn test_rules() -> Vec<Rule> {
        vec![
            rule! {
                name: "digits after x",
                field: FieldKind::Lot,
                pattern: r"x([0-9]{3})",
                signals: Signals::HAS_DIGITS,
                prod: |caps| { Some(FieldValue::Text(caps.get(1)?.as_str().to_string())) }
            },
            rule! {
                name: "digits after y",
                field: FieldKind::Lot,
                pattern: r"y([0-9]{3})",
                prod: |caps| { Some(FieldValue::Text(caps.get(1)?.as_str().to_string())) }
            },
            rule! {
                name: "separated serial",
                field: FieldKind::SerialNumber,
                pattern: r"\x1D([0-9]{2})",
                signals: Signals::HAS_GROUP_SEPARATOR | Signals::HAS_DIGITS,
                prod: |caps| { Some(FieldValue::Text(caps.get(1)?.as_str().to_string())) }
            },
        ]
    }

    #[test]
    fn first_rule_for_a_field_wins() {
        let rules = test_rules();
        let hits = Extractor::new("y222 x111 x333", &rules).run();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, FieldValue::Text("111".to_string()));
        assert_eq!(hits[0].rule_name, "digits after x");
        assert_eq!(hits[0].range, Range { start: 5, end: 9 });
    }

    #[test]
    fn later_rule_fills_field_when_earlier_misses() {
        let rules = test_rules();
        let hits = Extractor::new("y222", &rules).run();
        assert_eq!(hits[0].rule_name, "digits after y");
    }

    #[test]
    fn rules_without_their_signals_are_skipped() {
        let rules = test_rules();
        let extractor = Extractor::new("x123", &rules);
        assert_eq!(extractor.active_rule_names(), vec!["digits after x", "digits after y"]);
        assert_eq!(extractor.skipped_rule_names(), vec!["separated serial"]);
    }

    #[test]
    fn metrics_cover_each_evaluated_rule() {
        let rules = test_rules();
        let run = Extractor::new("x123\u{1d}45", &rules).run_with_metrics();
        assert_eq!(run.hits.len(), 2);
        let evaluated: Vec<_> = run.metrics.rules.iter().map(|m| (m.rule, m.matched)).collect();
        assert_eq!(evaluated, vec![("digits after x", true), ("separated serial", true)]);
    }
}
