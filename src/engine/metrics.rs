//! Run metrics for verbose decoding.
//!
//! `Extractor::run` stays allocation-light; `Extractor::run_with_metrics`
//! additionally times every active rule so the CLI report can show where a
//! decode spent its time.

use crate::Hit;
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    /// One entry per active rule, in evaluation order.
    pub rules: Vec<RuleMetrics>,
}

#[derive(Debug, Clone)]
pub struct RuleMetrics {
    pub rule: &'static str,
    pub duration: Duration,
    pub matched: bool,
}

/// Extractor output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub hits: Vec<Hit>,
    pub metrics: RunMetrics,
}
