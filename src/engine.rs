//! Extraction engine.
//!
//! Decoding a payload is a short pipeline:
//!
//! ```text
//! rules (all) ─────────────┐
//!                          │
//! input ── TriggerInfo::scan ── select active rules (signals)
//!          (trigger.rs)    │
//!                          v
//!                Extractor::run (extractor.rs)
//!                  - one regex search per rule, first match wins
//!                  - at most one hit per field
//!                          │
//!                          v
//!                      Vec<Hit> ── MedicineData::from_hits
//! ```
//!
//! The strict strategy (`strict.rs`) replaces the rule pass with a sequential
//! element-string tokenization but yields the same `Hit`s, so everything
//! downstream is shared.
//!
//! ## Responsibilities by module
//!
//! - `trigger.rs`: cheap input classification (`Signals`) used to skip rules
//!   that cannot match.
//! - `extractor.rs`: runs the rule set and collects hits.
//! - `strict.rs`: maps tokenized GS1 elements onto record fields.
//! - `metrics.rs`: per-rule timings for verbose runs.
//!
//! ## Debugging
//!
//! Rule activation and hits are logged with `tracing` at `debug`/`trace`
//! level under the `medscan` target.

#[path = "engine/extractor.rs"]
mod extractor;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/strict.rs"]
mod strict;
#[path = "engine/trigger.rs"]
mod trigger;

pub use extractor::Extractor;
pub use strict::element_hits;
pub use trigger::Signals;
