//! Per-field patterns for GS1 medicine pack payloads.

pub mod helpers;
pub mod rules;

#[cfg(test)]
mod tests;
