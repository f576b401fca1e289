//! Per-tag pass/fail check collection and the final run report.
mod collector;
mod types;

#[cfg(test)]
mod tests;

pub use collector::setup_check_collector;
pub use types::{CheckLedger, CheckRecord, RunReport, TagCounts};
