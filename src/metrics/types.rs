use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::args::StepId;

/// One pass/fail observation for a tagged step. Append-only; the collector
/// folds records into per-tag counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckRecord {
    pub tag: StepId,
    pub passed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagCounts {
    pub passed: u64,
    pub failed: u64,
}

impl TagCounts {
    pub fn record(&mut self, passed: bool) {
        if passed {
            self.passed = self.passed.saturating_add(1);
        } else {
            self.failed = self.failed.saturating_add(1);
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.passed.saturating_add(self.failed)
    }
}

/// What the collector hands back once every check sender is gone.
#[derive(Debug)]
pub struct CheckLedger {
    pub duration: Duration,
    pub checks: BTreeMap<StepId, TagCounts>,
}

/// Final run report: the ledger plus scheduler totals, ready for the summary
/// table and the CSV/JSON sinks.
#[derive(Debug)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub iterations: u64,
    pub vus: usize,
    pub iterations_completed: u64,
    pub checks: BTreeMap<StepId, TagCounts>,
}

impl RunReport {
    #[must_use]
    pub fn total_passed(&self) -> u64 {
        self.checks
            .values()
            .fold(0u64, |sum, counts| sum.saturating_add(counts.passed))
    }

    #[must_use]
    pub fn total_failed(&self) -> u64 {
        self.checks
            .values()
            .fold(0u64, |sum, counts| sum.saturating_add(counts.failed))
    }

    #[must_use]
    pub fn total_checks(&self) -> u64 {
        self.total_passed().saturating_add(self.total_failed())
    }
}
