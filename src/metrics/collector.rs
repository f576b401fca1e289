use std::collections::BTreeMap;

use tokio::{sync::mpsc, task::JoinHandle, time::Instant};

use super::{CheckLedger, CheckRecord, TagCounts};
use crate::args::StepId;

/// Spawns the task that folds check records into per-tag counts. The task
/// finishes once every sender clone has been dropped, so workers signal
/// completion simply by going away.
#[must_use]
pub fn setup_check_collector(
    run_start: Instant,
    mut checks_rx: mpsc::Receiver<CheckRecord>,
) -> JoinHandle<CheckLedger> {
    tokio::spawn(async move {
        let mut checks: BTreeMap<StepId, TagCounts> = BTreeMap::new();
        while let Some(record) = checks_rx.recv().await {
            checks.entry(record.tag).or_default().record(record.passed);
        }

        CheckLedger {
            duration: run_start.elapsed(),
            checks,
        }
    })
}
