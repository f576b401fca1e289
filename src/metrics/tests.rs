use tokio::sync::mpsc;
use tokio::time::Instant;

use super::collector::setup_check_collector;
use super::types::{CheckRecord, TagCounts};
use crate::args::StepId;

#[test]
fn tag_counts_split_passes_and_failures() {
    let mut counts = TagCounts::default();
    counts.record(true);
    counts.record(true);
    counts.record(false);
    assert_eq!(counts.passed, 2);
    assert_eq!(counts.failed, 1);
    assert_eq!(counts.total(), 3);
}

#[test]
fn collector_aggregates_per_tag() -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("runtime failed: {}", err))?;
    runtime.block_on(async {
        let (checks_tx, checks_rx) = mpsc::channel(16);
        let collector = setup_check_collector(Instant::now(), checks_rx);

        let records = [
            (StepId::Login, true),
            (StepId::Dashboard, true),
            (StepId::Dashboard, false),
            (StepId::Dashboard, true),
            (StepId::Submit, false),
        ];
        for (tag, passed) in records {
            checks_tx
                .send(CheckRecord { tag, passed })
                .await
                .map_err(|err| format!("send failed: {}", err))?;
        }
        drop(checks_tx);

        let ledger = collector
            .await
            .map_err(|err| format!("collector join failed: {}", err))?;

        let login = ledger.checks.get(&StepId::Login).copied().unwrap_or_default();
        let dashboard = ledger
            .checks
            .get(&StepId::Dashboard)
            .copied()
            .unwrap_or_default();
        let submit = ledger
            .checks
            .get(&StepId::Submit)
            .copied()
            .unwrap_or_default();

        if login.passed != 1 || login.failed != 0 {
            return Err(format!("unexpected login counts: {:?}", login));
        }
        if dashboard.passed != 2 || dashboard.failed != 1 {
            return Err(format!("unexpected dashboard counts: {:?}", dashboard));
        }
        if submit.passed != 0 || submit.failed != 1 {
            return Err(format!("unexpected submit counts: {:?}", submit));
        }
        if ledger.checks.contains_key(&StepId::Compose) {
            return Err("unexpected compose bucket".to_owned());
        }
        Ok(())
    })
}
