//! Virtual user scheduling: splits the iteration budget, spawns one task per
//! user, and joins their completed-iteration counts.
mod worker;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::warn;

use crate::http::StepExecutor;
use crate::scenario::{FormCatalog, ScenarioPlan};
use crate::shutdown::ShutdownSender;

use worker::run_worker;

/// Runs the configured virtual users to completion (or shutdown) and returns
/// the number of fully completed iterations across all of them.
#[must_use]
pub async fn run_virtual_users(
    plan: &Arc<ScenarioPlan>,
    executor: &Arc<StepExecutor>,
    forms: &Arc<FormCatalog>,
    shutdown_tx: &ShutdownSender,
) -> u64 {
    let mut handles: Vec<JoinHandle<u64>> = Vec::with_capacity(plan.vus);
    for (index, share) in plan.iteration_shares().into_iter().enumerate() {
        let plan = Arc::clone(plan);
        let executor = Arc::clone(executor);
        let forms = Arc::clone(forms);
        let shutdown_rx = shutdown_tx.subscribe();
        // Virtual users are 1-based, matching k6's __VU numbering.
        let user_index = index.saturating_add(1);
        handles.push(tokio::spawn(async move {
            run_worker(&plan, &executor, &forms, shutdown_rx, user_index, share).await
        }));
    }

    let mut completed: u64 = 0;
    for handle in handles {
        match handle.await {
            Ok(count) => completed = completed.saturating_add(count),
            Err(err) => warn!("Virtual user task failed: {}", err),
        }
    }
    completed
}
