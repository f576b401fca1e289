use tracing::debug;

use crate::http::StepExecutor;
use crate::scenario::{FormCatalog, IterationContext, ScenarioPlan, WorkerContext, run_iteration};
use crate::shutdown::ShutdownReceiver;

/// One virtual user: a fresh context per iteration, strict sequencing inside
/// each iteration, nothing shared with other users beyond checks and forms.
pub(super) async fn run_worker(
    plan: &ScenarioPlan,
    executor: &StepExecutor,
    forms: &FormCatalog,
    mut shutdown_rx: ShutdownReceiver,
    user_index: usize,
    iterations: u64,
) -> u64 {
    let username = format!("{}{}", plan.user_prefix, user_index);
    let worker = WorkerContext {
        plan,
        executor,
        forms,
    };

    let mut completed: u64 = 0;
    for _ in 0..iterations {
        let mut context = IterationContext::new(username.clone());
        if run_iteration(&worker, &mut shutdown_rx, &mut context).await {
            debug!("Virtual user {} stopping on shutdown.", user_index);
            break;
        }
        completed = completed.saturating_add(1);
    }
    completed
}
