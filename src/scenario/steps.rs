use std::time::Duration;

use reqwest::Method;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use crate::args::StepId;
use crate::error::ScenarioError;
use crate::http::{StepExecutor, StepOutcome};
use crate::shutdown::ShutdownReceiver;

use super::context::IterationContext;
use super::forms::FormCatalog;
use super::plan::ScenarioPlan;
use super::schema::{
    ComposeReply, LoginReply, LoginRequest, SubmitReply, UpdateReply, UpdateRequest,
};

/// Dashboard widgets fetched as one batch. All eight share the Dashboard tag
/// and a failing widget never aborts the rest of the batch.
const DASHBOARD_PANELS: [&str; 8] = [
    "recents",
    "personalScore",
    "periods",
    "personalActivity",
    "cubeAnalysis",
    "departmentalPerformance",
    "pendingResults",
    "cube-documents",
];

/// Shared read-only surroundings of one virtual user.
pub(crate) struct WorkerContext<'run> {
    pub(crate) plan: &'run ScenarioPlan,
    pub(crate) executor: &'run StepExecutor,
    pub(crate) forms: &'run FormCatalog,
}

/// Runs one full gated iteration. Returns true when shutdown interrupted it;
/// the caller then stops without counting the iteration.
pub(crate) async fn run_iteration(
    worker: &WorkerContext<'_>,
    shutdown_rx: &mut ShutdownReceiver,
    context: &mut IterationContext,
) -> bool {
    let plan = worker.plan;

    let signin = login(worker, context).await;
    context.observe_status(signin.status);
    if pause(shutdown_rx, plan.think_time).await {
        return true;
    }

    if plan.runs_step(StepId::Refresh) {
        let refreshed = worker
            .executor
            .fetch(Method::GET, "api/account/refresh", &[], StepId::Refresh)
            .await;
        context.observe_status(refreshed.status);
        if pause(shutdown_rx, plan.think_time).await {
            return true;
        }
    }

    if plan.runs_step(StepId::Dashboard) {
        for panel in DASHBOARD_PANELS {
            let fetched = worker
                .executor
                .fetch(
                    Method::GET,
                    &format!("api/dashboard/{}", panel),
                    &[],
                    StepId::Dashboard,
                )
                .await;
            context.observe_status(fetched.status);
            if pause(shutdown_rx, plan.think_time).await {
                return true;
            }
        }
    }

    if plan.runs_step(StepId::Inbox) {
        let listed = worker
            .executor
            .fetch(Method::GET, "api/mail", &[], StepId::Inbox)
            .await;
        context.observe_status(listed.status);
        if pause(shutdown_rx, plan.think_time).await {
            return true;
        }
    }

    if plan.compose_chain_enabled() {
        let names = worker.forms.names();
        if names.is_empty() {
            warn!("Compose chain is enabled but no forms are known yet; skipping.");
        }
        for form in names {
            if compose_chain(worker, shutdown_rx, context, form).await {
                return true;
            }
        }
    }

    false
}

/// Signs in. Always runs, once per iteration. The first successful login of
/// the whole run seeds the form catalog when config left it empty.
async fn login(worker: &WorkerContext<'_>, context: &IterationContext) -> StepOutcome {
    let payload = LoginRequest::for_user(&context.username);
    let signin = worker
        .executor
        .send_json(
            Method::POST,
            "api/account/login",
            &[],
            &payload,
            StepId::Login,
        )
        .await;

    if signin.ok() && !worker.forms.is_seeded() {
        match signin.json::<LoginReply>() {
            Ok(reply) => {
                let names: Vec<String> = reply.forms.into_iter().map(|form| form.name).collect();
                if !names.is_empty() && worker.forms.seed(names) {
                    debug!("Form catalog discovered from login response.");
                }
            }
            Err(err) => {
                // Discovery is best-effort; a later login may still seed it.
                warn!("Could not read a form list from the login response: {}", err);
            }
        }
    }

    signin
}

/// Runs the compose chain for one form: compose, then the enabled sub-steps
/// in order. A non-200 short-circuits the rest of this form's chain; a
/// malformed reply aborts it loudly. Either way the caller continues with the
/// next form. Returns true only when shutdown interrupted a pause.
async fn compose_chain(
    worker: &WorkerContext<'_>,
    shutdown_rx: &mut ShutdownReceiver,
    context: &mut IterationContext,
    form: &str,
) -> bool {
    let plan = worker.plan;
    let executor = worker.executor;

    let composed = executor
        .fetch(
            Method::POST,
            "api/mail",
            &[("form", form.to_owned())],
            StepId::Compose,
        )
        .await;
    context.observe_status(composed.status);
    if pause(shutdown_rx, plan.think_time).await {
        return true;
    }
    if !composed.ok() {
        return false;
    }
    match composed.json::<ComposeReply>() {
        Ok(reply) => context.start_chain(reply.id),
        Err(err) => {
            abort_chain(&ScenarioError::MalformedBody {
                tag: StepId::Compose,
                source: err,
            });
            return false;
        }
    }

    if plan.runs_step(StepId::Message) {
        let Some(recipient) = context.recipient_id.clone() else {
            return false;
        };
        let viewed = executor
            .fetch(
                Method::GET,
                &format!("api/mail/{}", recipient),
                &[("version", context.version().to_string())],
                StepId::Message,
            )
            .await;
        context.observe_status(viewed.status);
        if pause(shutdown_rx, plan.think_time).await {
            return true;
        }
        if !viewed.ok() {
            return false;
        }
    }

    if plan.runs_step(StepId::Update) {
        let Some(recipient) = context.recipient_id.clone() else {
            return false;
        };
        let payload = UpdateRequest::fixed();
        let updated = executor
            .send_json(
                Method::PUT,
                &format!("api/mail/{}", recipient),
                &[("version", context.version().to_string())],
                &payload,
                StepId::Update,
            )
            .await;
        context.observe_status(updated.status);
        if pause(shutdown_rx, plan.update_think_time).await {
            return true;
        }
        if !updated.ok() {
            return false;
        }
        match updated.json::<UpdateReply>() {
            Ok(reply) => context.advance_version(reply.version),
            Err(err) => {
                abort_chain(&ScenarioError::MalformedBody {
                    tag: StepId::Update,
                    source: err,
                });
                return false;
            }
        }
    }

    if plan.runs_step(StepId::Submit) {
        let Some(recipient) = context.recipient_id.clone() else {
            return false;
        };
        let submitted = executor
            .fetch(
                Method::PUT,
                &format!("api/mail/{}", recipient),
                &[
                    ("version", context.version().to_string()),
                    ("go", "true".to_owned()),
                ],
                StepId::Submit,
            )
            .await;
        context.observe_status(submitted.status);
        if pause(shutdown_rx, plan.think_time).await {
            return true;
        }
        if !submitted.ok() {
            return false;
        }
        let reply = match submitted.json::<SubmitReply>() {
            Ok(reply) => reply,
            Err(err) => {
                abort_chain(&ScenarioError::MalformedBody {
                    tag: StepId::Submit,
                    source: err,
                });
                return false;
            }
        };
        context.advance_version(reply.version);
        match reply.next_recipient(&recipient) {
            Ok(next) => context.hand_to(next.id.clone()),
            Err(err) => {
                abort_chain(&err);
                return false;
            }
        }
    }

    if plan.runs_step(StepId::Approve) {
        let Some(recipient) = context.recipient_id.clone() else {
            return false;
        };
        let approved = executor
            .fetch(
                Method::PUT,
                &format!("api/mail/{}", recipient),
                &[
                    ("version", context.version().to_string()),
                    ("action", "approve".to_owned()),
                ],
                StepId::Approve,
            )
            .await;
        context.observe_status(approved.status);
        if pause(shutdown_rx, plan.think_time).await {
            return true;
        }
    }

    false
}

/// A malformed reply means the scenario's assumptions about the target no
/// longer hold for this form. Surface it and drop the chain rather than
/// continue with stale state.
fn abort_chain(error: &ScenarioError) {
    error!("Aborting form chain: {}", error);
}

/// Think-time pause between steps, interruptible by shutdown. Returns true
/// when shutdown fired.
async fn pause(shutdown_rx: &mut ShutdownReceiver, think_time: Duration) -> bool {
    tokio::select! {
        _ = shutdown_rx.recv() => true,
        () = sleep(think_time) => false,
    }
}
