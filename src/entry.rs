use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::info;

use crate::app::summary;
use crate::args::DriverArgs;
use crate::config;
use crate::error::AppResult;
use crate::http::{StepExecutor, build_client};
use crate::logger;
use crate::metrics::{RunReport, setup_check_collector};
use crate::runner;
use crate::scenario::{FormCatalog, ScenarioPlan};
use crate::shutdown::{setup_signal_shutdown_handler, shutdown_channel};
use crate::sinks::{ReportSinks, write_reports};

/// Default config filenames checked when the invocation is otherwise empty.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["mailstress.toml", "mailstress.json"];

/// Buffered check records in flight between workers and the collector.
const CHECK_CHANNEL_CAPACITY: usize = 1024;

/// Parses the invocation, runs the scenario, and reports.
///
/// # Errors
///
/// Returns an error when arguments or config fail validation, the HTTP
/// client cannot be built, or a report export fails to write. In-run step
/// failures are not errors; they surface as failed checks and a failing exit
/// code.
pub fn run() -> AppResult<ExitCode> {
    let Some((mut args, matches)) = parse_args()? else {
        return Ok(ExitCode::SUCCESS);
    };
    config::apply_config(&mut args, &matches)?;
    logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<Option<(DriverArgs, ArgMatches)>> {
    let mut cmd = DriverArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = DriverArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

/// A bare invocation with no target anywhere (flags, env, default config)
/// prints help instead of erroring out.
fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty = matches!(raw_args, [] | [_]);
    if !treat_as_empty {
        return false;
    }
    if std::env::var_os("HOSTNAME").is_some() {
        return false;
    }

    !DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(args: DriverArgs) -> AppResult<ExitCode> {
    let plan = Arc::new(ScenarioPlan::from_args(&args)?);
    let sinks = ReportSinks::from_args(&args);
    let client = build_client(&args)?;

    let (shutdown_tx, _shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let (checks_tx, checks_rx) = mpsc::channel(CHECK_CHANNEL_CAPACITY);
    let run_start = Instant::now();
    let started_at = Utc::now();
    let collector = setup_check_collector(run_start, checks_rx);

    let executor = Arc::new(StepExecutor::new(client, plan.base_url.clone(), checks_tx));
    let forms = Arc::new(FormCatalog::from_config(&plan.forms));

    info!(
        "Running {} iterations across {} virtual users against {}",
        plan.iterations, plan.vus, plan.base_url
    );
    let iterations_completed =
        runner::run_virtual_users(&plan, &executor, &forms, &shutdown_tx).await;

    // The executor holds the last check sender; dropping it lets the
    // collector drain and finish.
    drop(executor);
    let ledger = collector.await?;

    drop(shutdown_tx.send(()));
    drop(signal_handle.await);

    let report = RunReport {
        started_at,
        duration: ledger.duration,
        iterations: plan.iterations,
        vus: plan.vus,
        iterations_completed,
        checks: ledger.checks,
    };

    if !args.no_summary {
        summary::print_summary(&report);
    }
    write_reports(&sinks, &report).await?;

    Ok(if report.total_failed() > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
