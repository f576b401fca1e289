use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{DriverArgs, PositiveU64, PositiveUsize, StepId, parse_duration_arg};
use crate::error::{AppError, AppResult};

use super::loader::load_config;
use super::types::ConfigFile;

/// Merges a config file (if any) under the parsed CLI arguments. A field is
/// only taken from the file when the CLI left it at its default; explicit
/// flags and environment values always win.
///
/// # Errors
///
/// Returns an error when the file cannot be loaded or a file value fails the
/// same validation its CLI counterpart would get.
pub fn apply_config(args: &mut DriverArgs, matches: &ArgMatches) -> AppResult<()> {
    let Some(file) = load_config(args.config.as_deref())? else {
        return Ok(());
    };
    merge(args, matches, file)
}

fn given(matches: &ArgMatches, id: &str) -> bool {
    matches
        .value_source(id)
        .is_some_and(|source| source != ValueSource::DefaultValue)
}

fn merge(args: &mut DriverArgs, matches: &ArgMatches, file: ConfigFile) -> AppResult<()> {
    if !given(matches, "hostname") && file.hostname.is_some() {
        args.hostname = file.hostname;
    }
    if !given(matches, "base_url") && file.base_url.is_some() {
        args.base_url = file.base_url;
    }
    if !given(matches, "execute")
        && let Some(steps) = file.execute
    {
        let mut parsed: Vec<StepId> = Vec::with_capacity(steps.len());
        for step in &steps {
            parsed.push(step.parse::<StepId>().map_err(AppError::validation)?);
        }
        args.execute = parsed;
    }
    if !given(matches, "forms")
        && let Some(forms) = file.forms
    {
        args.forms = forms;
    }
    if !given(matches, "iterations")
        && let Some(iterations) = file.iterations
    {
        args.iterations = PositiveU64::try_from_u64(iterations).map_err(AppError::validation)?;
    }
    if !given(matches, "vus")
        && let Some(vus) = file.vus
    {
        args.vus = PositiveUsize::try_from_usize(vus).map_err(AppError::validation)?;
    }
    if !given(matches, "user_prefix")
        && let Some(prefix) = file.user_prefix
    {
        args.user_prefix = prefix;
    }
    if !given(matches, "think_time")
        && let Some(think_time) = file.think_time
    {
        args.think_time = parse_duration_arg(&think_time).map_err(AppError::validation)?;
    }
    if !given(matches, "update_think_time")
        && let Some(think_time) = file.update_think_time
    {
        args.update_think_time =
            Some(parse_duration_arg(&think_time).map_err(AppError::validation)?);
    }
    if !given(matches, "request_timeout")
        && let Some(timeout) = file.timeout
    {
        args.request_timeout = parse_duration_arg(&timeout).map_err(AppError::validation)?;
    }
    if !given(matches, "connect_timeout")
        && let Some(timeout) = file.connect_timeout
    {
        args.connect_timeout = parse_duration_arg(&timeout).map_err(AppError::validation)?;
    }
    if !given(matches, "insecure")
        && let Some(insecure) = file.insecure
    {
        args.insecure = insecure;
    }
    if !given(matches, "export_csv") && file.export_csv.is_some() {
        args.export_csv = file.export_csv;
    }
    if !given(matches, "export_json") && file.export_json.is_some() {
        args.export_json = file.export_json;
    }
    if !given(matches, "no_summary")
        && let Some(no_summary) = file.no_summary
    {
        args.no_summary = no_summary;
    }
    if !given(matches, "verbose")
        && let Some(verbose) = file.verbose
    {
        args.verbose = verbose;
    }
    Ok(())
}

#[cfg(test)]
pub(super) fn merge_for_tests(
    args: &mut DriverArgs,
    matches: &ArgMatches,
    file: ConfigFile,
) -> AppResult<()> {
    merge(args, matches, file)
}
