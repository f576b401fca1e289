use std::time::Duration;

use clap::Parser;

use super::cli::DriverArgs;
use super::parsers::{parse_duration_arg, parse_step_id};
use super::types::{PositiveU64, StepId};

fn parse(args: &[&str]) -> Result<DriverArgs, String> {
    DriverArgs::try_parse_from(args).map_err(|err| format!("parse failed: {}", err))
}

#[test]
fn defaults_match_the_legacy_script() -> Result<(), String> {
    let args = parse(&["mailstress", "--base-url", "https://localhost/"])?;
    if args.iterations.get() != 400 {
        return Err(format!("expected 400 iterations, got {}", args.iterations));
    }
    if args.vus.get() != 50 {
        return Err(format!("expected 50 vus, got {}", args.vus));
    }
    if args.think_time != Duration::from_secs(1) {
        return Err(format!("expected 1s think time, got {:?}", args.think_time));
    }
    if args.user_prefix != "user3" {
        return Err(format!("expected user3 prefix, got {}", args.user_prefix));
    }
    if args.execute != StepId::gated() {
        return Err(format!("expected all gated steps, got {:?}", args.execute));
    }
    Ok(())
}

#[test]
fn execute_accepts_step_names() -> Result<(), String> {
    let args = parse(&[
        "mailstress",
        "--base-url",
        "https://localhost/",
        "-e",
        "refresh,dashboard,inbox",
    ])?;
    if args.execute != vec![StepId::Refresh, StepId::Dashboard, StepId::Inbox] {
        return Err(format!("unexpected steps: {:?}", args.execute));
    }
    Ok(())
}

#[test]
fn execute_accepts_legacy_tag_codes() -> Result<(), String> {
    let args = parse(&[
        "mailstress",
        "--base-url",
        "https://localhost/",
        "-e",
        "G03,p02,U01,u02,U03",
    ])?;
    let expected = vec![
        StepId::Dashboard,
        StepId::Compose,
        StepId::Update,
        StepId::Submit,
        StepId::Approve,
    ];
    if args.execute != expected {
        return Err(format!("unexpected steps: {:?}", args.execute));
    }
    Ok(())
}

#[test]
fn execute_rejects_unknown_steps() -> Result<(), String> {
    let result = parse(&[
        "mailstress",
        "--base-url",
        "https://localhost/",
        "-e",
        "teleport",
    ]);
    if result.is_ok() {
        return Err("expected unknown step to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn step_parser_round_trips_names_and_codes() -> Result<(), String> {
    for step in StepId::gated() {
        let from_name = parse_step_id(step.as_str())
            .map_err(|err| format!("name parse failed: {}", err))?;
        let from_code = parse_step_id(step.legacy_code())
            .map_err(|err| format!("code parse failed: {}", err))?;
        if from_name != step || from_code != step {
            return Err(format!("round trip mismatch for {}", step));
        }
    }
    Ok(())
}

#[test]
fn duration_parser_supports_suffixes() -> Result<(), String> {
    let cases = [
        ("250ms", Duration::from_millis(250)),
        ("3s", Duration::from_secs(3)),
        ("3", Duration::from_secs(3)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (input, expected) in cases {
        let parsed =
            parse_duration_arg(input).map_err(|err| format!("parse {} failed: {}", input, err))?;
        if parsed != expected {
            return Err(format!("{} parsed to {:?}", input, parsed));
        }
    }
    Ok(())
}

#[test]
fn duration_parser_rejects_zero_and_garbage() -> Result<(), String> {
    for input in ["0ms", "0", "", "soon", "5d"] {
        if parse_duration_arg(input).is_ok() {
            return Err(format!("expected '{}' to be rejected", input));
        }
    }
    Ok(())
}

#[test]
fn positive_counts_reject_zero() -> Result<(), String> {
    if "0".parse::<PositiveU64>().is_ok() {
        return Err("expected zero count to be rejected".to_owned());
    }
    Ok(())
}
