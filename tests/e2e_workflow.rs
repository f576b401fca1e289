
use tempfile::tempdir;

use support_workflow::{check_counts, read_json_report, run_mailstress, spawn_mail_server};

fn base_args(base_url: &str, report: &std::path::Path) -> Vec<String> {
    vec![
        "--base-url".to_owned(),
        base_url.to_owned(),
        "--think-time".to_owned(),
        "1ms".to_owned(),
        "--no-summary".to_owned(),
        "--export-json".to_owned(),
        report.to_string_lossy().into_owned(),
    ]
}

#[test]
fn login_and_dashboard_produce_one_plus_eight_checks_per_iteration() -> Result<(), String> {
    let (base_url, _server) = spawn_mail_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let report_path = dir.path().join("report.json");

    let mut args = base_args(&base_url, &report_path);
    // Legacy tag code on purpose; the compat parser is part of the contract.
    args.extend([
        "-e".to_owned(),
        "G03".to_owned(),
        "-i".to_owned(),
        "4".to_owned(),
        "--vus".to_owned(),
        "2".to_owned(),
    ]);

    let output = run_mailstress(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let report = read_json_report(&report_path)?;
    if check_counts(&report, "login") != Some((4, 0)) {
        return Err(format!("unexpected login counts: {}", report));
    }
    if check_counts(&report, "dashboard") != Some((32, 0)) {
        return Err(format!("unexpected dashboard counts: {}", report));
    }
    for absent in ["refresh", "inbox", "compose", "message", "update", "submit", "approve"] {
        if check_counts(&report, absent).is_some() {
            return Err(format!("unexpected {} checks: {}", absent, report));
        }
    }
    Ok(())
}

#[test]
fn full_chain_passes_with_version_and_recipient_handoff() -> Result<(), String> {
    let (base_url, _server) = spawn_mail_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let report_path = dir.path().join("report.json");

    let mut args = base_args(&base_url, &report_path);
    args.extend([
        "-e".to_owned(),
        "refresh,inbox,compose,message,update,submit,approve".to_owned(),
        "--forms".to_owned(),
        "alpha".to_owned(),
        "-i".to_owned(),
        "3".to_owned(),
        "--vus".to_owned(),
        "3".to_owned(),
    ]);

    let output = run_mailstress(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let report = read_json_report(&report_path)?;
    // The mock server 401s every refresh; those must count as passed.
    if check_counts(&report, "refresh") != Some((3, 0)) {
        return Err(format!("unexpected refresh counts: {}", report));
    }
    // Approve only succeeds when submit handed the chain to recipients[1]
    // with the updated version, so these four lines cover the handoff.
    for tag in ["compose", "message", "update", "submit", "approve"] {
        if check_counts(&report, tag) != Some((3, 0)) {
            return Err(format!("unexpected {} counts: {}", tag, report));
        }
    }
    if report
        .get("iterations_completed")
        .and_then(serde_json::Value::as_u64)
        != Some(3)
    {
        return Err(format!("unexpected completion count: {}", report));
    }
    Ok(())
}

#[test]
fn compose_failure_short_circuits_but_later_forms_still_run() -> Result<(), String> {
    let (base_url, _server) = spawn_mail_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let report_path = dir.path().join("report.json");

    let mut args = base_args(&base_url, &report_path);
    args.extend([
        "-e".to_owned(),
        "compose,message,update,submit,approve".to_owned(),
        "--forms".to_owned(),
        "broken,alpha".to_owned(),
        "-i".to_owned(),
        "2".to_owned(),
        "--vus".to_owned(),
        "1".to_owned(),
    ]);

    let output = run_mailstress(args)?;
    // Failed compose checks must surface in the exit code.
    if output.status.success() {
        return Err("expected a failing exit code".to_owned());
    }

    let report = read_json_report(&report_path)?;
    if check_counts(&report, "compose") != Some((2, 2)) {
        return Err(format!("unexpected compose counts: {}", report));
    }
    // The broken form's chain stops at compose; only "alpha" continues.
    for tag in ["message", "update", "submit", "approve"] {
        if check_counts(&report, tag) != Some((2, 0)) {
            return Err(format!("unexpected {} counts: {}", tag, report));
        }
    }
    Ok(())
}

#[test]
fn shared_iterations_split_across_users_completes_exactly() -> Result<(), String> {
    let (base_url, _server) = spawn_mail_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let report_path = dir.path().join("report.json");

    let mut args = base_args(&base_url, &report_path);
    args.extend([
        "-e".to_owned(),
        "inbox".to_owned(),
        "-i".to_owned(),
        "5".to_owned(),
        "--vus".to_owned(),
        "2".to_owned(),
    ]);

    let output = run_mailstress(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let report = read_json_report(&report_path)?;
    if report
        .get("iterations_completed")
        .and_then(serde_json::Value::as_u64)
        != Some(5)
    {
        return Err(format!("unexpected completion count: {}", report));
    }
    if check_counts(&report, "login") != Some((5, 0)) {
        return Err(format!("unexpected login counts: {}", report));
    }
    if check_counts(&report, "inbox") != Some((5, 0)) {
        return Err(format!("unexpected inbox counts: {}", report));
    }
    Ok(())
}

#[test]
fn empty_form_list_is_discovered_from_login() -> Result<(), String> {
    let (base_url, _server) = spawn_mail_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let report_path = dir.path().join("report.json");

    let mut args = base_args(&base_url, &report_path);
    // No --forms: login advertises alpha and beta, so each iteration
    // composes both.
    args.extend([
        "-e".to_owned(),
        "P02".to_owned(),
        "-i".to_owned(),
        "2".to_owned(),
        "--vus".to_owned(),
        "1".to_owned(),
    ]);

    let output = run_mailstress(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let report = read_json_report(&report_path)?;
    if check_counts(&report, "compose") != Some((4, 0)) {
        return Err(format!("unexpected compose counts: {}", report));
    }
    Ok(())
}
