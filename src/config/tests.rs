use clap::{CommandFactory, FromArgMatches};
use std::io::Write as _;

use crate::args::{DriverArgs, StepId};

use super::apply::merge_for_tests;
use super::loader::load_config_file;
use super::types::ConfigFile;

fn parse_with_matches(argv: &[&str]) -> Result<(DriverArgs, clap::ArgMatches), String> {
    let matches = DriverArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("matches failed: {}", err))?;
    let args = DriverArgs::from_arg_matches(&matches)
        .map_err(|err| format!("from_arg_matches failed: {}", err))?;
    Ok((args, matches))
}

#[test]
fn toml_config_loads() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("mailstress.toml");
    let mut file =
        std::fs::File::create(&path).map_err(|err| format!("create failed: {}", err))?;
    file.write_all(
        br#"hostname = "mail.example.test"
execute = ["G03", "inbox"]
forms = ["formA", "formB"]
iterations = 20
vus = 4
think_time = "50ms"
"#,
    )
    .map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| format!("load failed: {}", err))?;
    if config.hostname.as_deref() != Some("mail.example.test") {
        return Err("unexpected hostname".to_owned());
    }
    if config.iterations != Some(20) || config.vus != Some(4) {
        return Err("unexpected counts".to_owned());
    }
    Ok(())
}

#[test]
fn json_config_loads() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("mailstress.json");
    std::fs::write(&path, br#"{ "base_url": "http://localhost:8080/", "vus": 2 }"#)
        .map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| format!("load failed: {}", err))?;
    if config.base_url.as_deref() != Some("http://localhost:8080/") {
        return Err("unexpected base_url".to_owned());
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("mailstress.yaml");
    std::fs::write(&path, b"vus: 2").map_err(|err| format!("write failed: {}", err))?;

    if load_config_file(&path).is_ok() {
        return Err("expected yaml config to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn file_fills_defaults_but_cli_wins() -> Result<(), String> {
    let (mut args, matches) =
        parse_with_matches(&["mailstress", "--base-url", "http://localhost/", "--vus", "7"])?;
    let file = ConfigFile {
        iterations: Some(12),
        vus: Some(3),
        execute: Some(vec!["dashboard".to_owned()]),
        ..ConfigFile::default()
    };

    merge_for_tests(&mut args, &matches, file).map_err(|err| format!("merge failed: {}", err))?;

    if args.iterations.get() != 12 {
        return Err(format!(
            "expected file iterations to apply, got {}",
            args.iterations
        ));
    }
    if args.vus.get() != 7 {
        return Err(format!("expected CLI vus to win, got {}", args.vus));
    }
    if args.execute != vec![StepId::Dashboard] {
        return Err(format!("expected file steps to apply, got {:?}", args.execute));
    }
    Ok(())
}

#[test]
fn invalid_file_step_name_is_rejected() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["mailstress", "--base-url", "http://localhost/"])?;
    let file = ConfigFile {
        execute: Some(vec!["teleport".to_owned()]),
        ..ConfigFile::default()
    };

    if merge_for_tests(&mut args, &matches, file).is_ok() {
        return Err("expected unknown step in config to be rejected".to_owned());
    }
    Ok(())
}
