use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_duration_arg, parse_positive_u64, parse_positive_usize, parse_step_id,
};
use super::types::{PositiveU64, PositiveUsize, StepId};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Scripted workflow load driver for mail/approval pipelines - virtual users, gated step scenarios, per-tag pass/fail checks, CSV/JSON reports."
)]
pub struct DriverArgs {
    /// Target hostname; the scenario runs against https://<hostname>
    #[arg(long, env = "HOSTNAME")]
    pub hostname: Option<String>,

    /// Full base URL (scheme included); takes precedence over --hostname
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Steps to execute, comma separated. Accepts step names (refresh,
    /// dashboard, inbox, compose, message, update, submit, approve) or the
    /// legacy tag codes (G02, G03, G04, P02, G05, U01, U02, U03). Login
    /// always runs.
    #[arg(
        long = "execute",
        short = 'e',
        env = "EXECUTE",
        value_delimiter = ',',
        value_parser = parse_step_id,
        default_values_t = StepId::gated()
    )]
    pub execute: Vec<StepId>,

    /// Form names to compose, comma separated; discovered from the first
    /// successful login response when empty
    #[arg(long, env = "FORMS", value_delimiter = ',')]
    pub forms: Vec<String>,

    /// Total scenario iterations, shared across all virtual users
    #[arg(
        long,
        short = 'i',
        env = "ITERATIONS",
        default_value = "400",
        value_parser = parse_positive_u64
    )]
    pub iterations: PositiveU64,

    /// Number of concurrent virtual users
    #[arg(long, env = "VUS", default_value = "50", value_parser = parse_positive_usize)]
    pub vus: PositiveUsize,

    /// Username prefix; virtual user N signs in as <prefix><N>
    #[arg(long = "user-prefix", default_value = "user3")]
    pub user_prefix: String,

    /// Pause between steps and dashboard sub-calls (supports ms/s/m/h)
    #[arg(long = "think-time", default_value = "1s", value_parser = parse_duration_arg)]
    pub think_time: Duration,

    /// Pause after the update step; defaults to --think-time
    #[arg(long = "update-think-time", value_parser = parse_duration_arg)]
    pub update_think_time: Option<Duration>,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "10s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Accept invalid TLS certificates (self-signed staging targets)
    #[arg(long)]
    pub insecure: bool,

    /// Write the per-tag check report to this CSV file
    #[arg(long = "export-csv")]
    pub export_csv: Option<String>,

    /// Write the per-tag check report to this JSON file
    #[arg(long = "export-json")]
    pub export_json: Option<String>,

    /// Skip the stdout summary table
    #[arg(long = "no-summary")]
    pub no_summary: bool,

    /// Load options from a TOML or JSON config file
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
