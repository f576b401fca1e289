use serde::Deserialize;

/// On-disk config shape. Every field mirrors a CLI flag; durations use the
/// same ms/s/m/h suffix strings the CLI accepts.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ConfigFile {
    pub hostname: Option<String>,
    pub base_url: Option<String>,
    pub execute: Option<Vec<String>>,
    pub forms: Option<Vec<String>>,
    pub iterations: Option<u64>,
    pub vus: Option<usize>,
    pub user_prefix: Option<String>,
    pub think_time: Option<String>,
    pub update_think_time: Option<String>,
    pub timeout: Option<String>,
    pub connect_timeout: Option<String>,
    pub insecure: Option<bool>,
    pub export_csv: Option<String>,
    pub export_json: Option<String>,
    pub no_summary: Option<bool>,
    pub verbose: Option<bool>,
}
