use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to format report line: {source}")]
    WriteLine {
        #[source]
        source: std::fmt::Error,
    },
    #[error("Failed to serialize report: {source}")]
    SerializeReport {
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write CSV report '{path}': {source}")]
    WriteCsv {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write JSON report '{path}': {source}")]
    WriteJson {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
