use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid hostname '{value}': {source}")]
    InvalidHostname {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to join URL '{url}': {source}")]
    JoinUrlFailed {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
