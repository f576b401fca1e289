use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unknown step '{value}'. Expected a step name (login, refresh, ...) or a legacy tag code (P01, G02, ...).")]
    InvalidStepName { value: String },
    #[error("Invalid count '{value}': {source}")]
    InvalidCount {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Count '{value}' must be at least 1.")]
    ZeroCount { value: String },
    #[error("Duration value was empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'. Expected a number with an optional ms/s/m/h suffix.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration number '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Unknown duration unit '{unit}'. Expected ms, s, m, or h.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration overflowed.")]
    DurationOverflow,
    #[error("Duration must be greater than zero.")]
    DurationZero,
    #[error("No target given. Provide --hostname (env HOSTNAME) or --base-url.")]
    MissingTarget,
    #[error("{0}")]
    Message(String),
}

impl From<String> for ValidationError {
    fn from(value: String) -> Self {
        ValidationError::Message(value)
    }
}

impl From<&str> for ValidationError {
    fn from(value: &str) -> Self {
        ValidationError::Message(value.to_owned())
    }
}
