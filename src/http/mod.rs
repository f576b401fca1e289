//! HTTP client construction and the single-step executor.
mod client;
mod executor;


pub use client::build_client;
pub use executor::{StepExecutor, StepOutcome, TRANSPORT_FAILURE_STATUS, check_passes};
