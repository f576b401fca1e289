//! CLI argument types and parsers.
mod cli;
mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::DriverArgs;
pub use types::{PositiveU64, PositiveUsize, StepId};

pub(crate) use parsers::parse_duration_arg;
