mod app;
mod config;
mod http;
mod scenario;
mod sink;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use scenario::ScenarioError;
pub use sink::SinkError;
pub use validation::ValidationError;
