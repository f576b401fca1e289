use reqwest::Client;

use crate::args::DriverArgs;
use crate::error::{AppError, AppResult, HttpError};

/// Builds the shared HTTP client from the invocation arguments.
///
/// # Errors
///
/// Returns an error when the underlying client cannot be constructed.
pub fn build_client(args: &DriverArgs) -> AppResult<Client> {
    let mut client_builder = Client::builder()
        .timeout(args.request_timeout)
        .connect_timeout(args.connect_timeout);

    if args.insecure {
        client_builder = client_builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    client_builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
