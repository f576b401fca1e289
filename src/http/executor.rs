use bytes::Bytes;
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tracing::error;
use url::Url;

use crate::args::StepId;
use crate::metrics::CheckRecord;

/// Synthetic status recorded when a request never produced an HTTP response
/// (connection refused, timeout, unreadable body).
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// Pass predicate for a check. 401 is tolerated on purpose: expired or
/// unauthenticated sessions are a known benign outcome under load, not a
/// defect signal.
#[must_use]
pub const fn check_passes(status: u16) -> bool {
    status == 200 || status == 401
}

/// What one executed step hands back to the scenario. HTTP error statuses are
/// data here, never an `Err`.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub status: u16,
    pub body: Bytes,
    pub passed: bool,
}

impl StepOutcome {
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.status == 200
    }

    /// Decodes the response body into a typed reply.
    ///
    /// # Errors
    ///
    /// Returns the decode error when the body is not the expected shape or a
    /// required field is absent.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    const fn transport_failure() -> Self {
        Self {
            status: TRANSPORT_FAILURE_STATUS,
            body: Bytes::new(),
            passed: false,
        }
    }
}

/// Issues one tagged scenario request at a time against a fixed base URL and
/// reports every outcome as a check record.
pub struct StepExecutor {
    client: Client,
    base_url: Url,
    checks_tx: mpsc::Sender<CheckRecord>,
}

impl StepExecutor {
    #[must_use]
    pub const fn new(client: Client, base_url: Url, checks_tx: mpsc::Sender<CheckRecord>) -> Self {
        Self {
            client,
            base_url,
            checks_tx,
        }
    }

    /// Executes a body-less step request.
    pub async fn fetch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        tag: StepId,
    ) -> StepOutcome {
        let Some(request) = self.builder(method, path, query, tag) else {
            return self.fail(tag).await;
        };
        self.dispatch(request, tag).await
    }

    /// Executes a step request carrying a JSON body.
    pub async fn send_json<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: &B,
        tag: StepId,
    ) -> StepOutcome
    where
        B: Serialize + ?Sized,
    {
        let Some(request) = self.builder(method, path, query, tag) else {
            return self.fail(tag).await;
        };
        self.dispatch(request.json(body), tag).await
    }

    fn builder(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        tag: StepId,
    ) -> Option<RequestBuilder> {
        let url = match self.base_url.join(path) {
            Ok(url) => url,
            Err(err) => {
                error!("Failed to join URL '{}' for {}: {}", path, tag, err);
                return None;
            }
        };
        let mut request = self.client.request(method, url).headers(json_headers());
        if !query.is_empty() {
            request = request.query(query);
        }
        Some(request)
    }

    async fn dispatch(&self, request: RequestBuilder, tag: StepId) -> StepOutcome {
        match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.bytes().await {
                    Ok(body) => {
                        let passed = check_passes(status);
                        self.record(tag, passed).await;
                        StepOutcome {
                            status,
                            body,
                            passed,
                        }
                    }
                    Err(err) => {
                        error!("Failed to read {} response body: {}", tag, err);
                        self.record(tag, false).await;
                        StepOutcome::transport_failure()
                    }
                }
            }
            Err(err) => {
                error!("{} request failed: {}", tag, err);
                self.record(tag, false).await;
                StepOutcome::transport_failure()
            }
        }
    }

    /// Failure before any request went out still counts as one failed check.
    async fn fail(&self, tag: StepId) -> StepOutcome {
        self.record(tag, false).await;
        StepOutcome::transport_failure()
    }

    async fn record(&self, tag: StepId, passed: bool) {
        // A closed receiver only happens during teardown; the record is moot then.
        drop(self.checks_tx.send(CheckRecord { tag, passed }).await);
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(3);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        ACCEPT_ENCODING,
        HeaderValue::from_static("gzip, deflate, br"),
    );
    headers
}
