//! Sequential endpoint failover.
//!
//! Endpoints are tried strictly in list order with one request in flight.
//! Each attempt ends in one of three outcomes:
//!
//! | Outcome | Trigger | Effect |
//! |---------|---------|--------|
//! | success | JSON envelope with `data`, status not `error` | resolve with `data` |
//! | transport failure | transport error, status >= 400, no `data` wrapper | warn, try next endpoint |
//! | application error | `status == "error"`, or no payload at all | reject immediately |
//!
//! When the last endpoint fails at the transport level the whole call is
//! rejected with that endpoint's reason.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::endpoint::{ApiTarget, EndpointList, EndpointPolicy};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse};
use crate::provider::ProviderError;

/// Rejection reason when an endpoint failed without a transport error.
pub const STATUS_FAILURE_MESSAGE: &str = "Status Code is above 400";

/// Rejection reason when the catalog answered with nothing.
pub const NO_DATA_MESSAGE: &str = "No data returned";

enum Attempt {
    Success(Value),
    Transport(ProviderError),
    Application(ProviderError),
}

/// Drives one catalog request across the configured mirrors.
#[derive(Clone)]
pub struct FailoverFetcher {
    http_client: Arc<dyn HttpClient>,
    endpoints: EndpointList,
    policy: EndpointPolicy,
}

impl FailoverFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>, endpoints: EndpointList) -> Self {
        Self {
            http_client,
            endpoints,
            policy: EndpointPolicy,
        }
    }

    /// Resolves with the `data` object of the first endpoint that answers.
    ///
    /// # Errors
    ///
    /// - `Configuration` when the endpoint list is empty (nothing is sent)
    /// - `Application` as soon as an endpoint reports an API-level error
    /// - `Exhausted` once every endpoint failed at the transport level
    pub async fn fetch(&self, target: &ApiTarget) -> Result<Value, ProviderError> {
        if self.endpoints.is_empty() {
            return Err(ProviderError::configuration(
                "no catalog endpoint configured",
            ));
        }

        let mut last_failure = None;

        for (index, base) in self.endpoints.iter().enumerate() {
            let request = self.policy.prepare(base, target);
            debug!(
                endpoint = base,
                url = %request.url,
                attempt = index + 1,
                resource = target.resource(),
                "requesting catalog"
            );

            match self.attempt(request).await {
                Attempt::Success(data) => return Ok(data),
                Attempt::Application(error) => return Err(error.with_attempts(index + 1)),
                Attempt::Transport(error) => {
                    warn!(endpoint = base, error = %error.message(), "YTS API endpoint failed");
                    last_failure = Some(error);
                }
            }
        }

        let last = last_failure.unwrap_or_else(|| ProviderError::transport(STATUS_FAILURE_MESSAGE));
        Err(ProviderError::exhausted(last, self.endpoints.len()))
    }

    async fn attempt(&self, request: HttpRequest) -> Attempt {
        match self.http_client.execute(request).await {
            Ok(response) => classify(response),
            Err(error) => Attempt::Transport(ProviderError::transport(error.message())),
        }
    }
}

fn classify(response: HttpResponse) -> Attempt {
    if response.is_error_status() {
        debug!(status = response.status, "catalog answered with error status");
        return Attempt::Transport(ProviderError::transport(STATUS_FAILURE_MESSAGE));
    }

    let body = response.body.trim();
    if body.is_empty() {
        return Attempt::Application(ProviderError::application(NO_DATA_MESSAGE));
    }

    // Bodies that are not JSON count as a payload without a data wrapper.
    let Ok(envelope) = serde_json::from_str::<Value>(body) else {
        debug!("catalog body is not JSON");
        return Attempt::Transport(ProviderError::transport(STATUS_FAILURE_MESSAGE));
    };

    if !is_truthy(&envelope) {
        return Attempt::Application(ProviderError::application(NO_DATA_MESSAGE));
    }

    let Value::Object(mut envelope) = envelope else {
        return Attempt::Transport(ProviderError::transport(STATUS_FAILURE_MESSAGE));
    };

    let data = match envelope.remove("data") {
        Some(data) if is_truthy(&data) => data,
        _ => {
            debug!("catalog envelope has no data wrapper");
            return Attempt::Transport(ProviderError::transport(STATUS_FAILURE_MESSAGE));
        }
    };

    if envelope.get("status").and_then(Value::as_str) == Some("error") {
        let message = envelope
            .get("status_message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .unwrap_or(NO_DATA_MESSAGE);
        return Attempt::Application(ProviderError::application(message));
    }

    Attempt::Success(data)
}

/// JSON truthiness as the catalog's clients interpret it.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
