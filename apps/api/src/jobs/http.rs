//! Shared outbound HTTP plumbing for the search collaborators.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use tracing::warn;

use crate::jobs::FetchError;

const MAX_ATTEMPTS: u32 = 3;
const USER_AGENT: &str = concat!("jobmatch/", env!("CARGO_PKG_VERSION"));

/// Builds the client every collaborator shares. The timeout bounds each call.
pub fn build_client(timeout_secs: u64) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()?)
}

/// Sends the request built by `make_request`, retrying on 429, 5xx and
/// transport errors with exponential backoff (1s, 2s).
pub async fn send_with_retry<F>(service: &str, make_request: F) -> Result<Response, FetchError>
where
    F: Fn() -> RequestBuilder,
{
    send_with_backoff(service, make_request, Duration::from_millis(1000)).await
}

pub(crate) async fn send_with_backoff<F>(
    service: &str,
    make_request: F,
    base_delay: Duration,
) -> Result<Response, FetchError>
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        let error = match make_request().send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response);
                }

                let body = response.text().await.unwrap_or_default();
                let error = FetchError::Api {
                    status: status.as_u16(),
                    message: body,
                };
                if status.as_u16() != 429 && !status.is_server_error() {
                    return Err(error);
                }
                warn!("{service} returned {status}");
                error
            }
            Err(e) => FetchError::from(e),
        };

        if attempt >= MAX_ATTEMPTS {
            return Err(error);
        }

        let delay = base_delay * (1 << (attempt - 1));
        warn!(
            "{service} call attempt {attempt} failed ({error}), retrying after {}ms...",
            delay.as_millis()
        );
        tokio::time::sleep(delay).await;
    }
}
