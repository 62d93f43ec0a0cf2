//! Shared HTTP plumbing for the content fetchers.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::FetchError;

/// Attempts per request, including the first.
pub const MAX_ATTEMPTS: u32 = 3;
const BASE_DELAY: Duration = Duration::from_secs(1);

pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Delay before retry number `attempt` (1-based): 1s, 2s, 4s, ...
pub fn backoff_delay(attempt: u32) -> Duration {
    BASE_DELAY * (1 << attempt.saturating_sub(1))
}

/// Sends the request built by `make_request` and decodes the JSON body.
///
/// Transport errors are retried with exponential backoff. A non-success
/// status is returned immediately as `FetchError::Status`.
pub async fn get_json<T, F>(service: &'static str, make_request: F) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    F: Fn() -> RequestBuilder,
{
    let mut attempt = 0;
    let response = loop {
        match make_request().send().await {
            Ok(response) => break response,
            Err(e) if attempt + 1 < MAX_ATTEMPTS => {
                attempt += 1;
                let delay = backoff_delay(attempt);
                debug!(
                    service,
                    attempt,
                    max_attempts = MAX_ATTEMPTS,
                    error = %e,
                    delay_ms = delay.as_millis() as u64,
                    "Request failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(FetchError::Http(e)),
        }
    };

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            service,
            status: status.as_u16(),
        });
    }

    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff_delay(1), Duration::from_secs(1));
        assert_eq!(backoff_delay(2), Duration::from_secs(2));
        assert_eq!(backoff_delay(3), Duration::from_secs(4));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(Duration::from_secs(5)).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_host_gives_up_after_retries() {
        let client = build_client(Duration::from_secs(1)).expect("client");
        // Port 9 on localhost: connection refused, fails fast.
        let result: Result<serde_json::Value, FetchError> =
            get_json("test", || client.get("http://127.0.0.1:9/")).await;
        assert!(result.is_err());
    }
}
