//! HTTP client creation and configuration utilities

use crate::constants::{HTTP_POOL_MAX_IDLE_PER_HOST, headers};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, ORIGIN, REFERER};
use std::time::Duration;

/// Creates an HTTP client configured for the stats host.
///
/// The stats host rejects or stalls requests that do not look like they come
/// from the nba.com site, so the client sends browser-like `User-Agent`,
/// `Referer`, `Origin` and `Accept` headers on every request.
pub fn create_http_client_with_timeout(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(REFERER, HeaderValue::from_static(headers::REFERER));
    default_headers.insert(ORIGIN, HeaderValue::from_static(headers::ORIGIN));
    default_headers.insert(ACCEPT, HeaderValue::from_static(headers::ACCEPT));

    Client::builder()
        .user_agent(headers::USER_AGENT)
        .default_headers(default_headers)
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}

/// Creates an HTTP client for testing with default timeout
#[cfg(test)]
pub fn create_test_http_client() -> Client {
    create_http_client_with_timeout(crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS)
        .expect("Failed to create test HTTP client")
}
