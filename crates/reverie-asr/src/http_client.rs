use std::time::Duration;

use axum::http;
use reqwest::Client;

/// Build the HTTP client shared by ASR providers
///
/// The timeout covers the whole remote call; a slow upstream surfaces
/// as an upstream failure, never a retry.
pub fn http_client(timeout: Duration) -> Client {
    let mut headers = http::HeaderMap::new();
    headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()
        .expect("failed to build default HTTP client")
}
