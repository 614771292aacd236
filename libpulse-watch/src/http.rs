use reqwest::Client;
use std::time::Duration;

/// Shared pooled client for every probe task. The hard timeout here is
/// what keeps a hung connection from blocking future dispatch cycles.
pub fn create_http_pool(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .use_rustls_tls()
        .build()
        .expect("Failed to create HTTP client")
}
