use crate::{
    endpoint::extract_domain,
    http::create_http_pool,
    stats::StatsStore,
    types::{Classification, EndpointSpec, MonitorConfig, ProbeOutcome},
};
use reqwest::{Client, Method, Request};
use std::{sync::Arc, time::Instant};
use thiserror::Error;
use tracing::{debug, error};

/// A probe that never reached the network. The attempt is not counted.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),
    #[error("failed to encode request body: {0}")]
    BodyEncode(#[from] serde_json::Error),
    #[error("failed to build request: {0}")]
    RequestBuild(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct Prober {
    client: Client,
    stats: Arc<StatsStore>,
    config: MonitorConfig,
}

impl Prober {
    pub fn new(stats: Arc<StatsStore>, config: MonitorConfig) -> Self {
        let client = create_http_pool(config.request_timeout());
        Self {
            client,
            stats,
            config,
        }
    }

    /// Performs one HTTP call against one endpoint, classifies the
    /// outcome and updates the counters for the endpoint's domain.
    ///
    /// A construction failure returns before anything hits the network
    /// and leaves the counters untouched. Once the request is sent, the
    /// attempt counts toward `total` whether a response came back or
    /// not; only an in-range status under the latency threshold counts
    /// toward `success`.
    pub async fn probe(&self, spec: &EndpointSpec) -> Result<ProbeOutcome, ProbeError> {
        debug!(name = %spec.name, url = %spec.url, "probing endpoint");

        let domain = extract_domain(&spec.url).to_string();
        let request = self.build_request(spec)?;

        let start = Instant::now();
        let result = self.client.execute(request).await;
        let latency = start.elapsed();
        let latency_ms = latency.as_millis() as u64;

        let (classification, status) = match result {
            Ok(response) => {
                let status = response.status().as_u16();
                if self.config.classifies_success(status, latency) {
                    debug!(
                        name = %spec.name,
                        domain = %domain,
                        status,
                        latency_ms,
                        "probe succeeded"
                    );
                    (Classification::Success, Some(status))
                } else {
                    debug!(
                        name = %spec.name,
                        domain = %domain,
                        status,
                        latency_ms,
                        "probe failed classification"
                    );
                    let reason = format!("status {status} in {latency_ms}ms");
                    (Classification::Failure { reason }, Some(status))
                }
            }
            Err(e) => {
                error!(name = %spec.name, domain = %domain, error = %e, "probe request failed");
                (
                    Classification::Failure {
                        reason: e.to_string(),
                    },
                    None,
                )
            }
        };

        self.stats.record(&domain, classification.is_success());

        Ok(ProbeOutcome {
            domain,
            classification,
            status,
            latency,
        })
    }

    fn build_request(&self, spec: &EndpointSpec) -> Result<Request, ProbeError> {
        let method = if spec.method.is_empty() {
            Method::GET
        } else {
            Method::from_bytes(spec.method.as_bytes())
                .map_err(|_| ProbeError::InvalidMethod(spec.method.clone()))?
        };

        // The payload is sent JSON-encoded, so an empty body still
        // serializes to `""`.
        let body = serde_json::to_string(&spec.body)?;

        let mut builder = self.client.request(method, &spec.url);
        for (key, value) in &spec.headers {
            builder = builder.header(key, value);
        }

        Ok(builder.body(body).build()?)
    }
}
