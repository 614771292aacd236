use serde::Deserialize;
use std::{collections::HashMap, time::Duration};

/// One configured HTTP target, loaded once at startup and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    /// HTTP verb; empty means GET.
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Opaque payload, JSON-encoded before sending. May be empty.
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Success,
    Failure { reason: String },
}

impl Classification {
    pub fn is_success(&self) -> bool {
        matches!(self, Classification::Success)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Classification::Failure { .. })
    }
}

/// Result of a single probe. The dispatch loop ignores it; direct
/// callers and tests can inspect it.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub domain: String,
    pub classification: Classification,
    pub status: Option<u16>,
    pub latency: Duration,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub dispatch_interval_secs: u64,
    pub report_interval_secs: u64,
    /// Success status lower bound, inclusive.
    pub status_min: u16,
    /// Success status upper bound, exclusive.
    pub status_max: u16,
    /// Strict upper bound for a probe to classify as success.
    pub latency_threshold_ms: u64,
    /// Hard network timeout, so a hung connection never outlives
    /// classification indefinitely.
    pub request_timeout_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            dispatch_interval_secs: 15,
            report_interval_secs: 15,
            status_min: 200,
            status_max: 300,
            latency_threshold_ms: 500,
            request_timeout_secs: 5,
        }
    }
}

impl MonitorConfig {
    pub fn dispatch_interval(&self) -> Duration {
        Duration::from_secs(self.dispatch_interval_secs)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }

    pub fn latency_threshold(&self) -> Duration {
        Duration::from_millis(self.latency_threshold_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Success iff the status falls in `[status_min, status_max)` and
    /// the probe completed strictly under the latency threshold.
    pub fn classifies_success(&self, status: u16, latency: Duration) -> bool {
        (self.status_min..self.status_max).contains(&status)
            && latency < self.latency_threshold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.dispatch_interval(), Duration::from_secs(15));
        assert_eq!(config.report_interval(), Duration::from_secs(15));
        assert_eq!(config.status_min, 200);
        assert_eq!(config.status_max, 300);
        assert_eq!(config.latency_threshold(), Duration::from_millis(500));
    }

    #[test]
    fn endpoint_spec_optional_fields_default() {
        let spec: EndpointSpec = toml::from_str(
            r#"
            name = "homepage"
            url = "https://example.com/"
            "#,
        )
        .unwrap();

        assert_eq!(spec.name, "homepage");
        assert_eq!(spec.url, "https://example.com/");
        assert!(spec.method.is_empty());
        assert!(spec.headers.is_empty());
        assert!(spec.body.is_empty());
    }
}
