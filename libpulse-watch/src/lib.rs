pub mod config;
mod endpoint;
mod http;
mod monitor;
mod prober;
mod stats;
mod types;

pub use endpoint::{extract_domain, validate_endpoints};
pub use monitor::Monitor;
pub use prober::{ProbeError, Prober};
pub use stats::{DomainStats, StatsStore};
pub use types::{Classification, EndpointSpec, MonitorConfig, ProbeOutcome};

/// Probes every endpoint once and waits for the cycle to finish,
/// returning the resulting per-domain counters. Convenience for
/// one-shot checks; the long-running loops live on [`Monitor`].
pub async fn probe_once(
    endpoints: Vec<EndpointSpec>,
    config: MonitorConfig,
) -> Vec<(String, DomainStats)> {
    let monitor = Monitor::new(endpoints, config);
    for handle in monitor.dispatch_cycle() {
        let _ = handle.await;
    }
    monitor.stats().snapshot()
}
