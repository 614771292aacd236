use crate::{
    endpoint::extract_domain,
    prober::Prober,
    stats::StatsStore,
    types::{EndpointSpec, MonitorConfig},
};
use std::sync::Arc;
use tokio::{
    task::JoinHandle,
    time::{interval, sleep},
};
use tracing::{debug, error, info};

/// Owns the validated endpoint list, the shared stats store and the
/// prober. The entry point constructs one and hands it to the dispatch
/// and reporter loops; there is no process-global state.
#[derive(Clone)]
pub struct Monitor {
    endpoints: Arc<Vec<EndpointSpec>>,
    stats: Arc<StatsStore>,
    prober: Prober,
    config: MonitorConfig,
}

impl Monitor {
    /// Seeds one zeroed stats entry per distinct domain up front, so
    /// the reporter knows every configured domain before its first
    /// probe lands.
    pub fn new(endpoints: Vec<EndpointSpec>, config: MonitorConfig) -> Self {
        let stats = Arc::new(StatsStore::new());
        for spec in &endpoints {
            let domain = extract_domain(&spec.url);
            debug!(name = %spec.name, domain, "seeding stats entry");
            stats.seed(domain);
        }

        let prober = Prober::new(Arc::clone(&stats), config.clone());
        Self {
            endpoints: Arc::new(endpoints),
            stats,
            prober,
            config,
        }
    }

    pub fn stats(&self) -> Arc<StatsStore> {
        Arc::clone(&self.stats)
    }

    /// Launches one detached probe task per endpoint. Handles are
    /// returned for callers that want to await a whole cycle; the
    /// dispatch loop drops them and leaves slow probes to finish on
    /// their own.
    pub fn dispatch_cycle(&self) -> Vec<JoinHandle<()>> {
        self.endpoints
            .iter()
            .cloned()
            .map(|spec| {
                let prober = self.prober.clone();
                tokio::spawn(async move {
                    if let Err(e) = prober.probe(&spec).await {
                        error!(name = %spec.name, error = %e, "could not construct probe request");
                    }
                })
            })
            .collect()
    }

    /// Fires one probe per endpoint on a fixed interval, forever.
    /// Cycle timing is interval-based, not completion-based: a probe
    /// still in flight at the next tick simply overlaps it.
    pub async fn run_dispatch(&self) {
        info!(
            endpoints = self.endpoints.len(),
            interval_secs = self.config.dispatch_interval_secs,
            "dispatch loop started"
        );

        let mut timer = interval(self.config.dispatch_interval());
        loop {
            timer.tick().await;
            debug!(endpoints = self.endpoints.len(), "dispatching probe cycle");
            self.dispatch_cycle();
        }
    }

    /// Emits availability lines on its own timer, independent of the
    /// dispatch loop. Shares nothing with it but the stats store.
    pub async fn run_reporter(&self) {
        info!(
            interval_secs = self.config.report_interval_secs,
            "reporter loop started"
        );

        loop {
            sleep(self.config.report_interval()).await;
            self.report_once();
        }
    }

    /// One reporting pass over the current snapshot. A domain with no
    /// completed probe yet is skipped instead of being reported at an
    /// undefined percentage.
    pub fn report_once(&self) {
        for (domain, stats) in self.stats.snapshot() {
            match stats.availability_percent() {
                Some(percentage) => {
                    debug!(
                        %domain,
                        success = stats.success,
                        total = stats.total,
                        "reporting domain"
                    );
                    info!("{domain} has {percentage}% availability");
                }
                None => {
                    debug!(%domain, "no probes completed yet, skipping");
                }
            }
        }
    }
}
