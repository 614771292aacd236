use dashmap::DashMap;

/// Counters of probe attempts against one domain, accumulated since
/// process start. Never reset, never removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainStats {
    pub success: u64,
    pub total: u64,
}

impl DomainStats {
    /// Availability rounded to a whole percent. `None` until at least
    /// one probe attempt has completed, so the reporter never divides
    /// by zero.
    pub fn availability_percent(&self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        Some((100.0 * self.success as f64 / self.total as f64).round() as u32)
    }
}

/// Process-wide mapping from domain to its counters, shared by every
/// probe task and the reporter. The key set only grows.
pub struct StatsStore {
    domains: DashMap<String, DomainStats>,
}

impl StatsStore {
    pub fn new() -> Self {
        Self {
            domains: DashMap::new(),
        }
    }

    /// Inserts a zeroed entry if the domain is unknown. Idempotent
    /// under concurrent callers; existing counters are never reset.
    pub fn seed(&self, domain: &str) {
        self.domains.entry(domain.to_string()).or_default();
    }

    /// Counts one completed probe attempt. The entry guard is held for
    /// the whole update, so concurrent increments are never lost and
    /// readers never observe a torn success/total pair.
    pub fn record(&self, domain: &str, success: bool) {
        let mut entry = self.domains.entry(domain.to_string()).or_default();
        entry.total += 1;
        if success {
            entry.success += 1;
        }
    }

    pub fn get(&self, domain: &str) -> Option<DomainStats> {
        self.domains.get(domain).map(|entry| *entry)
    }

    /// Point-in-time copy for the reporter. Not tied to any dispatch
    /// cycle boundary; it reflects best effort so far.
    pub fn snapshot(&self) -> Vec<(String, DomainStats)> {
        self.domains
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for StatsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn availability_rounds_to_whole_percent() {
        let stats = DomainStats { success: 3, total: 4 };
        assert_eq!(stats.availability_percent(), Some(75));

        let stats = DomainStats { success: 2, total: 3 };
        assert_eq!(stats.availability_percent(), Some(67));

        let stats = DomainStats { success: 0, total: 5 };
        assert_eq!(stats.availability_percent(), Some(0));
    }

    #[test]
    fn availability_undefined_without_samples() {
        let stats = DomainStats::default();
        assert_eq!(stats.availability_percent(), None);
    }

    #[test]
    fn seed_is_idempotent_and_preserves_counters() {
        let store = StatsStore::new();
        store.seed("example.com");
        store.record("example.com", true);
        store.seed("example.com");

        assert_eq!(
            store.get("example.com"),
            Some(DomainStats { success: 1, total: 1 })
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn record_creates_entry_lazily() {
        let store = StatsStore::new();
        store.record("fresh.example.com", false);

        assert_eq!(
            store.get("fresh.example.com"),
            Some(DomainStats { success: 0, total: 1 })
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_increments_are_never_lost() {
        const TASKS: u64 = 64;
        const PER_TASK: u64 = 50;

        let store = Arc::new(StatsStore::new());

        let mut handles = Vec::with_capacity(TASKS as usize);
        for i in 0..TASKS {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                for _ in 0..PER_TASK {
                    store.record("shared.example.com", i % 2 == 0);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stats = store.get("shared.example.com").unwrap();
        assert_eq!(stats.total, TASKS * PER_TASK);
        assert_eq!(stats.success, TASKS / 2 * PER_TASK);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_first_probes_create_one_entry() {
        let store = Arc::new(StatsStore::new());

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.record("unseen.example.com", true);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("unseen.example.com").unwrap().total, 16);
    }
}
