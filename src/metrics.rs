//! In-memory operational metrics.
//!
//! Counts requests, successes and failures and tracks latency. Nothing is
//! persisted; counters start from zero with every process.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
struct Counters {
    total_requests: u64,
    success_requests: u64,
    failed_requests: u64,
    last_latency_ms: Option<f64>,
    latency_ms_sum: f64,
    latency_ms_count: u64,
    last_error: Option<String>,
}

/// Thread-safe request counters.
#[derive(Debug, Default)]
pub struct Metrics {
    counters: Mutex<Counters>,
}

impl Metrics {
    /// Create zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Counters> {
        // counters stay consistent even if a holder panicked
        self.counters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record a successful request.
    pub fn record_success(&self, latency: Duration) {
        let latency_ms = duration_ms(latency);
        let mut c = self.lock();
        c.total_requests += 1;
        c.success_requests += 1;
        c.last_latency_ms = Some(latency_ms);
        c.latency_ms_sum += latency_ms;
        c.latency_ms_count += 1;
        c.last_error = None;
    }

    /// Record a failed request. Failures do not count toward average latency.
    pub fn record_failure(&self, latency: Option<Duration>, error: impl Into<String>) {
        let mut c = self.lock();
        c.total_requests += 1;
        c.failed_requests += 1;
        c.last_latency_ms = latency.map(duration_ms);
        c.last_error = Some(error.into());
    }

    /// Take a consistent copy of the counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let c = self.lock();
        let avg_latency_ms = if c.latency_ms_count > 0 {
            Some(c.latency_ms_sum / c.latency_ms_count as f64)
        } else {
            None
        };
        MetricsSnapshot {
            total_requests: c.total_requests,
            success_requests: c.success_requests,
            failed_requests: c.failed_requests,
            last_latency_ms: c.last_latency_ms,
            avg_latency_ms,
            last_error: c.last_error.clone(),
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        *self.lock() = Counters::default();
    }
}

/// Point-in-time copy of [`Metrics`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Requests seen
    pub total_requests: u64,
    /// Requests that produced sentences
    pub success_requests: u64,
    /// Requests that failed
    pub failed_requests: u64,
    /// Latency of the most recent request
    pub last_latency_ms: Option<f64>,
    /// Mean latency of successful requests
    pub avg_latency_ms: Option<f64>,
    /// Error of the most recent request, cleared by a success
    pub last_error: Option<String>,
}

pub(crate) fn duration_ms(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Metrics::new().snapshot();
        assert_eq!(snapshot, MetricsSnapshot::default());
        assert!(snapshot.avg_latency_ms.is_none());
    }

    #[test]
    fn test_success_and_failure() {
        let metrics = Metrics::new();
        metrics.record_success(Duration::from_millis(10));
        metrics.record_success(Duration::from_millis(30));
        metrics.record_failure(None, "unreadable");

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_requests, 3);
        assert_eq!(snapshot.success_requests, 2);
        assert_eq!(snapshot.failed_requests, 1);
        assert_eq!(snapshot.avg_latency_ms, Some(20.0));
        assert_eq!(snapshot.last_latency_ms, None);
        assert_eq!(snapshot.last_error.as_deref(), Some("unreadable"));

        metrics.record_success(Duration::from_millis(5));
        assert!(metrics.snapshot().last_error.is_none());
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.record_failure(Some(Duration::from_millis(1)), "boom");
        metrics.reset();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_concurrent_updates() {
        let metrics = Arc::new(Metrics::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        metrics.record_success(Duration::from_millis(1));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(metrics.snapshot().success_requests, 800);
    }
}
