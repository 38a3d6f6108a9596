//! Metrics collection for the Swarm client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// How a single call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A 2xx response.
    Success,
    /// A 429 response.
    Throttled,
    /// Any other non-2xx response.
    Failed,
    /// No response within the request timeout.
    TimedOut,
    /// No response for any other reason.
    NoResponse,
}

/// Metrics collector interface.
pub trait MetricsCollector: Send + Sync {
    /// Records a finished call.
    fn record_request(&self, operation: &str, outcome: RequestOutcome, duration: Duration);

    /// Gets current metrics.
    fn get_metrics(&self) -> RequestMetrics;

    /// Resets all metrics.
    fn reset(&self);
}

/// Request metrics snapshot.
#[derive(Debug, Clone, Default)]
pub struct RequestMetrics {
    /// Total requests.
    pub total_requests: u64,
    /// Requests answered with 2xx.
    pub successful_requests: u64,
    /// Requests answered with a non-2xx status other than 429.
    pub failed_requests: u64,
    /// Requests answered with 429.
    pub throttled_requests: u64,
    /// Requests that hit the request timeout.
    pub timed_out_requests: u64,
    /// Requests that failed without a response for other reasons.
    pub unanswered_requests: u64,
    /// Total latency in milliseconds.
    pub total_latency_ms: u64,
    /// Requests per operation.
    pub operations: HashMap<String, u64>,
}

impl RequestMetrics {
    /// Calculates average latency in milliseconds.
    pub fn average_latency_ms(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.total_latency_ms as f64 / self.total_requests as f64
        }
    }

    /// Calculates success rate as a percentage.
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            100.0
        } else {
            (self.successful_requests as f64 / self.total_requests as f64) * 100.0
        }
    }
}

/// Default metrics collector implementation.
#[derive(Default)]
pub struct DefaultMetricsCollector {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
    throttled_requests: AtomicU64,
    timed_out_requests: AtomicU64,
    unanswered_requests: AtomicU64,
    total_latency_ms: AtomicU64,
    operations: RwLock<HashMap<String, u64>>,
}

impl DefaultMetricsCollector {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsCollector for DefaultMetricsCollector {
    fn record_request(&self, operation: &str, outcome: RequestOutcome, duration: Duration) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);

        let counter = match outcome {
            RequestOutcome::Success => &self.successful_requests,
            RequestOutcome::Throttled => &self.throttled_requests,
            RequestOutcome::Failed => &self.failed_requests,
            RequestOutcome::TimedOut => &self.timed_out_requests,
            RequestOutcome::NoResponse => &self.unanswered_requests,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        self.total_latency_ms.fetch_add(
            u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            Ordering::Relaxed,
        );

        if let Ok(mut ops) = self.operations.write() {
            *ops.entry(operation.to_string()).or_insert(0) += 1;
        }
    }

    fn get_metrics(&self) -> RequestMetrics {
        RequestMetrics {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            throttled_requests: self.throttled_requests.load(Ordering::Relaxed),
            timed_out_requests: self.timed_out_requests.load(Ordering::Relaxed),
            unanswered_requests: self.unanswered_requests.load(Ordering::Relaxed),
            total_latency_ms: self.total_latency_ms.load(Ordering::Relaxed),
            operations: self.operations.read().map(|o| o.clone()).unwrap_or_default(),
        }
    }

    fn reset(&self) {
        self.total_requests.store(0, Ordering::Relaxed);
        self.successful_requests.store(0, Ordering::Relaxed);
        self.failed_requests.store(0, Ordering::Relaxed);
        self.throttled_requests.store(0, Ordering::Relaxed);
        self.timed_out_requests.store(0, Ordering::Relaxed);
        self.unanswered_requests.store(0, Ordering::Relaxed);
        self.total_latency_ms.store(0, Ordering::Relaxed);

        if let Ok(mut ops) = self.operations.write() {
            ops.clear();
        }
    }
}

impl std::fmt::Debug for DefaultMetricsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultMetricsCollector")
            .field("total_requests", &self.total_requests.load(Ordering::Relaxed))
            .field(
                "throttled_requests",
                &self.throttled_requests.load(Ordering::Relaxed),
            )
            .finish()
    }
}
