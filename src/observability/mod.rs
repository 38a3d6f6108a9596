//! Observability module for the Swarm client.
//!
//! Structured logging goes through `tracing`; [`init_tracing`] installs a
//! subscriber for binaries that do not bring their own. Per-call counters are
//! kept by a [`MetricsCollector`].

pub mod logging;
mod metrics;

pub use logging::{init_tracing, redact_body, LogConfig};
pub use metrics::{DefaultMetricsCollector, MetricsCollector, RequestMetrics, RequestOutcome};
