//! Prometheus metrics for the posting host.
//!
//! All metrics follow the naming convention: `dm_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // TRANSACTION METRICS
    // =========================================================================

    /// Transactions committed
    pub static ref TRANSACTIONS_APPLIED: Counter = Counter::new(
        "dm_host_transactions_applied_total",
        "Total number of transactions committed"
    ).expect("metric creation failed");

    /// Transactions rolled back, by error kind
    pub static ref TRANSACTIONS_ABORTED: CounterVec = CounterVec::new(
        Opts::new("dm_host_transactions_aborted_total", "Transactions rolled back by error kind"),
        &["kind"]
    ).expect("metric creation failed");

    /// Transaction execution time
    pub static ref TRANSACTION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "dm_host_transaction_duration_seconds",
            "Time spent executing a transaction"
        ).buckets(exponential_buckets(0.00001, 2.0, 16).expect("valid buckets"))
    ).expect("metric creation failed");

    // =========================================================================
    // ACTION METRICS
    // =========================================================================

    /// Actions executed, by program account and action name
    pub static ref ACTIONS_EXECUTED: CounterVec = CounterVec::new(
        Opts::new("dm_host_actions_executed_total", "Actions executed by account and action"),
        &["account", "action"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry. Safe to call repeatedly.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TRANSACTIONS_APPLIED.clone()),
        Box::new(TRANSACTIONS_ABORTED.clone()),
        Box::new(TRANSACTION_DURATION.clone()),
        Box::new(ACTIONS_EXECUTED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Render all metrics in the Prometheus text exposition format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    register_metrics()?;
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}
