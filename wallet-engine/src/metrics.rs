use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder,
};

lazy_static! {
    pub static ref TRANSFERS_COMMITTED: IntCounter = IntCounter::new(
        "wallet_transfers_committed_total",
        "Committed peer-to-peer transfers"
    )
    .expect("metric can be created");

    pub static ref PURCHASES_COMMITTED: IntCounter = IntCounter::new(
        "wallet_purchases_committed_total",
        "Committed catalog purchases"
    )
    .expect("metric can be created");

    pub static ref INSUFFICIENT_FUNDS_REJECTIONS: IntCounter = IntCounter::new(
        "wallet_insufficient_funds_total",
        "Mutations rejected for insufficient funds"
    )
    .expect("metric can be created");

    pub static ref OPERATION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "wallet_operation_duration_seconds",
            "Transfer engine operation duration in seconds"
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0])
    )
    .expect("metric can be created");
}

/// Register all metrics with the given registry
pub fn register_metrics(registry: &Registry) -> Result<(), Box<dyn std::error::Error>> {
    registry.register(Box::new(TRANSFERS_COMMITTED.clone()))?;
    registry.register(Box::new(PURCHASES_COMMITTED.clone()))?;
    registry.register(Box::new(INSUFFICIENT_FUNDS_REJECTIONS.clone()))?;
    registry.register(Box::new(OPERATION_DURATION.clone()))?;

    Ok(())
}

/// Generate metrics output in Prometheus text format
pub fn metrics_handler() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
