use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!("rent_estimates_total", "Total number of rent estimates served");
    describe_counter!(
        "rent_upstream_errors_total",
        "Total number of failed upstream rent lookups"
    );
    describe_counter!(
        "rent_fallbacks_total",
        "Total number of estimates served from fallback data"
    );
    describe_histogram!(
        "rent_estimate_duration_seconds",
        "Estimate duration in seconds"
    );
    describe_gauge!("rent_forecast_info", "Service version information");

    gauge!("rent_forecast_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a served estimate, labelled with the source that produced it
pub fn record_estimate(source: &str, bedrooms: &str) {
    counter!(
        "rent_estimates_total",
        "source" => source.to_string(),
        "bedrooms" => bedrooms.to_string(),
    )
    .increment(1);
}

/// Record an upstream failure
pub fn record_upstream_error(source: &str, error_type: &str) {
    counter!(
        "rent_upstream_errors_total",
        "source" => source.to_string(),
        "error_type" => error_type.to_string(),
    )
    .increment(1);
}

/// Record a degradation to fallback data
pub fn record_fallback(source: &str) {
    counter!("rent_fallbacks_total", "source" => source.to_string()).increment(1);
}

/// Record estimate duration
pub fn record_duration(source: &str, duration: Duration) {
    histogram!(
        "rent_estimate_duration_seconds",
        "source" => source.to_string(),
    )
    .record(duration.as_secs_f64());
}
