use prometheus::{Histogram, IntCounterVec, Registry};

#[derive(Clone)]
pub struct AvailabilityMetrics {
    pub registry: Registry,
    pub checks_total: IntCounterVec,
    pub stock_lookup_duration_seconds: Histogram,
    pub stock_source_reloads_total: IntCounterVec,
    pub http_errors_total: IntCounterVec,
}

impl AvailabilityMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        let checks_total = IntCounterVec::new(
            prometheus::Opts::new(
                "availability_checks_total",
                "Availability verdicts returned, by outcome"
            ),
            &["outcome"]
        ).expect("valid availability_checks_total metric");
        let stock_lookup_duration_seconds = Histogram::with_opts(
            prometheus::HistogramOpts::new(
                "stock_lookup_duration_seconds",
                "Time spent resolving a stock figure from the stock source"
            ).buckets(vec![0.0001,0.0005,0.001,0.005,0.01,0.05,0.1,0.5,1.0,5.0])
        ).expect("valid stock_lookup_duration_seconds metric");
        let stock_source_reloads_total = IntCounterVec::new(
            prometheus::Opts::new(
                "stock_source_reloads_total",
                "Stock source reload attempts, by result"
            ),
            &["result"]
        ).expect("valid stock_source_reloads_total metric");
        let http_errors_total = IntCounterVec::new(
            prometheus::Opts::new(
                "http_errors_total",
                "Count of HTTP error responses emitted (status >= 400)"
            ),
            &["service", "code", "status"]
        ).expect("valid http_errors_total metric");
        let _ = registry.register(Box::new(checks_total.clone()));
        let _ = registry.register(Box::new(stock_lookup_duration_seconds.clone()));
        let _ = registry.register(Box::new(stock_source_reloads_total.clone()));
        let _ = registry.register(Box::new(http_errors_total.clone()));
        AvailabilityMetrics { registry, checks_total, stock_lookup_duration_seconds, stock_source_reloads_total, http_errors_total }
    }

    /// Prometheus text exposition of every registered family.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        use prometheus::{Encoder, TextEncoder};
        let encoder = TextEncoder::new();
        let mut buf = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).to_string())
    }
}

impl Default for AvailabilityMetrics {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_labelled_counters() {
        let metrics = AvailabilityMetrics::new();
        metrics.checks_total.with_label_values(&["available"]).inc();
        metrics.http_errors_total.with_label_values(&["availability-service", "invalid_json", "400"]).inc();
        let text = metrics.render().unwrap();
        assert!(text.contains("availability_checks_total{outcome=\"available\"} 1"), "{text}");
        assert!(text.contains("http_errors_total"), "{text}");
    }
}
