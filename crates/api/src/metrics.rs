use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};
use std::time::Duration;

/// OpenTelemetry instruments for the prediction endpoint. No-ops unless a
/// global meter provider was installed by `common::TelemetryGuard`.
#[derive(Clone)]
pub struct PredictionMetrics {
    duration: Histogram<f64>,
    predictions: Counter<u64>,
    failures: Counter<u64>,
}

impl PredictionMetrics {
    pub fn new(meter_name: &'static str) -> Self {
        let meter = global::meter(meter_name);
        let latency_buckets = [
            0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.15, 0.2, 0.3, 0.5, 0.75, 1.0, 2.0, 5.0,
        ];
        let duration = meter
            .f64_histogram("prediction_duration_seconds")
            .with_description("Time to classify one upload (decode + resize + infer + argmax)")
            .with_unit("s")
            .with_boundaries(latency_buckets.to_vec())
            .build();
        let predictions = meter
            .u64_counter("predictions_total")
            .with_description("Total successful predictions, by label")
            .build();
        let failures = meter
            .u64_counter("prediction_failures_total")
            .with_description("Total uploads that could not be classified")
            .build();

        Self {
            duration,
            predictions,
            failures,
        }
    }

    pub fn record_success(&self, label: &'static str, elapsed: Duration) {
        self.duration.record(elapsed.as_secs_f64(), &[]);
        self.predictions.add(1, &[KeyValue::new("label", label)]);
    }

    pub fn record_failure(&self) {
        self.failures.add(1, &[]);
    }
}
