// src/metrics.rs
use ::metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::engine::ClassificationResult;

pub const CLASSIFIED_TOTAL: &str = "occupation_classified_total";
pub const CONFIDENCE: &str = "occupation_confidence";

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Installs the global Prometheus recorder. Only one recorder can exist per
    /// process, so a second call fails.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new().install_recorder()?;
        describe_counter!(CLASSIFIED_TOTAL, "Records classified, by cascade strategy");
        describe_histogram!(CONFIDENCE, "Confidence of emitted codes");
        Ok(Self { handle })
    }

    /// Prometheus exposition text.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

// no-op until a recorder is installed
pub(crate) fn record(result: &ClassificationResult) {
    counter!(CLASSIFIED_TOTAL, "strategy" => result.strategy.label()).increment(1);
    histogram!(CONFIDENCE).record(f64::from(result.confidence));
}
