//! Metric names and the fault counter

use opentelemetry::KeyValue;
use opentelemetry::metrics::Counter;

/// Faults classified, labelled by bucket and status
pub const FAULT_COUNT: &str = "http.server.fault.count";

/// Counter for classified faults
///
/// Backed by the global meter provider, so it records nothing until an
/// exporter is configured.
#[derive(Clone)]
pub struct FaultMetrics {
    faults: Counter<u64>,
}

impl FaultMetrics {
    pub fn new() -> Self {
        let meter = opentelemetry::global::meter("fataplus");
        let faults = meter
            .u64_counter(FAULT_COUNT)
            .with_description("Failed requests by classification bucket")
            .build();

        Self { faults }
    }

    /// Count one classified fault
    pub fn record_fault(&self, bucket: &'static str, status: u16) {
        self.faults.add(
            1,
            &[
                KeyValue::new("fault.bucket", bucket),
                KeyValue::new("http.response.status_code", i64::from(status)),
            ],
        );
    }
}

impl Default for FaultMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FaultMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaultMetrics").finish_non_exhaustive()
    }
}
