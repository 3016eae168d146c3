//! Integration tests for telemetry initialization and span helpers.

use glb_rs::telemetry::compute::{record_compute_finished, start_compute_span};
use glb_rs::telemetry::{TelemetryConfig, init_telemetry};

#[test]
fn telemetry_initializes_at_most_once() {
    // Note: tracing subscriber can only be set once per process. The first
    // call may succeed; any later one must fail cleanly instead of panicking.
    let _ = init_telemetry(TelemetryConfig::default());
    let again = init_telemetry(TelemetryConfig {
        log_level: "debug".to_string(),
        compact: true,
    });
    assert!(again.is_err());
}

#[test]
fn compute_span_creates_and_records_completion() {
    let span = start_compute_span("loop", 500);
    record_compute_finished(&span, 12, 3);
}
