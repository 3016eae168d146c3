//! Compute span helpers.
//!
//! Provides span creation and completion recording for processor runs.

use tracing::Span;

/// Start a span for one `compute` call.
///
/// The `glb.slices` and `glb.duration_ms` fields are declared empty and
/// filled in by [`record_compute_finished`].
pub fn start_compute_span(processor: &str, work_size: usize) -> Span {
    tracing::info_span!(
        "glb.compute",
        "glb.processor" = processor,
        "glb.work_size" = work_size,
        "glb.slices" = tracing::field::Empty,
        "glb.duration_ms" = tracing::field::Empty,
    )
}

/// Record how a run ended and emit an `info` event scoped to its span.
pub fn record_compute_finished(span: &Span, slices: u64, duration_ms: u64) {
    span.record("glb.slices", slices);
    span.record("glb.duration_ms", duration_ms);
    span.in_scope(|| {
        tracing::info!(slices, duration_ms, "compute finished");
    });
}
