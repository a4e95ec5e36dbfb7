//! Utility functions for tracing

/// Create a span for one CLI command
///
/// Declares the fields [`record_error`] and [`record_duration`] write to.
///
/// # Example
///
/// ```rust
/// use wod_observability::command_span;
///
/// let span = command_span!("generate");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! command_span {
    ($command:expr) => {
        tracing::info_span!(
            "wod.command",
            command = $command,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span
///
/// Sets `error` and `error.message` on the current span and emits an error event.
pub fn record_error<E: std::error::Error + ?Sized>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record latency/duration on the current span
///
/// # Example
///
/// ```rust
/// use wod_observability::record_duration;
/// use std::time::Instant;
///
/// let start = Instant::now();
/// record_duration("duration_ms", start.elapsed());
/// ```
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
