// ABOUTME: Performance timing utilities using tracing spans
// ABOUTME: Records elapsed time for batch operations and flags slow ones

use std::time::{Duration, Instant};
use tracing::{Level, Span, field, span, warn};

/// Timer guard that records elapsed time when dropped
pub struct PerfTimer {
    span: Span,
    start: Instant,
    operation: String,
    warn_threshold: Option<Duration>,
}

impl PerfTimer {
    /// Create a new performance timer
    pub fn new(operation: &str) -> Self {
        let span =
            span!(Level::DEBUG, "perf_timer", operation = %operation, elapsed_ms = field::Empty);

        Self {
            span,
            start: Instant::now(),
            operation: operation.to_string(),
            warn_threshold: None,
        }
    }

    /// Operations taking longer than `threshold` log a warning
    pub fn with_warn_threshold(mut self, threshold: Duration) -> Self {
        self.warn_threshold = Some(threshold);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        #[allow(clippy::cast_precision_loss)]
        let elapsed_ms = elapsed.as_millis() as f64;

        self.span.record("elapsed_ms", elapsed_ms);

        if let Some(threshold) = self.warn_threshold {
            if elapsed > threshold {
                #[allow(clippy::cast_precision_loss)]
                let threshold_ms = threshold.as_millis() as f64;
                warn!(
                    operation = %self.operation,
                    elapsed_ms = elapsed_ms,
                    threshold_ms = threshold_ms,
                    "Slow operation detected"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tracing_mock::{expect, subscriber};

    #[test]
    fn test_perf_timer_elapsed() {
        let timer = PerfTimer::new("resolve_batch");
        thread::sleep(Duration::from_millis(5));
        assert!(timer.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_perf_timer_span_creation() {
        let (subscriber, handle) = subscriber::mock()
            .new_span(expect::span().named("perf_timer"))
            .drop_span(expect::span().named("perf_timer"))
            .only()
            .run_with_handle();

        tracing::subscriber::with_default(subscriber, || {
            let timer = PerfTimer::new("resolve_batch");
            drop(timer);
        });

        handle.assert_finished();
    }

    #[test]
    fn test_perf_timer_warns_when_slow() {
        let (subscriber, handle) = subscriber::mock()
            .new_span(expect::span().named("perf_timer"))
            .event(expect::event().with_fields(expect::msg("Slow operation detected")))
            .drop_span(expect::span().named("perf_timer"))
            .only()
            .run_with_handle();

        tracing::subscriber::with_default(subscriber, || {
            let timer =
                PerfTimer::new("resolve_batch").with_warn_threshold(Duration::from_millis(1));
            thread::sleep(Duration::from_millis(10));
            drop(timer);
        });

        handle.assert_finished();
    }
}
