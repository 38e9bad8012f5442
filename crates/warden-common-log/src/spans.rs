//! Tracing spans for authorization work.

use tracing::{info_span, Span};

/// Span wrapping a single CLI command.
pub fn command_span(command: &str) -> Span {
    info_span!("command", name = %command)
}

/// Span wrapping one permission decision.
pub fn decision_span(subject: &str, resource: &str, action: &str) -> Span {
    info_span!("decision", subject = %subject, resource = %resource, action = %action)
}

/// Span wrapping state store access.
pub fn store_span(operation: &str, key: &str) -> Span {
    info_span!("store", op = %operation, key = %key)
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Complete the timer and record duration.
    pub fn finish(self) {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_us = %duration.as_micros(),
            "operation completed"
        );
    }
}

/// Macro for timing a block of code.
#[macro_export]
macro_rules! timed {
    ($name:expr, $body:expr) => {{
        let _timer = $crate::spans::Timer::start($name);
        let result = $body;
        _timer.finish();
        result
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_construct_without_subscriber() {
        let _ = command_span("check").enter();
        let _ = decision_span("developer", "s3", "upload");
        let _ = store_span("get", "activeRole");
    }

    #[test]
    fn test_timed_macro_returns_value() {
        let value = crate::timed!("sum", 2 + 2);
        assert_eq!(value, 4);
    }
}
