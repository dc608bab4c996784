//! Log Capture Utilities for Testing
//!
//! Records tracing events so tests can assert that data-quality warnings
//! were logged. `with_log_capture` installs the capture layer as the
//! thread-local default for the duration of a closure, so parallel tests
//! never see each other's events.

use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

/// Captured log record
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Log capture layer for testing
#[derive(Clone)]
pub struct LogCapture {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all captured log records
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Check if any log message matches pattern
    pub fn contains(&self, pattern: &str) -> bool {
        self.records().iter().any(|r| r.message.contains(pattern))
    }

    /// Messages logged at WARN level
    pub fn warnings(&self) -> Vec<String> {
        self.records()
            .iter()
            .filter(|r| r.level == Level::WARN)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Get all messages matching pattern
    pub fn matching(&self, pattern: &str) -> Vec<String> {
        self.records()
            .iter()
            .filter(|r| r.message.contains(pattern))
            .map(|r| r.message.clone())
            .collect()
    }

    /// Assert no WARN-level log matches pattern
    pub fn assert_no_warning(&self, pattern: &str) {
        let matches: Vec<String> = self
            .warnings()
            .into_iter()
            .filter(|m| m.contains(pattern))
            .collect();
        assert!(
            matches.is_empty(),
            "Expected no warnings matching '{}', but found {} matches:\n{}",
            pattern,
            matches.len(),
            matches.join("\n")
        );
    }

    /// Assert at least one WARN-level log matches pattern
    pub fn assert_warning(&self, pattern: &str) {
        assert!(
            self.warnings().iter().any(|m| m.contains(pattern)),
            "Expected warning matching '{}', but none found. All logs:\n{}",
            pattern,
            self.records()
                .iter()
                .map(|r| format!("{} {}", r.level, r.message))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

impl Default for LogCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> tracing_subscriber::Layer<S> for LogCapture
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        use tracing::field::Visit;

        struct MessageVisitor {
            message: String,
        }

        impl Visit for MessageVisitor {
            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = format!("{:?}", value);
                    // Remove surrounding quotes
                    if self.message.starts_with('"') && self.message.ends_with('"') {
                        self.message = self.message[1..self.message.len() - 1].to_string();
                    }
                }
            }
        }

        let mut visitor = MessageVisitor {
            message: String::new(),
        };
        event.record(&mut visitor);

        self.records.lock().unwrap().push(LogRecord {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
        });
    }
}

/// Run `f` with a capturing subscriber as the thread-local default
pub fn with_log_capture<F, R>(f: F) -> (R, LogCapture)
where
    F: FnOnce() -> R,
{
    let capture = LogCapture::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{info, warn};

    #[test]
    fn test_capture_scoped_to_closure() {
        let ((), capture) = with_log_capture(|| {
            info!("Loaded 5 posts");
            warn!("Other ratio too high");
        });

        assert_eq!(capture.records().len(), 2);
        assert!(capture.contains("Loaded 5 posts"));
        assert_eq!(capture.warnings(), vec!["Other ratio too high".to_string()]);
        capture.assert_warning("Other ratio");
        capture.assert_no_warning("Loaded");
    }

    #[test]
    #[should_panic(expected = "Expected warning matching")]
    fn test_assert_warning_fails() {
        let ((), capture) = with_log_capture(|| info!("not a warning"));
        capture.assert_warning("not a warning");
    }
}
