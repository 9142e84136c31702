//! Diagnostic sinks: where error reports end up.

use std::sync::Arc;

use canconf_errors::ErrorSeverity;
use parking_lot::Mutex;

/// Destination for diagnostic messages.
///
/// `emit` must not block the caller and must not fail; a sink that cannot
/// deliver a message drops it.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, severity: ErrorSeverity, message: &str);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn emit(&self, severity: ErrorSeverity, message: &str) {
        (**self).emit(severity, message);
    }
}

/// Forwards each message to `tracing` at the level matching its severity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, severity: ErrorSeverity, message: &str) {
        match severity {
            ErrorSeverity::Info => tracing::info!(target: "canconf::diagnostics", "{message}"),
            ErrorSeverity::Warning => tracing::warn!(target: "canconf::diagnostics", "{message}"),
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                tracing::error!(target: "canconf::diagnostics", severity = %severity, "{message}")
            }
        }
    }
}

/// Keeps every message in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(ErrorSeverity, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(ErrorSeverity, String)> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Number of messages containing `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|(_, message)| message.contains(needle))
            .count()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, severity: ErrorSeverity, message: &str) {
        self.entries.lock().push((severity, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.emit(ErrorSeverity::Error, "first");
        sink.emit(ErrorSeverity::Warning, "second");
        assert_eq!(sink.messages(), vec!["first", "second"]);
        assert_eq!(sink.entries()[1].0, ErrorSeverity::Warning);
    }

    #[test]
    fn test_shared_sink_through_arc() {
        let sink = Arc::new(MemorySink::new());
        let shared: Arc<dyn DiagnosticSink> = sink.clone();
        shared.emit(ErrorSeverity::Error, "boom");
        assert_eq!(sink.count_containing("boom"), 1);
    }

    #[test]
    fn test_tracing_sink_never_panics_without_subscriber() {
        TracingSink.emit(ErrorSeverity::Critical, "no subscriber installed");
    }
}
