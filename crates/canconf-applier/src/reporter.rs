//! Error reporting for failed capability calls.

use std::sync::Arc;

use canconf_device::{DeviceFamily, DeviceId, Operation, StatusCode};
use canconf_errors::DeviceConfigError;

use crate::sink::{DiagnosticSink, TracingSink};

/// Turns a failed capability call into a diagnostic message.
///
/// Reporting never fails and never aborts. Repeated identical failures
/// produce repeated entries.
#[derive(Clone)]
pub struct ErrorReporter {
    sink: Arc<dyn DiagnosticSink>,
}

impl ErrorReporter {
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    /// Report one failed call and return the error that was reported.
    pub fn report(
        &self,
        device_id: DeviceId,
        family: DeviceFamily,
        operation: Operation,
        status: StatusCode,
    ) -> DeviceConfigError {
        let error = DeviceConfigError::new(
            device_id.get(),
            family.name(),
            operation.name(),
            status.as_str(),
            status.code(),
        );
        self.sink.emit(error.severity(), &error.to_string());
        error
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use canconf_errors::ErrorSeverity;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_report_formats_message() -> TestResult {
        let sink = Arc::new(MemorySink::new());
        let reporter = ErrorReporter::new(sink.clone());

        let error = reporter.report(
            DeviceId::new(5)?,
            DeviceFamily::BrushlessSmart,
            Operation::SetIdleMode,
            StatusCode::CanTimeout,
        );

        assert_eq!(error.code, -2);
        assert_eq!(
            sink.entries(),
            vec![(
                ErrorSeverity::Error,
                "Could not configure brushless smart controller id: 5 error: CAN timeout set neutral"
                    .to_string()
            )]
        );
        Ok(())
    }

    #[test]
    fn test_repeated_reports_are_not_deduplicated() -> TestResult {
        let sink = Arc::new(MemorySink::new());
        let reporter = ErrorReporter::new(sink.clone());
        let id = DeviceId::new(1)?;
        for _ in 0..3 {
            reporter.report(
                id,
                DeviceFamily::IntegratedSensor,
                Operation::SetInverted,
                StatusCode::TxFailed,
            );
        }
        assert_eq!(sink.len(), 3);
        Ok(())
    }
}
