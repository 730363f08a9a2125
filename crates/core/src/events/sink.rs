//! Diagnostics sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::ReportDiagnostic;

/// Trait for receiving report diagnostics.
///
/// Aggregators are handed a sink at construction and report every tolerated
/// condition through it instead of writing to a process-wide logger.
///
/// # Design Rules
///
/// - `report()` must be fast and non-blocking (no network calls, no DB writes)
/// - Failure to report must not affect the recomputation
pub trait DiagnosticsSink: Send + Sync {
    /// Report a single diagnostic.
    fn report(&self, diagnostic: ReportDiagnostic);
}

/// Sink that forwards diagnostics to the `log` facade.
#[derive(Clone, Default)]
pub struct LogDiagnosticsSink;

impl DiagnosticsSink for LogDiagnosticsSink {
    fn report(&self, diagnostic: ReportDiagnostic) {
        match diagnostic {
            ReportDiagnostic::InvoiceTotalMissing { .. } => log::debug!("{}", diagnostic.message()),
            _ => log::warn!("{}", diagnostic.message()),
        }
    }
}

/// Mock sink for testing - collects reported diagnostics.
#[derive(Clone, Default)]
pub struct MockDiagnosticsSink {
    diagnostics: Arc<Mutex<Vec<ReportDiagnostic>>>,
}

impl MockDiagnosticsSink {
    pub fn new() -> Self {
        Self {
            diagnostics: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all collected diagnostics.
    pub fn diagnostics(&self) -> Vec<ReportDiagnostic> {
        self.diagnostics.lock().unwrap().clone()
    }

    /// Returns the number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.lock().unwrap().len()
    }

    /// Returns true if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().unwrap().is_empty()
    }
}

impl DiagnosticsSink for MockDiagnosticsSink {
    fn report(&self, diagnostic: ReportDiagnostic) {
        self.diagnostics.lock().unwrap().push(diagnostic);
    }
}
