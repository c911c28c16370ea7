//! Scenario state for the diff export BDD tests.

use diffexport::delivery::test_support::RecordingSink;
use diffexport::{DiffLine, ExportError, ExportResult};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Scenario state for diff export tests.
#[derive(ScenarioState, Default)]
pub(crate) struct DiffExportState {
    pub(crate) lines: Slot<Vec<DiffLine>>,
    pub(crate) sink: Slot<RecordingSink>,
    pub(crate) result: Slot<ExportResult>,
    pub(crate) error: Slot<ExportError>,
}

impl DiffExportState {
    /// Returns the scenario's sink, creating a permissive one on first use.
    pub(crate) fn sink(&self) -> RecordingSink {
        if let Some(sink) = self.sink.with_ref(Clone::clone) {
            return sink;
        }
        let sink = RecordingSink::new();
        self.sink.set(sink.clone());
        sink
    }

    /// Returns the scenario's diff lines, empty when none were given.
    pub(crate) fn lines(&self) -> Vec<DiffLine> {
        self.lines.with_ref(Clone::clone).unwrap_or_default()
    }

    /// Records the outcome of an export operation.
    pub(crate) fn record<T>(&self, outcome: Result<T, ExportError>) -> Option<T> {
        match outcome {
            Ok(value) => {
                drop(self.error.take());
                Some(value)
            }
            Err(error) => {
                self.error.set(error);
                None
            }
        }
    }
}
