//! The `ReportWriter` trait implemented by all backend writers.

use crate::{BasinSummaryRow, ParcelAllocationRow, ReportResult};

/// Trait implemented by report backends.
pub trait ReportWriter {
    /// Write a batch of per-crop allocation rows.
    fn write_allocations(&mut self, rows: &[ParcelAllocationRow]) -> ReportResult<()>;

    /// Write one basin summary row.
    fn write_summary(&mut self, row: &BasinSummaryRow) -> ReportResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> ReportResult<()>;
}
