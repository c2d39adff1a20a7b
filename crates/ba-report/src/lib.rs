//! `ba-report` — exporters for basin allocation plans.
//!
//! Flattens [`ba_plan::BasinPlan`] and per-parcel results into plain row
//! types and writes them through a backend:
//!
//! | Backend | Files created                                  |
//! |---------|------------------------------------------------|
//! | CSV     | `parcel_allocations.csv`, `basin_summary.csv`  |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ba_report::{basin_rows, basin_summary, CsvReporter, ReportWriter};
//!
//! let mut reporter = CsvReporter::new(Path::new("./output"))?;
//! reporter.write_allocations(&basin_rows(scenario, algorithm, &plan))?;
//! reporter.write_summary(&basin_summary(scenario, algorithm, &plan))?;
//! reporter.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvReporter;
pub use error::{ReportError, ReportResult};
pub use row::{basin_rows, basin_summary, parcel_rows, BasinSummaryRow, ParcelAllocationRow};
pub use writer::ReportWriter;
