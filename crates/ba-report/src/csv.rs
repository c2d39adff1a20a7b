//! CSV report backend.
//!
//! Creates two files in the configured output directory:
//! - `parcel_allocations.csv`
//! - `basin_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::ReportWriter;
use crate::{BasinSummaryRow, ParcelAllocationRow, ReportResult};

/// Writes plan reports to two CSV files.
pub struct CsvReporter {
    allocations: Writer<File>,
    summaries:   Writer<File>,
    finished:    bool,
}

impl CsvReporter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> ReportResult<Self> {
        let mut allocations = Writer::from_path(dir.join("parcel_allocations.csv"))?;
        allocations.write_record([
            "parcel_id", "scenario", "algorithm", "crop", "area_da", "water_m3", "profit_tl",
            "fallback",
        ])?;

        let mut summaries = Writer::from_path(dir.join("basin_summary.csv"))?;
        summaries.write_record([
            "scenario", "algorithm", "parcels", "area_da", "water_m3", "budget_m3", "profit_tl",
            "efficiency_tl_per_m3", "iterations", "feasible",
        ])?;

        Ok(Self {
            allocations,
            summaries,
            finished: false,
        })
    }
}

impl ReportWriter for CsvReporter {
    fn write_allocations(&mut self, rows: &[ParcelAllocationRow]) -> ReportResult<()> {
        for row in rows {
            self.allocations.write_record(&[
                row.parcel_id.to_string(),
                row.scenario.to_string(),
                row.algorithm.to_string(),
                row.crop.clone(),
                row.area_da.to_string(),
                row.water_m3.to_string(),
                row.profit_tl.to_string(),
                (row.fallback as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &BasinSummaryRow) -> ReportResult<()> {
        self.summaries.write_record(&[
            row.scenario.to_string(),
            row.algorithm.to_string(),
            row.parcels.to_string(),
            row.area_da.to_string(),
            row.water_m3.to_string(),
            row.budget_m3.to_string(),
            row.profit_tl.to_string(),
            row.efficiency_tl_per_m3.to_string(),
            row.iterations.to_string(),
            (row.feasible as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.allocations.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
