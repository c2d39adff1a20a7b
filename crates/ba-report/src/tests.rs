//! Integration tests for ba-report.

#[cfg(test)]
mod row_tests {
    use ba_core::{
        Algorithm, CropAllocationRow, CropKey, OptimizationResult, ParcelId, Scenario,
    };

    use crate::row::parcel_rows;

    fn two_crop_result() -> OptimizationResult {
        OptimizationResult::from_rows(
            vec![
                CropAllocationRow::new(CropKey::new("Buğday"), 6.0, 300.0, 2000.0),
                CropAllocationRow::new(CropKey::new("Mısır"), 4.0, 600.0, 4000.0),
            ],
            true,
            false,
        )
    }

    #[test]
    fn one_row_per_crop() {
        let rows = parcel_rows(ParcelId(7), Scenario::MaxProfit, Algorithm::Ga, &two_crop_result());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].parcel_id, 7);
        assert_eq!(rows[0].scenario, "max_profit");
        assert_eq!(rows[0].algorithm, "ga");
        assert_eq!(rows[0].crop, "BUGDAY");
        assert!((rows[0].water_m3 - 1800.0).abs() < 1e-9);
        assert!((rows[1].profit_tl - 16_000.0).abs() < 1e-9);
        assert!(!rows[1].fallback);
    }

    #[test]
    fn empty_result_produces_no_rows() {
        let rows = parcel_rows(
            ParcelId(1),
            Scenario::Current,
            Algorithm::Abc,
            &OptimizationResult::empty(),
        );
        assert!(rows.is_empty());
    }
}

#[cfg(test)]
mod basin_tests {
    use ba_core::{Algorithm, Crop, CropAllocationRow, CropKey, Parcel, ParcelId, Scenario};
    use ba_plan::{
        EngineConfig, FixedBudget, NoBonus, NoopObserver, PlanContext, Planner, StaticCandidates,
    };

    use crate::row::{basin_rows, basin_summary};

    fn parcel(id: u32) -> Parcel {
        Parcel::new(ParcelId(id), 10.0).with_baseline(vec![CropAllocationRow::new(
            CropKey::new("Crop A"),
            10.0,
            300.0,
            2000.0,
        )])
    }

    fn plan() -> std::sync::Arc<ba_plan::BasinPlan> {
        let mut planner = Planner::new(
            EngineConfig::default(),
            PlanContext::default(),
            vec![parcel(2), parcel(1)],
            StaticCandidates::new(vec![Crop::new("Crop A", 300.0, 2000.0)]),
            FixedBudget { basin_m3: 1e9, per_da_m3: 600.0 },
            NoBonus,
        )
        .unwrap();
        planner
            .compute_basin_plan(Scenario::Current, Algorithm::Ga, &mut NoopObserver)
            .unwrap()
    }

    #[test]
    fn rows_are_ordered_by_parcel_id() {
        let rows = basin_rows(Scenario::Current, Algorithm::Ga, &plan());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].parcel_id, 1);
        assert_eq!(rows[1].parcel_id, 2);
    }

    #[test]
    fn summary_matches_plan_totals() {
        let plan = plan();
        let summary = basin_summary(Scenario::Current, Algorithm::Ga, &plan);
        assert_eq!(summary.parcels, 2);
        assert!((summary.water_m3 - 6000.0).abs() < 1e-9);
        assert!((summary.profit_tl - 40_000.0).abs() < 1e-9);
        assert!((summary.efficiency_tl_per_m3 - 40_000.0 / 6000.0).abs() < 1e-9);
        assert!(summary.feasible);
        assert_eq!(summary.iterations, 0);
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvReporter;
    use crate::row::{BasinSummaryRow, ParcelAllocationRow};
    use crate::writer::ReportWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn allocation_row(parcel_id: u32, crop: &str) -> ParcelAllocationRow {
        ParcelAllocationRow {
            parcel_id,
            scenario:  "max_profit",
            algorithm: "ga",
            crop:      crop.to_string(),
            area_da:   5.0,
            water_m3:  1500.0,
            profit_tl: 10_000.0,
            fallback:  false,
        }
    }

    fn summary_row() -> BasinSummaryRow {
        BasinSummaryRow {
            scenario:  "max_profit",
            algorithm: "ga",
            parcels:   3,
            area_da:   30.0,
            water_m3:  12_000.0,
            budget_m3: 12_000.0,
            profit_tl: 80_000.0,
            efficiency_tl_per_m3: 80_000.0 / 12_000.0,
            iterations: 5,
            feasible:   true,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvReporter::new(dir.path()).unwrap();
        assert!(dir.path().join("parcel_allocations.csv").exists());
        assert!(dir.path().join("basin_summary.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvReporter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("parcel_allocations.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["parcel_id", "scenario", "algorithm", "crop", "area_da", "water_m3", "profit_tl", "fallback"]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("basin_summary.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers2,
            [
                "scenario", "algorithm", "parcels", "area_da", "water_m3", "budget_m3",
                "profit_tl", "efficiency_tl_per_m3", "iterations", "feasible"
            ]
        );
    }

    #[test]
    fn csv_allocation_round_trip() {
        let dir = tmp();
        let mut w = CsvReporter::new(dir.path()).unwrap();
        w.write_allocations(&[allocation_row(1, "BUGDAY"), allocation_row(2, "MISIR")]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("parcel_allocations.csv")).unwrap();
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "1");
        assert_eq!(&records[0][3], "BUGDAY");
        assert_eq!(&records[1][3], "MISIR");
        assert_eq!(&records[0][7], "0");
    }

    #[test]
    fn csv_summary_round_trip() {
        let dir = tmp();
        let mut w = CsvReporter::new(dir.path()).unwrap();
        w.write_summary(&summary_row()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("basin_summary.csv")).unwrap();
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "max_profit");
        assert_eq!(&records[0][2], "3");
        assert_eq!(&records[0][8], "5");
        assert_eq!(&records[0][9], "1");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvReporter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
