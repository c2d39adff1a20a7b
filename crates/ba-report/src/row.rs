//! Plain data row types written by report backends, and the flattening
//! from engine results into them.

use ba_core::{Algorithm, OptimizationResult, ParcelId, Scenario};
use ba_plan::BasinPlan;

/// One crop of one parcel's allocation under one (scenario, algorithm).
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelAllocationRow {
    pub parcel_id: u32,
    pub scenario:  &'static str,
    pub algorithm: &'static str,
    pub crop:      String,
    pub area_da:   f64,
    pub water_m3:  f64,
    pub profit_tl: f64,
    /// Whether a guardrail forced the baseline allocation for this parcel.
    pub fallback:  bool,
}

/// One basin plan, summarized to a single line.
#[derive(Debug, Clone, PartialEq)]
pub struct BasinSummaryRow {
    pub scenario:  &'static str,
    pub algorithm: &'static str,
    pub parcels:   usize,
    pub area_da:   f64,
    pub water_m3:  f64,
    pub budget_m3: f64,
    pub profit_tl: f64,
    pub efficiency_tl_per_m3: f64,
    pub iterations: u32,
    pub feasible:   bool,
}

/// Flatten one parcel's result into per-crop rows.
pub fn parcel_rows(
    parcel:    ParcelId,
    scenario:  Scenario,
    algorithm: Algorithm,
    result:    &OptimizationResult,
) -> Vec<ParcelAllocationRow> {
    result
        .rows
        .iter()
        .map(|row| ParcelAllocationRow {
            parcel_id: parcel.0,
            scenario:  scenario.as_key(),
            algorithm: algorithm.as_key(),
            crop:      row.crop.to_string(),
            area_da:   row.area_da,
            water_m3:  row.total_water,
            profit_tl: row.total_profit,
            fallback:  result.fallback,
        })
        .collect()
}

/// Flatten a whole basin plan into per-crop rows, ordered by parcel ID so
/// output files are reproducible run to run.
pub fn basin_rows(
    scenario:  Scenario,
    algorithm: Algorithm,
    plan:      &BasinPlan,
) -> Vec<ParcelAllocationRow> {
    let mut ids: Vec<ParcelId> = plan.per_parcel.keys().copied().collect();
    ids.sort_unstable();
    ids.iter()
        .flat_map(|id| parcel_rows(*id, scenario, algorithm, &plan.per_parcel[id]))
        .collect()
}

/// The one-line summary of a basin plan.
pub fn basin_summary(
    scenario:  Scenario,
    algorithm: Algorithm,
    plan:      &BasinPlan,
) -> BasinSummaryRow {
    BasinSummaryRow {
        scenario:   scenario.as_key(),
        algorithm:  algorithm.as_key(),
        parcels:    plan.per_parcel.len(),
        area_da:    plan.totals.area_da,
        water_m3:   plan.totals.water_m3,
        budget_m3:  plan.budget_m3,
        profit_tl:  plan.totals.profit_tl,
        efficiency_tl_per_m3: plan.efficiency_tl_per_m3(),
        iterations: plan.iterations,
        feasible:   plan.feasible,
    }
}
