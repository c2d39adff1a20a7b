//! Progress hooks for long planning passes.
//!
//! All methods default to no-ops so implementors only override what they
//! care about; attach [`NoopObserver`] when no reporting is needed.

use ba_core::{OptimizationResult, ParcelId};

use crate::BasinPlan;

/// Callbacks invoked by [`Planner::compute_basin_plan`](crate::Planner::compute_basin_plan).
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl PlanObserver for ProgressPrinter {
///     fn on_parcel_done(&mut self, parcel: ParcelId, result: &OptimizationResult) {
///         println!("{parcel}: {:.0} m³", result.totals.water_m3);
///     }
/// }
/// ```
pub trait PlanObserver {
    /// One parcel's raw optimization finished (before any basin correction).
    fn on_parcel_done(&mut self, _parcel: ParcelId, _result: &OptimizationResult) {}

    /// One greedy correction step moved `moved_da` decares within `parcel`.
    fn on_reconcile_step(
        &mut self,
        _iteration: u32,
        _parcel: ParcelId,
        _moved_da: f64,
        _total_water_m3: f64,
    ) {
    }

    /// The basin plan is complete (feasible or capped).
    fn on_basin_done(&mut self, _plan: &BasinPlan) {}
}

/// A [`PlanObserver`] that does nothing.
pub struct NoopObserver;

impl PlanObserver for NoopObserver {}
