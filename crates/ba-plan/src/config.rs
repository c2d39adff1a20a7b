//! Engine configuration and per-request context.

use ba_core::{Projection, SeasonSource};
use ba_objective::PenaltyWeights;
use ba_solver::{AbcParams, AcoParams, GaParams};

/// Everything tunable about the engine, bundled.
///
/// All defaults follow the production settings; tests narrow the solver
/// budgets to keep runtimes small.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Global seed.  Every solver call derives its own stream from this,
    /// so whole-basin runs reproduce exactly.
    pub seed: u64,
    /// Allocation shares below this are dropped when a solver vector is
    /// converted to rows (the survivors are renormalized).
    pub min_share: f64,
    pub ga:  GaParams,
    pub abc: AbcParams,
    pub aco: AcoParams,
    pub weights: PenaltyWeights,
    pub reconcile: ReconcileParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            seed:      0,
            min_share: 1e-3,
            ga:  GaParams::default(),
            abc: AbcParams::default(),
            aco: AcoParams::default(),
            weights: PenaltyWeights::default(),
            reconcile: ReconcileParams::default(),
        }
    }
}

/// Knobs of the greedy basin correction loop.
///
/// The step sizes are empirically chosen defaults, not physical constants;
/// only "preserve relative ordering" is assumed of them.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconcileParams {
    /// Hard cap on correction iterations; bounds worst-case work on
    /// degenerate inputs.
    pub max_iterations: u32,
    /// Area moved per step, as a fraction of the parcel's area.
    pub step_fraction: f64,
    /// When the fractional step falls below this many decares, move this
    /// much instead (or whatever the source row still holds).
    pub min_step_da: f64,
    /// WaterSaving basin budgets are capped at this fraction of the
    /// Current-scenario basin total, so an aggressive objective cannot
    /// smuggle in more water than the baseline.
    pub saving_budget_ratio: f64,
    /// Budget comparison tolerance, m³.
    pub tolerance: f64,
}

impl Default for ReconcileParams {
    fn default() -> Self {
        ReconcileParams {
            max_iterations:      2500,
            step_fraction:       0.05,
            min_step_da:         1.0,
            saving_budget_ratio: 0.85,
            tolerance:           1e-6,
        }
    }
}

/// The external selections one planning pass runs under.
///
/// The engine only forwards these to the budget provider and folds them into
/// cache keys; their semantics belong to the caller.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanContext {
    pub year: i32,
    pub projection: Projection,
    pub season: SeasonSource,
    /// Drought-risk index in [0, 1]; clamped on use.
    pub drought_risk: f64,
}

impl Default for PlanContext {
    fn default() -> Self {
        PlanContext {
            year: 2025,
            projection: Projection::Baseline,
            season: SeasonSource::Both,
            drought_risk: 0.0,
        }
    }
}
