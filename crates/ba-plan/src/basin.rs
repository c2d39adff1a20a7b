//! Basin-wide budget reconciliation.
//!
//! Per-parcel optimization answers "what should this parcel grow?"; the
//! basin pass answers "do all those answers fit in the reservoir?".  When
//! they don't, a greedy correction loop repeatedly shifts a sliver of area
//! from the thirstiest row to the thriftiest row of the most water-intensive
//! parcel.  Each step can only decrease that parcel's water, so no parcel
//! ever ends above its pre-correction demand.  The loop is convergent-or-
//! capped, not optimal: the iteration cap bounds worst-case work on
//! degenerate inputs.

use std::sync::Arc;

use ba_core::{Algorithm, OptimizationResult, ParcelId, PlanTotals, Scenario};
use rustc_hash::FxHashMap;

use crate::{
    BonusProvider, CacheKey, CacheScope, CandidateProvider, PlanObserver, PlanResult, Planner,
    WaterBudget,
};

/// The reconciled whole-basin allocation.
///
/// Mutated in place only during the correction loop, then frozen and cached.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasinPlan {
    pub per_parcel: FxHashMap<ParcelId, OptimizationResult>,
    pub budget_m3: f64,
    pub totals: PlanTotals,
    /// Correction steps taken; equals the cap when the loop was cut off.
    pub iterations: u32,
    /// Whether the aggregate demand fits the budget (within tolerance).
    pub feasible: bool,
}

impl BasinPlan {
    /// Basin-wide profit per cubic meter of water — the headline figure of
    /// every optimizer report.
    pub fn efficiency_tl_per_m3(&self) -> f64 {
        self.totals.profit_tl / self.totals.water_m3.max(1.0)
    }
}

impl<C, W, B> Planner<C, W, B>
where
    C: CandidateProvider,
    W: WaterBudget,
    B: BonusProvider,
{
    /// Optimize every parcel, then reconcile the aggregate against the
    /// shared basin budget.
    pub fn compute_basin_plan<O: PlanObserver>(
        &mut self,
        scenario:  Scenario,
        algorithm: Algorithm,
        observer:  &mut O,
    ) -> PlanResult<Arc<BasinPlan>> {
        let budget = self.effective_basin_budget(scenario);
        let key = CacheKey::new(CacheScope::Basin, scenario, algorithm, &self.context, budget);
        if let Some(hit) = self.cache().get_basin(&key) {
            return Ok(hit);
        }

        // Phase 1: raw per-parcel results.  `optimize_parcel` is `&self` and
        // pure, so the parallel path needs no coordination; results come
        // back in parcel order either way.
        let results = self.optimize_all(scenario, algorithm);

        let mut per_parcel: FxHashMap<ParcelId, OptimizationResult> =
            FxHashMap::with_capacity_and_hasher(results.len(), Default::default());
        let order: Vec<ParcelId> = results.iter().map(|(id, _)| *id).collect();
        for (id, result) in results {
            observer.on_parcel_done(id, &result);
            per_parcel.insert(id, result);
        }

        // Phase 2: greedy correction until the budget fits or the cap hits.
        let (totals, iterations) =
            self.reconcile(&mut per_parcel, &order, budget, observer);

        let plan = Arc::new(BasinPlan {
            per_parcel,
            budget_m3: budget,
            totals,
            iterations,
            feasible: totals.water_m3 <= budget + self.config.reconcile.tolerance,
        });
        observer.on_basin_done(&plan);
        self.cache_mut().insert_basin(key, Arc::clone(&plan));
        Ok(plan)
    }

    /// The basin budget for `scenario`.
    ///
    /// WaterSaving budgets are additionally capped at a fraction of the
    /// Current-scenario basin total (the sum of baseline demands), so an
    /// aggressive objective cannot smuggle in more water than the status quo.
    fn effective_basin_budget(&self, scenario: Scenario) -> f64 {
        let raw = self.budget.basin_budget_m3(
            self.context.year,
            self.context.projection,
            self.context.drought_risk,
        );
        if scenario != Scenario::WaterSaving {
            return raw;
        }
        let current_total: f64 = self
            .parcels()
            .iter()
            .map(|p| p.baseline_totals().water_m3)
            .sum();
        raw.min(self.config.reconcile.saving_budget_ratio * current_total)
    }

    fn optimize_all(
        &self,
        scenario:  Scenario,
        algorithm: Algorithm,
    ) -> Vec<(ParcelId, OptimizationResult)> {
        #[cfg(not(feature = "parallel"))]
        {
            self.parcels()
                .iter()
                .map(|p| (p.id, self.optimize_parcel(p, scenario, algorithm)))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.parcels()
                .par_iter()
                .map(|p| (p.id, self.optimize_parcel(p, scenario, algorithm)))
                .collect()
        }
    }

    /// The greedy correction loop.  Returns the final aggregate totals and
    /// the number of steps taken.
    fn reconcile<O: PlanObserver>(
        &self,
        per_parcel: &mut FxHashMap<ParcelId, OptimizationResult>,
        order:      &[ParcelId],
        budget:     f64,
        observer:   &mut O,
    ) -> (PlanTotals, u32) {
        let params = self.config.reconcile;
        let mut totals = sum_totals(per_parcel.values());
        let mut iterations = 0u32;

        while totals.water_m3 > budget + params.tolerance && iterations < params.max_iterations {
            // The most water-intensive parcel, by water per decare.  Iterate
            // in parcel order so ties break deterministically.
            let Some(worst) = order
                .iter()
                .copied()
                .filter(|id| {
                    per_parcel
                        .get(id)
                        .is_some_and(|r| !r.rows.is_empty() && r.totals.area_da > 0.0)
                })
                .max_by(|a, b| {
                    per_parcel[a]
                        .totals
                        .water_per_da()
                        .total_cmp(&per_parcel[b].totals.water_per_da())
                })
            else {
                break; // nothing left to shift
            };

            let Some(result) = per_parcel.get_mut(&worst) else {
                break;
            };
            if result.rows.len() < 2 {
                break; // single-crop parcel: no internal shift possible
            }

            let (hi, lo) = extreme_rows(&result.rows);
            if hi == lo || result.rows[hi].water_per_da <= result.rows[lo].water_per_da {
                break; // rows are uniform: shifting cannot reduce water
            }

            let area = result.totals.area_da;
            let fractional = params.step_fraction * area;
            let step = if fractional < params.min_step_da {
                params.min_step_da.min(result.rows[hi].area_da)
            } else {
                fractional.min(result.rows[hi].area_da)
            };

            result.rows[hi].area_da -= step;
            result.rows[lo].area_da += step;
            result.rows[hi].recompute();
            result.rows[lo].recompute();
            // Depleted source rows disappear so the next pick is meaningful.
            if result.rows[hi].area_da <= 1e-9 {
                result.rows.remove(hi);
            }
            result.totals = PlanTotals::from_rows(&result.rows);

            totals = sum_totals(per_parcel.values());
            iterations += 1;
            observer.on_reconcile_step(iterations, worst, step, totals.water_m3);
        }

        (totals, iterations)
    }
}

fn sum_totals<'a>(results: impl Iterator<Item = &'a OptimizationResult>) -> PlanTotals {
    let mut totals = PlanTotals::default();
    for r in results {
        totals.area_da += r.totals.area_da;
        totals.water_m3 += r.totals.water_m3;
        totals.profit_tl += r.totals.profit_tl;
    }
    totals
}

/// Indices of the highest- and lowest-water rows (by m³/da).
fn extreme_rows(rows: &[ba_core::CropAllocationRow]) -> (usize, usize) {
    let mut hi = 0;
    let mut lo = 0;
    for (i, row) in rows.iter().enumerate() {
        if row.water_per_da > rows[hi].water_per_da {
            hi = i;
        }
        if row.water_per_da < rows[lo].water_per_da {
            lo = i;
        }
    }
    (hi, lo)
}
