//! The `Planner` and its per-parcel optimization pass.

use std::sync::Arc;

use ba_core::{
    Algorithm, BaselineTotals, OptimizationResult, Parcel, ParcelId, PlanTotals, Scenario,
    SolverRng,
};
use ba_objective::ScenarioObjective;
use ba_solver::{aco_heuristic, AbcSolver, AcoSolver, GaSolver, Solver};
use rustc_hash::FxHashMap;

use crate::{
    BonusProvider, CacheKey, CacheScope, CandidateProvider, EngineConfig, PlanCache, PlanContext,
    PlanError, PlanResult, WaterBudget,
};

/// The engine's front door: owns the parcel table, the provider seams, the
/// configuration, and the result cache.
///
/// Parcels and providers are read-only once the planner is built; the only
/// mutable state is the cache, and its entries are replaced, never edited.
pub struct Planner<C, W, B>
where
    C: CandidateProvider,
    W: WaterBudget,
    B: BonusProvider,
{
    pub config:  EngineConfig,
    pub context: PlanContext,
    parcels:    Vec<Parcel>,
    /// `ParcelId → parcels index`, for O(1) lookup.
    index:      FxHashMap<ParcelId, usize>,
    candidates: C,
    pub(crate) budget: W,
    bonus:      B,
    cache:      PlanCache,
}

impl<C, W, B> Planner<C, W, B>
where
    C: CandidateProvider,
    W: WaterBudget,
    B: BonusProvider,
{
    /// Build a planner over `parcels`.  Fails on duplicate parcel IDs.
    pub fn new(
        config:     EngineConfig,
        context:    PlanContext,
        parcels:    Vec<Parcel>,
        candidates: C,
        budget:     W,
        bonus:      B,
    ) -> PlanResult<Self> {
        let mut index = FxHashMap::default();
        for (i, parcel) in parcels.iter().enumerate() {
            if index.insert(parcel.id, i).is_some() {
                return Err(PlanError::Config(format!("duplicate parcel ID {}", parcel.id)));
            }
        }
        Ok(Planner {
            config,
            context,
            parcels,
            index,
            candidates,
            budget,
            bonus,
            cache: PlanCache::new(),
        })
    }

    /// Replace the cache, e.g. to pre-seed entries or carry warm results
    /// across a planner rebuild.
    pub fn with_cache(mut self, cache: PlanCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn parcel(&self, id: ParcelId) -> Option<&Parcel> {
        self.index.get(&id).map(|&i| &self.parcels[i])
    }

    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    /// Replace the per-request context (year, projection, season, risk).
    /// Previously cached entries for other contexts remain valid — the
    /// context is part of every cache key.
    pub fn set_context(&mut self, context: PlanContext) {
        self.context = context;
    }

    pub fn cache(&self) -> &PlanCache {
        &self.cache
    }

    pub(crate) fn cache_mut(&mut self) -> &mut PlanCache {
        &mut self.cache
    }

    // ── Per-parcel optimization ───────────────────────────────────────────

    /// Optimize one parcel under `scenario` with `algorithm`.
    ///
    /// Consults the cache first; on a miss, runs the search and stores the
    /// result.  Degenerate inputs (empty candidate pool, non-positive area)
    /// yield an empty result, never an error.
    pub fn run_optimization(
        &mut self,
        id:        ParcelId,
        scenario:  Scenario,
        algorithm: Algorithm,
    ) -> PlanResult<Arc<OptimizationResult>> {
        let i = *self.index.get(&id).ok_or(PlanError::ParcelNotFound(id))?;
        let parcel_budget = self.budget.parcel_budget_m3(
            &self.parcels[i],
            self.context.year,
            self.context.projection,
            self.context.drought_risk,
        );
        let key = CacheKey::new(
            CacheScope::Parcel(id),
            scenario,
            algorithm,
            &self.context,
            parcel_budget,
        );
        if let Some(hit) = self.cache.get_result(&key) {
            return Ok(hit);
        }

        let result = Arc::new(self.optimize_parcel(&self.parcels[i], scenario, algorithm));
        self.cache.insert_result(key, Arc::clone(&result));
        Ok(result)
    }

    /// The uncached optimization pass.  `&self` only — safe to call for many
    /// parcels concurrently.
    pub(crate) fn optimize_parcel(
        &self,
        parcel:    &Parcel,
        scenario:  Scenario,
        algorithm: Algorithm,
    ) -> OptimizationResult {
        let baseline = parcel.baseline_totals();
        let parcel_budget = self.budget.parcel_budget_m3(
            parcel,
            self.context.year,
            self.context.projection,
            self.context.drought_risk,
        );

        // The Current scenario scores the as-is allocation; no search.
        if scenario == Scenario::Current {
            return self.result_from_rows(parcel.baseline.clone(), parcel_budget, false);
        }

        if parcel.area_da <= 0.0 {
            return OptimizationResult::empty();
        }
        let crops = self.candidates.candidates(parcel, self.context.season);
        if crops.is_empty() {
            return OptimizationResult::empty();
        }

        let bonus: Vec<f64> = crops
            .iter()
            .map(|c| {
                self.bonus.pattern_bonus_per_da(parcel, c) + self.bonus.soil_bonus_per_da(parcel, c)
            })
            .collect();
        let objective = ScenarioObjective::new(
            parcel.area_da,
            &crops,
            &bonus,
            scenario,
            baseline,
            parcel_budget,
            self.context.drought_risk,
            self.config.weights,
        );

        let mut rng =
            SolverRng::new(self.config.seed).child(stream_id(parcel.id, scenario, algorithm));
        let x = match algorithm {
            Algorithm::Ga  => GaSolver::new(self.config.ga).solve(&objective, &mut rng),
            Algorithm::Abc => AbcSolver::new(self.config.abc).solve(&objective, &mut rng),
            Algorithm::Aco => AcoSolver::new(self.config.aco, aco_heuristic(&crops, scenario))
                .solve(&objective, &mut rng),
        };

        let rows =
            OptimizationResult::rows_from_vector(parcel.area_da, &crops, &x, self.config.min_share);

        // Hard guardrails: the soft penalties steer the search, but the
        // returned plan must actually honor the scenario's promises.  A
        // violating (or empty) search result falls back to the baseline,
        // flagged so the caller can tell it apart from a genuine optimum.
        let totals = PlanTotals::from_rows(&rows);
        if rows.is_empty() || violates_guardrails(scenario, &totals, &baseline) {
            return self.result_from_rows(parcel.baseline.clone(), parcel_budget, true);
        }

        let feasible = totals.water_m3 <= parcel_budget + self.config.reconcile.tolerance;
        OptimizationResult::from_rows(rows, feasible, false)
    }

    fn result_from_rows(
        &self,
        rows:          Vec<ba_core::CropAllocationRow>,
        parcel_budget: f64,
        fallback:      bool,
    ) -> OptimizationResult {
        let totals = PlanTotals::from_rows(&rows);
        let feasible = totals.water_m3 <= parcel_budget + self.config.reconcile.tolerance;
        OptimizationResult::from_rows(rows, feasible, fallback)
    }
}

/// Scenario promise check on a finished search result.
///
/// Tolerances are relative to the baseline magnitudes so a result equal to
/// the baseline up to float error never counts as a violation.
pub(crate) fn violates_guardrails(
    scenario: Scenario,
    totals:   &PlanTotals,
    baseline: &BaselineTotals,
) -> bool {
    let water_eps = 1e-6 * baseline.water_m3.max(1.0);
    let profit_eps = 1e-6 * baseline.profit_tl.abs().max(1.0);
    match scenario {
        Scenario::Current => false,
        Scenario::WaterSaving => {
            totals.water_m3 > baseline.water_m3 + water_eps
                || totals.profit_tl < 0.85 * baseline.profit_tl - profit_eps
        }
        Scenario::MaxProfit => totals.water_m3 > 1.10 * baseline.water_m3 + water_eps,
        Scenario::Balanced => totals.profit_tl < 0.75 * baseline.profit_tl - profit_eps,
    }
}

/// Fold (parcel, scenario, algorithm) into one RNG stream identifier.
///
/// Distinct triples map to distinct IDs: the parcel index occupies the high
/// bits, the two selectors the low nibble each.
fn stream_id(parcel: ParcelId, scenario: Scenario, algorithm: Algorithm) -> u64 {
    let s = match scenario {
        Scenario::Current     => 0u64,
        Scenario::WaterSaving => 1,
        Scenario::MaxProfit   => 2,
        Scenario::Balanced    => 3,
    };
    let a = match algorithm {
        Algorithm::Ga  => 0u64,
        Algorithm::Abc => 1,
        Algorithm::Aco => 2,
    };
    ((parcel.0 as u64) << 8) | (s << 4) | a
}
