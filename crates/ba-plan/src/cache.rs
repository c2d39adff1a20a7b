//! Result cache with typed composite keys.
//!
//! The original system memoized through module-level maps keyed by
//! concatenated strings; here the cache is an explicit value owned by the
//! [`Planner`](crate::Planner) (injectable for test isolation), keyed by a
//! typed struct.  Semantics are last-write-wins: a newer computation for the
//! same key overwrites the older entry, no merging.  Callers receive `Arc`
//! handles — read-only views of entries the cache continues to own.

use std::sync::Arc;

use ba_core::{Algorithm, OptimizationResult, ParcelId, Projection, Scenario, SeasonSource};
use rustc_hash::FxHashMap;

use crate::{BasinPlan, PlanContext};

/// Whether an entry covers one parcel or the whole basin.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CacheScope {
    Parcel(ParcelId),
    Basin,
}

/// Everything a cached result depends on.
///
/// Available water and drought risk are bucketed (nearest 1000 m³, nearest
/// percent) so re-queries with jittered inputs still hit.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheKey {
    pub scope: CacheScope,
    pub scenario: Scenario,
    pub algorithm: Algorithm,
    pub year: i32,
    pub projection: Projection,
    pub season: SeasonSource,
    /// Available water rounded to the nearest 1000 m³.
    pub water_bucket: i64,
    /// Drought risk rounded to the nearest percent.
    pub risk_bucket: u8,
}

impl CacheKey {
    pub fn new(
        scope:        CacheScope,
        scenario:     Scenario,
        algorithm:    Algorithm,
        ctx:          &PlanContext,
        available_m3: f64,
    ) -> Self {
        CacheKey {
            scope,
            scenario,
            algorithm,
            year: ctx.year,
            projection: ctx.projection,
            season: ctx.season,
            water_bucket: (available_m3 / 1000.0).round() as i64,
            risk_bucket: (ctx.drought_risk.clamp(0.0, 1.0) * 100.0).round() as u8,
        }
    }
}

/// Key → result store for both per-parcel and basin entries.
#[derive(Default)]
pub struct PlanCache {
    results: FxHashMap<CacheKey, Arc<OptimizationResult>>,
    basins:  FxHashMap<CacheKey, Arc<BasinPlan>>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_result(&self, key: &CacheKey) -> Option<Arc<OptimizationResult>> {
        self.results.get(key).cloned()
    }

    pub fn insert_result(&mut self, key: CacheKey, result: Arc<OptimizationResult>) {
        self.results.insert(key, result);
    }

    pub fn get_basin(&self, key: &CacheKey) -> Option<Arc<BasinPlan>> {
        self.basins.get(key).cloned()
    }

    pub fn insert_basin(&mut self, key: CacheKey, plan: Arc<BasinPlan>) {
        self.basins.insert(key, plan);
    }

    /// Drop everything — e.g. after reference data changes.
    pub fn clear(&mut self) {
        self.results.clear();
        self.basins.clear();
    }

    pub fn len(&self) -> usize {
        self.results.len() + self.basins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.basins.is_empty()
    }
}
