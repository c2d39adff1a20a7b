//! Plain data model: crops, parcels, allocation rows, totals, results.
//!
//! All quantities follow the source data's units: areas in decares (da,
//! 1000 m²), water in m³ (coefficients in m³/da), profit in TL (TL/da).

use crate::vector::AllocationVector;
use crate::{CropKey, ParcelId};

// ── Crop ──────────────────────────────────────────────────────────────────────

/// Immutable reference data for one candidate crop.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crop {
    pub key:  CropKey,
    /// Human-readable name as it appeared in the source table.
    pub name: String,
    /// Seasonal irrigation requirement per decare, m³/da.  Never negative.
    pub water_per_da:  f64,
    /// Expected net profit per decare, TL/da.  May be negative.
    pub profit_per_da: f64,
    /// Botanical family / rotation category, when known.
    pub family: Option<String>,
}

impl Crop {
    /// Convenience constructor canonicalizing `name` into the key.
    pub fn new(name: &str, water_per_da: f64, profit_per_da: f64) -> Self {
        Crop {
            key:  CropKey::new(name),
            name: name.to_string(),
            water_per_da:  water_per_da.max(0.0),
            profit_per_da,
            family: None,
        }
    }

    pub fn with_family(mut self, family: &str) -> Self {
        self.family = Some(family.to_string());
        self
    }
}

// ── Parcel ────────────────────────────────────────────────────────────────────

/// Soil attributes feeding the optional suitability bonus.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoilContext {
    /// Land capability class, e.g. "II" or "IV".
    pub capability_class: Option<String>,
    /// Erosion risk label as decoded upstream.
    pub erosion_risk: Option<String>,
}

/// One irrigated parcel.  Read-only to the engine; only external data
/// loading (out of scope) ever constructs or mutates these.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parcel {
    pub id: ParcelId,
    /// Irrigable area in decares.  The engine treats `area_da <= 0` as a
    /// degenerate input and returns an empty result for it.
    pub area_da: f64,
    /// The as-is allocation before any optimization.
    pub baseline: Vec<CropAllocationRow>,
    pub soil: SoilContext,
    pub village:  Option<String>,
    pub district: Option<String>,
}

impl Parcel {
    pub fn new(id: ParcelId, area_da: f64) -> Self {
        Parcel {
            id,
            area_da,
            baseline: Vec::new(),
            soil: SoilContext::default(),
            village:  None,
            district: None,
        }
    }

    pub fn with_baseline(mut self, baseline: Vec<CropAllocationRow>) -> Self {
        self.baseline = baseline;
        self
    }

    /// Water/profit totals of the as-is allocation.
    pub fn baseline_totals(&self) -> BaselineTotals {
        let totals = PlanTotals::from_rows(&self.baseline);
        BaselineTotals {
            water_m3:  totals.water_m3,
            profit_tl: totals.profit_tl,
        }
    }
}

// ── Allocation rows & totals ──────────────────────────────────────────────────

/// One (crop, area) line of an allocation — the engine's output unit.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CropAllocationRow {
    pub crop: CropKey,
    pub area_da: f64,
    pub water_per_da:  f64,
    pub profit_per_da: f64,
    pub total_water:  f64,
    pub total_profit: f64,
}

impl CropAllocationRow {
    /// Build a row from per-da coefficients, deriving the totals.
    pub fn new(crop: CropKey, area_da: f64, water_per_da: f64, profit_per_da: f64) -> Self {
        let mut row = CropAllocationRow {
            crop,
            area_da,
            water_per_da,
            profit_per_da,
            total_water:  0.0,
            total_profit: 0.0,
        };
        row.recompute();
        row
    }

    /// Re-derive `total_water`/`total_profit` after an area change.
    #[inline]
    pub fn recompute(&mut self) {
        self.total_water = self.area_da * self.water_per_da;
        self.total_profit = self.area_da * self.profit_per_da;
    }
}

/// Aggregate (area, water, profit) over a set of rows.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanTotals {
    pub area_da:   f64,
    pub water_m3:  f64,
    pub profit_tl: f64,
}

impl PlanTotals {
    pub fn from_rows(rows: &[CropAllocationRow]) -> Self {
        let mut t = PlanTotals::default();
        for row in rows {
            t.area_da += row.area_da;
            t.water_m3 += row.total_water;
            t.profit_tl += row.total_profit;
        }
        t
    }

    /// Water intensity, m³/da.  Zero for an empty allocation.
    pub fn water_per_da(&self) -> f64 {
        if self.area_da <= 0.0 {
            0.0
        } else {
            self.water_m3 / self.area_da
        }
    }
}

/// The parcel's pre-optimization totals, referenced by scenario guardrails.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineTotals {
    pub water_m3:  f64,
    pub profit_tl: f64,
}

// ── OptimizationResult ────────────────────────────────────────────────────────

/// The outcome of one per-parcel optimization.
///
/// Created fresh by every runner call (or handed out of the cache); never
/// mutated after creation — a newer computation replaces the cache entry.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationResult {
    pub rows: Vec<CropAllocationRow>,
    pub totals: PlanTotals,
    /// Whether the allocation fits the parcel's fair-share water budget.
    pub feasible: bool,
    /// `true` when a scenario guardrail forced the baseline allocation
    /// instead of the search result.
    pub fallback: bool,
}

impl OptimizationResult {
    /// An empty result with zeroed totals — the degenerate-input outcome.
    pub fn empty() -> Self {
        OptimizationResult {
            rows: Vec::new(),
            totals: PlanTotals::default(),
            feasible: true,
            fallback: false,
        }
    }

    pub fn from_rows(rows: Vec<CropAllocationRow>, feasible: bool, fallback: bool) -> Self {
        let totals = PlanTotals::from_rows(&rows);
        OptimizationResult {
            rows,
            totals,
            feasible,
            fallback,
        }
    }

    /// The `n` largest rows by area — the "recommend one or two crops" view.
    pub fn top_rows(&self, n: usize) -> Vec<&CropAllocationRow> {
        let mut refs: Vec<&CropAllocationRow> = self.rows.iter().collect();
        refs.sort_by(|a, b| b.area_da.total_cmp(&a.area_da));
        refs.truncate(n);
        refs
    }

    /// Convert a solver's allocation vector into rows against `crops`.
    ///
    /// Shares below `min_share` are dropped and the survivors renormalized so
    /// the parcel's full area is conserved.  Returns no rows when `crops` is
    /// empty or the area is non-positive.
    pub fn rows_from_vector(
        area_da:   f64,
        crops:     &[Crop],
        x:         &AllocationVector,
        min_share: f64,
    ) -> Vec<CropAllocationRow> {
        if crops.is_empty() || area_da <= 0.0 || x.len() != crops.len() {
            return Vec::new();
        }
        let kept: f64 = x.iter().filter(|&&s| s >= min_share).sum();
        if kept <= 0.0 {
            return Vec::new();
        }
        crops
            .iter()
            .zip(x.iter())
            .filter(|&(_, &share)| share >= min_share)
            .map(|(crop, &share)| {
                CropAllocationRow::new(
                    crop.key.clone(),
                    area_da * share / kept,
                    crop.water_per_da,
                    crop.profit_per_da,
                )
            })
            .collect()
    }
}
