//! External interfaces the engine consumes, as traits.
//!
//! The engine never loads data itself: the crop catalog, the per-parcel
//! candidate pool, the water budget, and the optional profit bonuses are all
//! supplied by the caller through these seams.  In-memory implementations
//! are provided for tests, demos, and callers whose data already lives in
//! memory.

use ba_core::{CropKey, Crop, Parcel, Projection, SeasonSource};
use rustc_hash::FxHashMap;

// ── Crop catalog ──────────────────────────────────────────────────────────────

/// `canonical key → crop coefficients` reference lookup.
pub trait CropCatalog: Send + Sync {
    fn get(&self, key: &CropKey) -> Option<&Crop>;

    /// Lookup tolerating any spelling variant of the crop name.
    fn lookup(&self, name: &str) -> Option<&Crop> {
        self.get(&CropKey::new(name))
    }
}

/// Catalog backed by a hash map; the usual implementation.
#[derive(Default)]
pub struct InMemoryCatalog {
    crops: FxHashMap<CropKey, Crop>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_crops(crops: impl IntoIterator<Item = Crop>) -> Self {
        let mut catalog = Self::new();
        for crop in crops {
            catalog.insert(crop);
        }
        catalog
    }

    /// Insert, replacing any previous entry under the same canonical key.
    pub fn insert(&mut self, crop: Crop) {
        self.crops.insert(crop.key.clone(), crop);
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Crop> {
        self.crops.values()
    }
}

impl CropCatalog for InMemoryCatalog {
    fn get(&self, key: &CropKey) -> Option<&Crop> {
        self.crops.get(key)
    }
}

// ── Candidate pool ────────────────────────────────────────────────────────────

/// Produces the ordered candidate crop list one parcel's search runs over.
///
/// The engine never constructs this list itself; season filtering, rotation
/// rules, and suitability cuts all live behind this seam.
pub trait CandidateProvider: Send + Sync {
    fn candidates(&self, parcel: &Parcel, season: SeasonSource) -> Vec<Crop>;
}

/// Offers the same fixed candidate list to every parcel and season.
pub struct StaticCandidates {
    pub crops: Vec<Crop>,
}

impl StaticCandidates {
    pub fn new(crops: Vec<Crop>) -> Self {
        StaticCandidates { crops }
    }
}

impl CandidateProvider for StaticCandidates {
    fn candidates(&self, _parcel: &Parcel, _season: SeasonSource) -> Vec<Crop> {
        self.crops.clone()
    }
}

// ── Water budget ──────────────────────────────────────────────────────────────

/// Supplies the shared basin budget and each parcel's fair-share sub-budget.
pub trait WaterBudget: Send + Sync {
    /// Basin-wide available irrigation water, m³.
    fn basin_budget_m3(&self, year: i32, projection: Projection, drought_risk: f64) -> f64;

    /// Fair-share budget of one parcel, m³.
    fn parcel_budget_m3(
        &self,
        parcel: &Parcel,
        year: i32,
        projection: Projection,
        drought_risk: f64,
    ) -> f64;
}

/// A flat budget: fixed basin total, fair shares proportional to area.
#[derive(Copy, Clone, Debug)]
pub struct FixedBudget {
    pub basin_m3: f64,
    /// Per-decare fair share, m³/da.
    pub per_da_m3: f64,
}

impl WaterBudget for FixedBudget {
    fn basin_budget_m3(&self, _year: i32, _projection: Projection, _risk: f64) -> f64 {
        self.basin_m3
    }

    fn parcel_budget_m3(
        &self,
        parcel: &Parcel,
        _year: i32,
        _projection: Projection,
        _risk: f64,
    ) -> f64 {
        self.per_da_m3 * parcel.area_da.max(0.0)
    }
}

// ── Profit bonuses ────────────────────────────────────────────────────────────

/// Optional additive per-da profit adjustments.
///
/// Both hooks default to 0 — a missing bonus source is normal operation,
/// never an error.
pub trait BonusProvider: Send + Sync {
    /// Reward for crops matching locally common cropping patterns.
    fn pattern_bonus_per_da(&self, _parcel: &Parcel, _crop: &Crop) -> f64 {
        0.0
    }

    /// Suitability adjustment from soil texture/erosion attributes.
    fn soil_bonus_per_da(&self, _parcel: &Parcel, _crop: &Crop) -> f64 {
        0.0
    }
}

/// The no-bonus provider.
pub struct NoBonus;

impl BonusProvider for NoBonus {}
