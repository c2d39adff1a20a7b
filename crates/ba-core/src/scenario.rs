//! Closed enums for the engine's selector inputs.
//!
//! The surrounding system historically passed these around as free-form
//! strings (including Turkish UI labels).  All string comparison happens here,
//! once, at the boundary; inside the engine the values are plain enums.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

// ── Scenario ──────────────────────────────────────────────────────────────────

/// The optimization objective applied by the fitness function.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scenario {
    /// Score the as-is allocation; no search is performed.
    Current,
    /// Minimize water, keeping profit at ≥ 85% of the baseline.
    WaterSaving,
    /// Maximize profit, keeping water at ≤ 110% of the baseline.
    MaxProfit,
    /// Trade water against profit, keeping profit at ≥ 75% of the baseline.
    Balanced,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Current,
        Scenario::WaterSaving,
        Scenario::MaxProfit,
        Scenario::Balanced,
    ];

    /// Stable lowercase key used in cache keys and report rows.
    pub fn as_key(self) -> &'static str {
        match self {
            Scenario::Current     => "current",
            Scenario::WaterSaving => "water_saving",
            Scenario::MaxProfit   => "max_profit",
            Scenario::Balanced    => "balanced",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for Scenario {
    type Err = CoreError;

    /// Accepts the canonical keys plus the locale spellings found in the
    /// historical data ("mevcut", "su_tasarruf", …).
    fn from_str(s: &str) -> Result<Self, CoreError> {
        let k = s.trim().to_lowercase().replace([' ', '-'], "_");
        match k.as_str() {
            "current" | "mevcut" | "baseline" => Ok(Scenario::Current),
            "water_saving" | "su_tasarruf" | "tasarruf" | "min_water" => Ok(Scenario::WaterSaving),
            "max_profit" | "maks_kar" | "profit" => Ok(Scenario::MaxProfit),
            "balanced" | "dengeli" => Ok(Scenario::Balanced),
            _ => Err(CoreError::UnknownScenario(s.to_string())),
        }
    }
}

// ── Algorithm ─────────────────────────────────────────────────────────────────

/// Which metaheuristic searches the allocation space.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Genetic algorithm.
    Ga,
    /// Artificial bee colony.
    Abc,
    /// Ant colony optimization.
    Aco,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Ga, Algorithm::Abc, Algorithm::Aco];

    pub fn as_key(self) -> &'static str {
        match self {
            Algorithm::Ga  => "ga",
            Algorithm::Abc => "abc",
            Algorithm::Aco => "aco",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for Algorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_lowercase().as_str() {
            "ga" | "genetic"           => Ok(Algorithm::Ga),
            "abc" | "bee" | "bee_colony" => Ok(Algorithm::Abc),
            "aco" | "ant" | "ant_colony" => Ok(Algorithm::Aco),
            _ => Err(CoreError::UnknownAlgorithm(s.to_string())),
        }
    }
}

// ── SeasonSource ──────────────────────────────────────────────────────────────

/// Which cropping season's candidate pool a parcel search draws from.
///
/// The candidate provider interprets this; the engine carries it only as
/// part of the cache key.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeasonSource {
    Primary,
    Secondary,
    #[default]
    Both,
}

impl SeasonSource {
    pub fn as_key(self) -> &'static str {
        match self {
            SeasonSource::Primary   => "primary",
            SeasonSource::Secondary => "secondary",
            SeasonSource::Both      => "both",
        }
    }
}

impl fmt::Display for SeasonSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

// ── Projection ────────────────────────────────────────────────────────────────

/// Climate projection under which the water budget is computed.
///
/// Opaque to the engine: it is forwarded to the budget provider and folded
/// into cache keys, nothing more.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Projection {
    #[default]
    Baseline,
    Rcp45,
    Rcp85,
}

impl Projection {
    pub fn as_key(self) -> &'static str {
        match self {
            Projection::Baseline => "baseline",
            Projection::Rcp45    => "rcp45",
            Projection::Rcp85    => "rcp85",
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}
