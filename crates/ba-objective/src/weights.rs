//! Tunable penalty weights.
//!
//! The defaults are empirically chosen; nothing in the engine depends on
//! their magnitudes beyond the relative ordering of the penalties (the
//! budget overshoot must dominate the drought term, the water-increase
//! guardrail must dominate both).

/// Weight constants applied by [`ScenarioObjective`](crate::ScenarioObjective).
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenaltyWeights {
    /// Per unit of relative overshoot above the parcel's fair-share budget.
    pub over_budget: f64,
    /// Scales `risk × (water / budget)`.
    pub drought: f64,
    /// Per unit of relative water increase above baseline (WaterSaving only).
    pub water_increase: f64,
    /// Per unit of relative water excess above 1.10 × baseline (MaxProfit only).
    pub water_cap: f64,
    /// Per unit of relative profit shortfall below a scenario's floor.
    pub profit_floor: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        PenaltyWeights {
            over_budget:    50.0,
            drought:        2.5,
            water_increase: 30.0,
            water_cap:      10.0,
            profit_floor:   8.0,
        }
    }
}
