//! The `Objective` trait and the scenario fitness function.

use ba_core::{AllocationVector, BaselineTotals, Crop, Scenario};

use crate::PenaltyWeights;

/// A function solvers minimize over allocation vectors.
///
/// Implementations must be pure: the same vector always scores the same, and
/// scoring has no side effects.  `Send + Sync` so independent solver calls
/// may run concurrently (each reads only immutable inputs).
pub trait Objective: Send + Sync {
    /// Score `x` — lower is better.
    fn score(&self, x: &AllocationVector) -> f64;

    /// Dimensionality of the vectors this objective accepts.
    fn dimensions(&self) -> usize;
}

/// The production fitness function for one (parcel, scenario) pair.
///
/// Closed over everything the score needs: the candidate crops, per-crop
/// profit bonuses, baseline totals, the parcel's fair-share water budget,
/// and the drought-risk index.  Constructed fresh per runner call; holds no
/// mutable state.
pub struct ScenarioObjective {
    area_da:  f64,
    scenario: Scenario,
    weights:  PenaltyWeights,
    baseline: BaselineTotals,
    /// Fair-share water budget for this parcel, m³.  Clamped to ≥ 1 so the
    /// budget ratio is always defined.
    budget_m3: f64,
    /// Drought-risk index in [0, 1].
    risk: f64,
    water_per_da:  Vec<f64>,
    /// Profit coefficients with the pattern/soil bonuses already folded in.
    profit_per_da: Vec<f64>,
}

impl ScenarioObjective {
    /// Build the objective for `crops` with per-crop additive `bonus_per_da`
    /// profit adjustments (pass an empty slice when no bonus source exists —
    /// missing bonuses are 0, never an error).
    pub fn new(
        area_da:      f64,
        crops:        &[Crop],
        bonus_per_da: &[f64],
        scenario:     Scenario,
        baseline:     BaselineTotals,
        budget_m3:    f64,
        risk:         f64,
        weights:      PenaltyWeights,
    ) -> Self {
        let water_per_da = crops.iter().map(|c| c.water_per_da).collect();
        let profit_per_da = crops
            .iter()
            .enumerate()
            .map(|(i, c)| c.profit_per_da + bonus_per_da.get(i).copied().unwrap_or(0.0))
            .collect();
        ScenarioObjective {
            area_da,
            scenario,
            weights,
            baseline,
            budget_m3: budget_m3.max(1.0),
            risk: risk.clamp(0.0, 1.0),
            water_per_da,
            profit_per_da,
        }
    }

    /// Total water demand of allocation `x`, m³.
    pub fn water(&self, x: &AllocationVector) -> f64 {
        let per_da: f64 = x.iter().zip(&self.water_per_da).map(|(s, w)| s * w).sum();
        self.area_da * per_da
    }

    /// Total profit of allocation `x` (bonuses included), TL.
    pub fn profit(&self, x: &AllocationVector) -> f64 {
        let per_da: f64 = x.iter().zip(&self.profit_per_da).map(|(s, p)| s * p).sum();
        self.area_da * per_da
    }
}

impl Objective for ScenarioObjective {
    fn score(&self, x: &AllocationVector) -> f64 {
        let water = self.water(x);
        let profit = self.profit(x);
        let bw = self.baseline.water_m3.max(1.0);
        let bp = self.baseline.profit_tl.max(1.0);
        let w = &self.weights;

        let mut penalty = 0.0;

        // Soft fair-share budget overshoot.
        let over = (water / self.budget_m3 - 1.0).max(0.0);
        penalty += over * w.over_budget;

        // Drought exposure scales with how much of the budget is drawn.
        penalty += self.risk * (water / self.budget_m3) * w.drought;

        // Scenario guardrails, measured against the pre-optimization totals.
        let objective = match self.scenario {
            Scenario::Current => 0.0,

            Scenario::WaterSaving => {
                let floor = 0.85 * self.baseline.profit_tl;
                if profit < floor {
                    penalty += (floor - profit) / bp * w.profit_floor;
                }
                if water > self.baseline.water_m3 {
                    penalty += (water - self.baseline.water_m3) / bw * w.water_increase;
                }
                water / bw
            }

            Scenario::MaxProfit => {
                let cap = 1.10 * self.baseline.water_m3;
                if water > cap {
                    penalty += (water - cap) / bw * w.water_cap;
                }
                -profit / bp
            }

            Scenario::Balanced => {
                let floor = 0.75 * self.baseline.profit_tl;
                if profit < floor {
                    penalty += (floor - profit) / bp * w.profit_floor;
                }
                water / bw - 0.25 * profit / bp
            }
        };

        objective + penalty
    }

    fn dimensions(&self) -> usize {
        self.water_per_da.len()
    }
}
