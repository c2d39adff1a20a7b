//! Ant colony optimization over discretized area units.
//!
//! The parcel's area is split into `units` indivisible slots (20 slots =
//! 5% resolution).  Each ant assigns every slot a crop by roulette over
//! `τ[slot][crop]^α · η[crop]^β`; the per-crop slot counts normalize into an
//! allocation vector.  After each iteration pheromone evaporates (with a
//! floor) and the best slice of ants deposits reinforcement along its slot
//! choices.

use ba_core::{vector::normalize, AllocationVector, Crop, Scenario, SolverRng};
use ba_objective::Objective;

use crate::{roulette, selection_weight, Solver};

/// ACO tuning knobs.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoParams {
    /// Indivisible area slots per parcel (20 → 5% resolution).
    pub units: usize,
    pub ants: usize,
    /// Fixed number of iterations — no early exit.
    pub iters: usize,
    /// Pheromone exponent.
    pub alpha: f64,
    /// Heuristic-desirability exponent.
    pub beta: f64,
    /// Multiplicative pheromone decay per iteration.
    pub evaporation: f64,
    /// Pheromone never decays below this.
    pub pheromone_floor: f64,
    /// Fraction of each iteration's best ants that deposit pheromone.
    pub elite_fraction: f64,
}

impl Default for AcoParams {
    fn default() -> Self {
        AcoParams {
            units:           20,
            ants:            30,
            iters:           60,
            alpha:           1.0,
            beta:            2.0,
            evaporation:     0.15,
            pheromone_floor: 0.01,
            elite_fraction:  0.15,
        }
    }
}

/// Scenario-dependent heuristic desirability `η` per candidate crop.
///
/// WaterSaving favors thrifty crops, MaxProfit favors high margins, and the
/// remaining scenarios leave the choice to pheromone alone.
pub fn aco_heuristic(crops: &[Crop], scenario: Scenario) -> Vec<f64> {
    crops
        .iter()
        .map(|c| match scenario {
            Scenario::WaterSaving => 1.0 / (1.0 + c.water_per_da),
            Scenario::MaxProfit   => 1.0 + c.profit_per_da / 10_000.0,
            _ => 1.0,
        })
        .collect()
}

/// One constructed solution: per-slot crop choices plus its fitness.
struct Ant {
    choices: Vec<usize>,
    x:       AllocationVector,
    fit:     f64,
}

pub struct AcoSolver {
    pub params: AcoParams,
    /// Per-crop desirability, usually from [`aco_heuristic`].  Replaced by
    /// all-ones when its length does not match the objective's dimensions.
    heuristic: Vec<f64>,
}

impl AcoSolver {
    pub fn new(params: AcoParams, heuristic: Vec<f64>) -> Self {
        AcoSolver { params, heuristic }
    }

    /// Construct one ant: roulette a crop for every slot independently.
    fn construct(
        &self,
        tau:       &[Vec<f64>],
        eta:       &[f64],
        objective: &dyn Objective,
        rng:       &mut SolverRng,
    ) -> Ant {
        let n = eta.len();
        let mut choices = Vec::with_capacity(tau.len());
        let mut counts = vec![0.0f64; n];
        let mut weights = vec![0.0f64; n];
        for slot_tau in tau {
            for i in 0..n {
                weights[i] = slot_tau[i].powf(self.params.alpha) * eta[i].powf(self.params.beta);
            }
            let crop = roulette(&weights, rng);
            choices.push(crop);
            counts[crop] += 1.0;
        }
        let x = normalize(&counts);
        let fit = objective.score(&x);
        Ant { choices, x, fit }
    }
}

impl Solver for AcoSolver {
    fn solve(&self, objective: &dyn Objective, rng: &mut SolverRng) -> AllocationVector {
        let n = objective.dimensions();
        if n == 0 {
            return AllocationVector::default();
        }
        let p = &self.params;
        let units = p.units.max(1);
        let eta: Vec<f64> = if self.heuristic.len() == n {
            self.heuristic.clone()
        } else {
            vec![1.0; n]
        };

        let mut tau = vec![vec![1.0f64; n]; units];
        let mut best_x: Option<AllocationVector> = None;
        let mut best_fit = f64::INFINITY;

        for _ in 0..p.iters {
            let mut ants: Vec<Ant> = (0..p.ants.max(1))
                .map(|_| self.construct(&tau, &eta, objective, rng))
                .collect();

            for ant in &ants {
                if ant.fit < best_fit {
                    best_fit = ant.fit;
                    best_x = Some(ant.x.clone());
                }
            }

            // Evaporate, with a floor so no trail ever dies completely.
            for slot_tau in tau.iter_mut() {
                for t in slot_tau.iter_mut() {
                    *t = (*t * (1.0 - p.evaporation)).max(p.pheromone_floor);
                }
            }

            // The best slice of this iteration's ants reinforces its choices.
            ants.sort_by(|a, b| a.fit.total_cmp(&b.fit));
            let top = ((ants.len() as f64 * p.elite_fraction).ceil() as usize)
                .clamp(1, ants.len());
            for ant in &ants[..top] {
                let delta = selection_weight(ant.fit);
                for (slot, &crop) in ant.choices.iter().enumerate() {
                    tau[slot][crop] += delta;
                }
            }
        }

        best_x.unwrap_or_else(|| AllocationVector::uniform(n))
    }
}
