//! `ba-solver` — metaheuristic search over allocation vectors.
//!
//! Three solvers, one seam: each implements [`Solver`] and minimizes an
//! [`Objective`](ba_objective::Objective) over normalized proportion vectors.
//! All three run a fixed iteration budget with no early exit or convergence
//! detection, so call counts are exactly predictable and runs with the same
//! seed reproduce bit-for-bit.
//!
//! | Module  | Solver                                              |
//! |---------|-----------------------------------------------------|
//! | [`ga`]  | Genetic algorithm — elitist, tournament, blend      |
//! | [`abc`] | Artificial bee colony — employed/onlooker/scout     |
//! | [`aco`] | Ant colony — discretized units, pheromone roulette  |

pub mod abc;
pub mod aco;
pub mod ga;

#[cfg(test)]
mod tests;

pub use abc::{AbcParams, AbcSolver};
pub use aco::{aco_heuristic, AcoParams, AcoSolver};
pub use ga::{GaParams, GaSolver};

use ba_core::{AllocationVector, SolverRng};
use ba_objective::Objective;

/// A search strategy over allocation vectors.
///
/// `solve` must perform its full fixed iteration budget and return the best
/// vector it saw; it must draw randomness only from `rng`.
pub trait Solver {
    fn solve(&self, objective: &dyn Objective, rng: &mut SolverRng) -> AllocationVector;
}

/// A fresh normalized random vector of dimension `n`.
pub(crate) fn random_vector(n: usize, rng: &mut SolverRng) -> AllocationVector {
    let raw: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..1.0)).collect();
    AllocationVector::from_raw(&raw)
}

/// Guard for `1/(ε + max(0, fitness + 1))` selection weights.
pub(crate) const WEIGHT_EPS: f64 = 1e-9;

/// Fitness → roulette weight: better (lower) scores get larger weights,
/// and strongly negative scores saturate instead of flipping sign.
#[inline]
pub(crate) fn selection_weight(fitness: f64) -> f64 {
    1.0 / (WEIGHT_EPS + (fitness + 1.0).max(0.0))
}

/// Roulette-select an index proportional to `weights`.
///
/// Falls back to the last index on accumulated rounding; `weights` must be
/// non-empty.
pub(crate) fn roulette(weights: &[f64], rng: &mut SolverRng) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return rng.gen_range(0..weights.len());
    }
    let mut ticket = rng.gen_range(0.0..total);
    for (i, w) in weights.iter().enumerate() {
        ticket -= w;
        if ticket <= 0.0 {
            return i;
        }
    }
    weights.len() - 1
}
