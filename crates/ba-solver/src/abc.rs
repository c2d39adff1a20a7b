//! Artificial bee colony over allocation vectors.
//!
//! A pool of `food_count` candidate vectors is refined in three phases per
//! round: employed bees probe a neighbor of every food, onlooker bees
//! re-probe foods roulette-weighted by quality, and scouts replace foods
//! that failed to improve `limit` times in a row with fresh random vectors.
//! Food fitness is memoized alongside each food, so every neighbor probe
//! costs exactly one objective evaluation.

use ba_core::{vector::normalize, AllocationVector, SolverRng};
use ba_objective::Objective;

use crate::{random_vector, roulette, selection_weight, Solver};

/// ABC tuning knobs.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbcParams {
    pub food_count: usize,
    /// Failed-improvement threshold that triggers a scout reset.
    pub limit: u32,
    /// Fixed number of outer rounds — no early exit.
    pub iters: usize,
}

impl Default for AbcParams {
    fn default() -> Self {
        AbcParams {
            food_count: 25,
            limit:      20,
            iters:      80,
        }
    }
}

struct Food {
    x:      AllocationVector,
    fit:    f64,
    trials: u32,
}

pub struct AbcSolver {
    pub params: AbcParams,
}

impl AbcSolver {
    pub fn new(params: AbcParams) -> Self {
        AbcSolver { params }
    }

    /// Perturb one random dimension toward/away from another:
    /// `y[i] += φ·(y[i] − y[k])`, `φ ∈ [−1, 1]`, clamped and renormalized.
    fn neighbor(&self, x: &AllocationVector, rng: &mut SolverRng) -> AllocationVector {
        let n = x.len();
        if n < 2 {
            return x.clone();
        }
        let i = rng.gen_range(0..n);
        let mut k = rng.gen_range(0..n);
        if k == i {
            k = (k + 1) % n;
        }
        let phi: f64 = rng.gen_range(-1.0..=1.0);
        let mut genes = x.as_slice().to_vec();
        genes[i] = (genes[i] + phi * (genes[i] - genes[k])).clamp(0.0, 1.0);
        normalize(&genes)
    }

    /// Probe a neighbor of food `j`: replace on strict improvement,
    /// otherwise bump its trial counter.
    fn probe(
        &self,
        foods:     &mut [Food],
        j:         usize,
        objective: &dyn Objective,
        rng:       &mut SolverRng,
    ) {
        let cand = self.neighbor(&foods[j].x, rng);
        let fit = objective.score(&cand);
        if fit < foods[j].fit {
            foods[j] = Food { x: cand, fit, trials: 0 };
        } else {
            foods[j].trials += 1;
        }
    }
}

impl Solver for AbcSolver {
    fn solve(&self, objective: &dyn Objective, rng: &mut SolverRng) -> AllocationVector {
        let n = objective.dimensions();
        if n == 0 {
            return AllocationVector::default();
        }
        let food_count = self.params.food_count.max(2);

        let mut foods: Vec<Food> = (0..food_count)
            .map(|_| {
                let x = random_vector(n, rng);
                let fit = objective.score(&x);
                Food { x, fit, trials: 0 }
            })
            .collect();

        // Best-ever, tracked across rounds (scouts may discard the pool's best).
        let (mut best_x, mut best_fit) = (foods[0].x.clone(), foods[0].fit);
        for food in &foods[1..] {
            if food.fit < best_fit {
                best_fit = food.fit;
                best_x = food.x.clone();
            }
        }

        for _ in 0..self.params.iters {
            // Employed phase: one probe per food.
            for j in 0..foods.len() {
                self.probe(&mut foods, j, objective, rng);
            }

            // Onlooker phase: weights computed once per round.
            let weights: Vec<f64> = foods.iter().map(|f| selection_weight(f.fit)).collect();
            for _ in 0..foods.len() {
                let j = roulette(&weights, rng);
                self.probe(&mut foods, j, objective, rng);
            }

            // Scout phase: stagnant foods restart from scratch.
            for food in foods.iter_mut() {
                if food.trials >= self.params.limit {
                    food.x = random_vector(n, rng);
                    food.fit = objective.score(&food.x);
                    food.trials = 0;
                }
            }

            for food in &foods {
                if food.fit < best_fit {
                    best_fit = food.fit;
                    best_x = food.x.clone();
                }
            }
        }

        best_x
    }
}
