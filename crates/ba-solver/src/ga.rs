//! Genetic algorithm over allocation vectors.
//!
//! Elitist generational GA: sort by fitness, carry the elite unchanged,
//! fill the rest with blend-crossover children of tournament-selected
//! parents, mutate per gene, renormalize after every operator so the
//! proportion invariant holds by construction.

use ba_core::{vector::normalize, AllocationVector, SolverRng};
use ba_objective::Objective;

use crate::{random_vector, Solver};

/// GA tuning knobs.  Defaults follow the production configuration.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaParams {
    pub pop_size: usize,
    /// Individuals copied unchanged into the next generation.
    pub elite: usize,
    /// Parents are tournament-picked from the best `parent_pool` only.
    pub parent_pool: usize,
    /// Per-gene mutation probability.
    pub mut_rate: f64,
    /// Mutation adds `U(−mut_step, mut_step)` before clamping to [0, 1].
    pub mut_step: f64,
    /// Fixed number of evaluation rounds — no early exit.
    pub generations: usize,
}

impl Default for GaParams {
    fn default() -> Self {
        GaParams {
            pop_size:    40,
            elite:       4,
            parent_pool: 12,
            mut_rate:    0.18,
            mut_step:    0.175,
            generations: 60,
        }
    }
}

pub struct GaSolver {
    pub params: GaParams,
}

impl GaSolver {
    pub fn new(params: GaParams) -> Self {
        GaSolver { params }
    }

    /// Evaluate and sort a population, best (lowest score) first.
    fn evaluate(
        &self,
        population: Vec<AllocationVector>,
        objective:  &dyn Objective,
    ) -> Vec<(f64, AllocationVector)> {
        let mut scored: Vec<(f64, AllocationVector)> = population
            .into_iter()
            .map(|x| (objective.score(&x), x))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        scored
    }

    /// Pick a parent by tournament-of-2 over the best `parent_pool` slots.
    /// `scored` is sorted ascending, so the smaller index wins.
    fn select<'a>(
        &self,
        scored: &'a [(f64, AllocationVector)],
        rng:    &mut SolverRng,
    ) -> &'a AllocationVector {
        let pool = self.params.parent_pool.min(scored.len()).max(1);
        let i = rng.gen_range(0..pool);
        let j = rng.gen_range(0..pool);
        &scored[i.min(j)].1
    }

    /// Blend crossover with a single `t ~ U(0,1)` across all genes,
    /// renormalized back onto the simplex.
    fn crossover(
        &self,
        a:   &AllocationVector,
        b:   &AllocationVector,
        rng: &mut SolverRng,
    ) -> AllocationVector {
        let t: f64 = rng.gen_range(0.0..1.0);
        let raw: Vec<f64> = a
            .iter()
            .zip(b.iter())
            .map(|(&ai, &bi)| t * ai + (1.0 - t) * bi)
            .collect();
        normalize(&raw)
    }

    /// Mutate each gene independently; renormalize only if anything changed.
    fn mutate(&self, child: AllocationVector, rng: &mut SolverRng) -> AllocationVector {
        let mut genes = child.as_slice().to_vec();
        let mut touched = false;
        for g in genes.iter_mut() {
            if rng.gen_bool(self.params.mut_rate) {
                let delta = rng.gen_range(-self.params.mut_step..=self.params.mut_step);
                *g = (*g + delta).clamp(0.0, 1.0);
                touched = true;
            }
        }
        if touched { normalize(&genes) } else { child }
    }

    fn breed(
        &self,
        scored: &[(f64, AllocationVector)],
        rng:    &mut SolverRng,
    ) -> Vec<AllocationVector> {
        let pop_size = scored.len();
        let elite = self.params.elite.min(pop_size);
        let mut next: Vec<AllocationVector> =
            scored.iter().take(elite).map(|(_, x)| x.clone()).collect();
        while next.len() < pop_size {
            let a = self.select(scored, rng).clone();
            let b = self.select(scored, rng).clone();
            let child = self.crossover(&a, &b, rng);
            next.push(self.mutate(child, rng));
        }
        next
    }
}

impl Solver for GaSolver {
    fn solve(&self, objective: &dyn Objective, rng: &mut SolverRng) -> AllocationVector {
        let n = objective.dimensions();
        if n == 0 {
            return AllocationVector::default();
        }
        let pop_size = self.params.pop_size.max(2);
        let generations = self.params.generations.max(1);

        let population: Vec<AllocationVector> =
            (0..pop_size).map(|_| random_vector(n, rng)).collect();
        let mut scored = self.evaluate(population, objective);

        // One evaluation round per generation, exactly `generations` total;
        // the last round's sort doubles as the best-of-final-population pick.
        for _ in 1..generations {
            let next = self.breed(&scored, rng);
            scored = self.evaluate(next, objective);
        }
        scored.swap_remove(0).1
    }
}
