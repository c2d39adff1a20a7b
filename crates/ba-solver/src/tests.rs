//! Solver tests: bounded call counts, determinism, and search quality on
//! analytic objectives with known optima.

use std::sync::atomic::{AtomicUsize, Ordering};

use ba_core::{AllocationVector, SolverRng};
use ba_objective::Objective;

use crate::{AbcParams, AbcSolver, AcoParams, AcoSolver, GaParams, GaSolver, Solver};

// ── Test objectives ───────────────────────────────────────────────────────────

/// Counts every `score` call around an inner closure.
struct CountingObjective<F: Fn(&AllocationVector) -> f64 + Send + Sync> {
    dims:  usize,
    calls: AtomicUsize,
    inner: F,
}

impl<F: Fn(&AllocationVector) -> f64 + Send + Sync> CountingObjective<F> {
    fn new(dims: usize, inner: F) -> Self {
        CountingObjective {
            dims,
            calls: AtomicUsize::new(0),
            inner,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<F: Fn(&AllocationVector) -> f64 + Send + Sync> Objective for CountingObjective<F> {
    fn score(&self, x: &AllocationVector) -> f64 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        (self.inner)(x)
    }

    fn dimensions(&self) -> usize {
        self.dims
    }
}

/// Weighted-water objective: minimized by pure crop 0.
fn water_cost(x: &AllocationVector) -> f64 {
    const W: [f64; 3] = [1.0, 5.0, 3.0];
    x.iter().zip(W.iter()).map(|(s, w)| s * w).sum()
}

fn uniform_cost() -> f64 {
    water_cost(&AllocationVector::uniform(3))
}

// ── Bounded iteration counts ──────────────────────────────────────────────────

#[cfg(test)]
mod call_counts {
    use super::*;

    #[test]
    fn ga_evaluates_pop_size_times_generations() {
        let obj = CountingObjective::new(3, water_cost);
        let params = GaParams {
            pop_size: 10,
            generations: 5,
            ..GaParams::default()
        };
        GaSolver::new(params).solve(&obj, &mut SolverRng::new(1));
        assert_eq!(obj.calls(), 10 * 5);
    }

    #[test]
    fn abc_evaluates_two_probes_per_food_per_round() {
        let obj = CountingObjective::new(3, water_cost);
        // limit high enough that no scout ever fires.
        let params = AbcParams {
            food_count: 5,
            limit: 1000,
            iters: 3,
        };
        AbcSolver::new(params).solve(&obj, &mut SolverRng::new(1));
        // food_count initial evaluations + 2 × food_count per round.
        assert_eq!(obj.calls(), 5 + 3 * 2 * 5);
    }

    #[test]
    fn aco_constructs_iters_times_ants_solutions() {
        let obj = CountingObjective::new(3, water_cost);
        let params = AcoParams {
            units: 10,
            ants: 6,
            iters: 4,
            ..AcoParams::default()
        };
        AcoSolver::new(params, vec![1.0; 3]).solve(&obj, &mut SolverRng::new(1));
        assert_eq!(obj.calls(), 4 * 6);
    }

    #[test]
    fn zero_dimension_objectives_short_circuit() {
        let obj = CountingObjective::new(0, |_| 0.0);
        let mut rng = SolverRng::new(1);
        assert!(GaSolver::new(GaParams::default()).solve(&obj, &mut rng).is_empty());
        assert!(AbcSolver::new(AbcParams::default()).solve(&obj, &mut rng).is_empty());
        assert!(AcoSolver::new(AcoParams::default(), vec![]).solve(&obj, &mut rng).is_empty());
        assert_eq!(obj.calls(), 0);
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism {
    use super::*;

    fn run_twice<S: Solver>(solver: &S) -> (AllocationVector, AllocationVector) {
        let obj = CountingObjective::new(3, water_cost);
        let a = solver.solve(&obj, &mut SolverRng::new(42));
        let b = solver.solve(&obj, &mut SolverRng::new(42));
        (a, b)
    }

    #[test]
    fn ga_reproduces_with_same_seed() {
        let (a, b) = run_twice(&GaSolver::new(GaParams::default()));
        assert_eq!(a, b);
    }

    #[test]
    fn abc_reproduces_with_same_seed() {
        let (a, b) = run_twice(&AbcSolver::new(AbcParams::default()));
        assert_eq!(a, b);
    }

    #[test]
    fn aco_reproduces_with_same_seed() {
        let (a, b) = run_twice(&AcoSolver::new(AcoParams::default(), vec![1.0; 3]));
        assert_eq!(a, b);
    }
}

// ── Search quality ────────────────────────────────────────────────────────────

#[cfg(test)]
mod quality {
    use super::*;

    fn assert_finds_cheap_crop(best: &AllocationVector) {
        assert_eq!(best.len(), 3);
        assert!(
            water_cost(best) < uniform_cost(),
            "no better than uniform: {best:?}"
        );
        let max = best.iter().cloned().fold(f64::MIN, f64::max);
        assert_eq!(best[0], max, "mass not concentrated on the optimum: {best:?}");
    }

    #[test]
    fn ga_concentrates_on_the_optimum() {
        let obj = CountingObjective::new(3, water_cost);
        let best = GaSolver::new(GaParams::default()).solve(&obj, &mut SolverRng::new(7));
        assert_finds_cheap_crop(&best);
        assert!(best[0] > 0.8, "weak convergence: {best:?}");
    }

    #[test]
    fn abc_concentrates_on_the_optimum() {
        let obj = CountingObjective::new(3, water_cost);
        let best = AbcSolver::new(AbcParams::default()).solve(&obj, &mut SolverRng::new(7));
        assert_finds_cheap_crop(&best);
    }

    #[test]
    fn aco_concentrates_on_the_optimum() {
        let obj = CountingObjective::new(3, water_cost);
        let best =
            AcoSolver::new(AcoParams::default(), vec![1.0; 3]).solve(&obj, &mut SolverRng::new(7));
        assert_finds_cheap_crop(&best);
    }

    #[test]
    fn solutions_stay_on_the_simplex() {
        let obj = CountingObjective::new(3, water_cost);
        let mut rng = SolverRng::new(11);
        for best in [
            GaSolver::new(GaParams::default()).solve(&obj, &mut rng),
            AbcSolver::new(AbcParams::default()).solve(&obj, &mut rng),
            AcoSolver::new(AcoParams::default(), vec![1.0; 3]).solve(&obj, &mut rng),
        ] {
            assert!(best.iter().all(|&s| s >= 0.0));
            assert!((best.sum() - 1.0).abs() <= 1e-6);
        }
    }
}

// ── ACO heuristic ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod heuristic {
    use ba_core::{Crop, Scenario};

    use crate::aco_heuristic;

    #[test]
    fn water_saving_favors_thrifty_crops() {
        let crops = vec![Crop::new("A", 300.0, 2000.0), Crop::new("B", 600.0, 4000.0)];
        let eta = aco_heuristic(&crops, Scenario::WaterSaving);
        assert!(eta[0] > eta[1]);
    }

    #[test]
    fn max_profit_favors_high_margins() {
        let crops = vec![Crop::new("A", 300.0, 2000.0), Crop::new("B", 600.0, 4000.0)];
        let eta = aco_heuristic(&crops, Scenario::MaxProfit);
        assert!(eta[1] > eta[0]);
        assert!((eta[0] - 1.2).abs() < 1e-9);
    }

    #[test]
    fn other_scenarios_are_neutral() {
        let crops = vec![Crop::new("A", 300.0, 2000.0), Crop::new("B", 600.0, 4000.0)];
        for s in [Scenario::Current, Scenario::Balanced] {
            assert_eq!(aco_heuristic(&crops, s), vec![1.0, 1.0]);
        }
    }
}
