//! Deterministic solver RNG.
//!
//! # Determinism strategy
//!
//! Every solver invocation receives its own `SolverRng` derived from the
//! engine's global seed:
//!
//!   seed = global_seed XOR (stream_id * MIXING_CONSTANT)
//!
//! where `stream_id` folds the parcel ID, scenario, and algorithm.  The
//! mixing constant is the 64-bit fractional part of the golden ratio, which
//! spreads consecutive stream IDs uniformly across the seed space.  This
//! means:
//!
//! - Re-running the same (parcel, scenario, algorithm) reproduces the search
//!   exactly.
//! - Adding or removing parcels does not disturb the streams of the others.
//! - Solver calls never share RNG state, so an optional parallel basin pass
//!   needs no synchronisation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG handed to one solver call.
///
/// The type is `Send` but intentionally not `Sync` — a stream belongs to
/// exactly one search at a time.
pub struct SolverRng {
    base_seed: u64,
    rng:       SmallRng,
}

impl SolverRng {
    /// Root stream for `seed`.
    pub fn new(seed: u64) -> Self {
        SolverRng {
            base_seed: seed,
            rng:       SmallRng::seed_from_u64(seed),
        }
    }

    /// Derive an independent child stream for `stream_id`.
    ///
    /// Does not consume state from `self`'s sequence, so child derivation is
    /// order-independent: `rng.child(a)` is the same stream no matter how
    /// many other children were derived before it.
    pub fn child(&self, stream_id: u64) -> SolverRng {
        SolverRng::new(self.base_seed ^ stream_id.wrapping_mul(MIXING_CONSTANT))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.rng.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.rng.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}
