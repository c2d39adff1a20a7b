//! Allocation vectors — normalized crop-share proportions.
//!
//! An `AllocationVector` describes how one parcel's area splits across its
//! candidate crops: `n` nonnegative reals summing to 1 (± [`SUM_TOLERANCE`]).
//! Solvers produce raw real vectors and pass them through [`normalize`];
//! the invariant is maintained by construction, never checked at use sites.

use std::ops::Index;

/// Allowed deviation of the component sum from 1.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// An ordered set of nonnegative crop shares summing to 1.
///
/// Index `i` corresponds to the `i`-th crop of the candidate set the vector
/// was built against.  Transient: produced by solvers, consumed by the
/// per-parcel runner, never persisted.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationVector(Vec<f64>);

impl AllocationVector {
    /// Normalize `raw` into a valid allocation vector (see [`normalize`]).
    pub fn from_raw(raw: &[f64]) -> Self {
        normalize(raw)
    }

    /// The uniform split `1/n` for each of `n` crops.  Empty for `n = 0`.
    pub fn uniform(n: usize) -> Self {
        if n == 0 {
            return AllocationVector(Vec::new());
        }
        AllocationVector(vec![1.0 / n as f64; n])
    }

    /// A vector putting the whole area on crop `i` of `n`.
    pub fn single(n: usize, i: usize) -> Self {
        let mut v = vec![0.0; n];
        if i < n {
            v[i] = 1.0;
        }
        AllocationVector(v)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Sum of components — 1 ± [`SUM_TOLERANCE`] unless the vector is empty.
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl Index<usize> for AllocationVector {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

/// Normalize an arbitrary real vector into valid proportions.
///
/// Non-finite components are treated as 0 and negatives are clamped to 0,
/// then the vector is divided by its sum.  A zero sum yields the uniform
/// vector `1/n`.  Never fails, for any input length including zero.
pub fn normalize(raw: &[f64]) -> AllocationVector {
    let n = raw.len();
    if n == 0 {
        return AllocationVector(Vec::new());
    }
    let clamped: Vec<f64> = raw.iter().map(|&x| if x.is_finite() { x.max(0.0) } else { 0.0 }).collect();
    let sum: f64 = clamped.iter().sum();
    if sum <= 0.0 {
        return AllocationVector::uniform(n);
    }
    AllocationVector(clamped.into_iter().map(|x| x / sum).collect())
}
