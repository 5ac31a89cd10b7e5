//! Deterministic per-subject traversal RNG.
//!
//! # Determinism strategy
//!
//! Every traversal gets its own `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (subject_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive subject ids across the seed space.  Two subjects
//! never share random state, and replaying a subject with the same seed
//! reproduces every weighted pick exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::SubjectId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Random stream threaded through every iterator `next` call.
///
/// Lives inside the traversal `Context`; no global random state is touched.
#[derive(Clone, Debug)]
pub struct TraversalRng(SmallRng);

impl TraversalRng {
    /// Seed directly.  Mostly useful in tests.
    pub fn new(seed: u64) -> Self {
        TraversalRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed deterministically from a global seed and the subject being driven.
    pub fn for_subject(global_seed: u64, subject: SubjectId) -> Self {
        let seed = global_seed ^ (subject.0 as u64).wrapping_mul(MIXING_CONSTANT);
        TraversalRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform index in `0..len`.  `None` when `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.gen_range(0..len))
    }

    /// Uniform `f32` in `[lo, hi]`, tolerating `lo > hi` and `lo == hi`.
    ///
    /// With a non-finite bound no sample is drawn: `lo` if it is finite,
    /// otherwise `0.0`.
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if !lo.is_finite() || !hi.is_finite() {
            return if lo.is_finite() { lo } else { 0.0 };
        }
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        if lo == hi {
            return lo;
        }
        self.0.gen_range(lo..=hi)
    }
}
