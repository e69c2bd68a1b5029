//! Deterministic random number generation.
//!
//! RULE: Nothing in the pipeline may call any platform RNG.
//! All randomness flows through a single DatasetRng seeded once
//! from the configured seed and passed by `&mut` to every stage.
//!
//! Draw order for a run is fixed:
//!   1. fraud rate
//!   2. risky merchant sample
//!   3. per row: country, hour, merchant, customer, amount
//!   4. fraud roulette draws
//!
//! Reordering any of these changes every downstream value.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::ops::RangeInclusive;

/// The run-scoped deterministic RNG.
pub struct DatasetRng {
    pub seed: u64,
    inner: Pcg64Mcg,
}

impl DatasetRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Uniform integer in `[lo, hi]`, both ends inclusive.
    pub fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        assert!(lo <= hi, "empty range {lo}..={hi}");
        let span = u64::from(hi - lo) + 1;
        lo + self.next_u64_below(span) as u32
    }

    /// Uniform float in `[lo, hi)`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Sample N(mu, sigma) with the Box-Muller transform.
    /// Always consumes exactly two uniforms; the paired variate is discarded.
    pub fn normal(&mut self, mu: f64, sigma: f64) -> f64 {
        // 1 - u keeps the log argument in (0, 1].
        let u1 = 1.0 - self.next_f64();
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mu + sigma * z
    }

    /// Pick one element uniformly. Panics on an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "choose() on empty slice");
        &items[self.next_u64_below(items.len() as u64) as usize]
    }

    /// Draw `k` distinct values from `range` via partial Fisher-Yates.
    /// `k` is capped at the range size. Result is in draw order.
    pub fn sample_distinct(&mut self, range: RangeInclusive<u32>, k: usize) -> Vec<u32> {
        let mut pool: Vec<u32> = range.collect();
        let k = k.min(pool.len());
        for i in 0..k {
            let remaining = (pool.len() - i) as u64;
            let j = i + self.next_u64_below(remaining) as usize;
            pool.swap(i, j);
        }
        pool.truncate(k);
        pool
    }
}
