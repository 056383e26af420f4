//! Deterministic seeded shuffle.
//!
//! A linear-congruential generator drives a Fisher-Yates pass from the last
//! index down to index 1. The recurrence is
//! `seed' = (seed * 9301 + 49297) mod 233280`, normalized to [0, 1) by
//! dividing by the modulus. Reshuffles with the same seed reproduce the same
//! permutation across runs and across reimplementations.

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233280;

struct Lcg {
  state: u64,
}

impl Lcg {
  fn new(seed: u64) -> Self {
    // Reducing the seed modulo the LCG modulus up front is congruent with
    // applying the recurrence to the raw seed, and keeps every multiply
    // within u64 range.
    Self {
      state: seed % LCG_MODULUS,
    }
  }

  /// Next value in [0, 1).
  fn next(&mut self) -> f64 {
    self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
    self.state as f64 / LCG_MODULUS as f64
  }
}

/// Return a shuffled copy of `items` determined entirely by `seed`.
/// The input is never mutated.
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
  let mut arr = items.to_vec();
  let mut rng = Lcg::new(seed);

  for i in (1..arr.len()).rev() {
    let j = (rng.next() * (i as f64 + 1.0)).floor() as usize;
    arr.swap(i, j);
  }

  arr
}
