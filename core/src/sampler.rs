//! Weighted categorical sampling by cumulative-sum walk.

use crate::rng::DatasetRng;

/// Draw one value with probability proportional to its weight.
///
/// Rolls r in [0, 1) and returns the first value whose cumulative weight
/// reaches r. Weights are not renormalized: if they sum short of 1.0
/// (rounding drift, or a deliberately thin table) the last entry absorbs
/// the remainder. Panics on an empty table; config validation rules that out.
pub fn weighted_choice<'a, T>(items: &'a [(T, f64)], rng: &mut DatasetRng) -> &'a T {
    assert!(!items.is_empty(), "weighted_choice() on empty table");
    let roll = rng.next_f64();
    let mut cumulative = 0.0;
    for (value, weight) in items {
        cumulative += weight;
        if roll <= cumulative {
            return value;
        }
    }
    &items[items.len() - 1].0
}
