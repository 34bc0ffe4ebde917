//! Small shared utilities used across the engines.
//!
//! ## RNG draws
//!
//! Every random choice goes through `Rng::gen::<f64>()` rather than
//! `gen_range`, so each pick consumes exactly one draw and a constant-output
//! test RNG (e.g. `StepRng`) can never stall a rejection loop.

use rand::Rng;

/// Uniform index into a collection of `len` items. `len` must be non-zero.
pub fn pick_index<R: Rng>(rng: &mut R, len: usize) -> usize {
    let idx = (rng.gen::<f64>() * len as f64) as usize;
    idx.min(len.saturating_sub(1))
}

/// Uniformly pick one item, or `None` for an empty slice.
pub fn pick<'a, R: Rng, T>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(pick_index(rng, items.len()))
}

/// Draw one item proportionally to its weight. Non-positive weights are never
/// chosen; returns `None` when no weight is positive.
pub fn weighted_pick<R: Rng, T: Copy>(rng: &mut R, weighted: &[(T, f64)]) -> Option<T> {
    let total: f64 = weighted.iter().map(|&(_, w)| w.max(0.0)).sum();
    if total <= 0.0 {
        return None;
    }
    let mut target = rng.gen::<f64>() * total;
    let mut last = None;
    for &(item, w) in weighted {
        if w <= 0.0 {
            continue;
        }
        if target < w {
            return Some(item);
        }
        target -= w;
        last = Some(item);
    }
    // Floating-point residue can run past the final bucket.
    last
}

/// Human name for a round that starts with `field_size` entrants.
pub fn round_name(field_size: usize) -> String {
    match field_size {
        2 => "Final".to_string(),
        4 => "Semifinals".to_string(),
        8 => "Quarterfinals".to_string(),
        n => format!("Round of {n}"),
    }
}

/// Keep only the last `n` items, preserving order.
pub fn keep_last<T>(mut items: Vec<T>, n: usize) -> Vec<T> {
    if items.len() > n {
        items.drain(..items.len() - n);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn round_names() {
        assert_eq!(round_name(2), "Final");
        assert_eq!(round_name(4), "Semifinals");
        assert_eq!(round_name(8), "Quarterfinals");
        assert_eq!(round_name(16), "Round of 16");
        assert_eq!(round_name(64), "Round of 64");
    }

    #[test]
    fn pick_index_stays_in_range_at_extremes() {
        let mut low = StepRng::new(0, 0);
        let mut high = StepRng::new(u64::MAX, 0);
        assert_eq!(pick_index(&mut low, 4), 0);
        assert_eq!(pick_index(&mut high, 4), 3);
    }

    #[test]
    fn weighted_pick_skips_zero_weights() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let v = weighted_pick(&mut rng, &[("a", 0.0), ("b", 3.0), ("c", -1.0)]);
            assert_eq!(v, Some("b"));
        }
        assert_eq!(weighted_pick(&mut rng, &[("a", 0.0)]), None);
    }

    #[test]
    fn weighted_pick_respects_extremes() {
        let items = [(1u8, 1.0), (2u8, 1.0), (3u8, 2.0)];
        assert_eq!(weighted_pick(&mut StepRng::new(0, 0), &items), Some(1));
        assert_eq!(weighted_pick(&mut StepRng::new(u64::MAX, 0), &items), Some(3));
    }

    #[test]
    fn keep_last_trims_front() {
        assert_eq!(keep_last(vec![1, 2, 3, 4, 5], 2), vec![4, 5]);
        assert_eq!(keep_last(vec![1, 2], 5), vec![1, 2]);
    }
}
