//! Codeword pool generation.
//!
//! Codewords are drawn without replacement from the concatenation of an
//! adjective list and a verb list. A pool smaller than the requested count
//! clamps the count; a word never appears twice in one list.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::debug;

/// Draw up to `count` distinct codewords from `adjectives` and `verbs`.
///
/// Duplicate words (within or across the two lists) are collapsed before
/// drawing. Each draw picks a uniformly random remaining word and removes
/// it from the pool, so the output order is random and repeat-free.
pub fn generate_codewords<R: Rng + ?Sized>(
    adjectives: &[String],
    verbs: &[String],
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut pool: Vec<&String> = adjectives
        .iter()
        .chain(verbs)
        .filter(|w| seen.insert(*w))
        .collect();

    let final_count = count.min(pool.len());
    let mut codewords = Vec::with_capacity(final_count);
    while codewords.len() < final_count && !pool.is_empty() {
        let idx = rng.random_range(0..pool.len());
        codewords.push(pool.swap_remove(idx).clone());
    }

    debug!(
        requested = count,
        drawn = codewords.len(),
        "codewords generated"
    );
    codewords
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_owned()).collect()
    }

    fn is_distinct(list: &[String]) -> bool {
        list.iter().collect::<BTreeSet<_>>().len() == list.len()
    }

    #[test]
    fn draws_requested_count_from_pool() {
        let adjectives = words(&["Red", "Blue"]);
        let verbs = words(&["Run", "Jump"]);
        let pool: BTreeSet<String> = adjectives.iter().chain(&verbs).cloned().collect();

        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let drawn = generate_codewords(&adjectives, &verbs, 2, &mut rng);
            assert_eq!(drawn.len(), 2);
            assert!(is_distinct(&drawn));
            assert!(drawn.iter().all(|w| pool.contains(w)));
        }
    }

    #[test]
    fn every_count_up_to_pool_size_is_exact_and_distinct() {
        let adjectives = words(&["Amber", "Bold", "Calm", "Daring"]);
        let verbs = words(&["Climb", "Drift", "Fetch"]);
        let mut rng = SmallRng::seed_from_u64(3);

        for count in 0..=7 {
            let drawn = generate_codewords(&adjectives, &verbs, count, &mut rng);
            assert_eq!(drawn.len(), count);
            assert!(is_distinct(&drawn));
        }
    }

    #[test]
    fn count_larger_than_pool_is_clamped() {
        let adjectives = words(&["Red", "Blue"]);
        let verbs = words(&["Run"]);
        let mut rng = SmallRng::seed_from_u64(1);

        let drawn = generate_codewords(&adjectives, &verbs, 10, &mut rng);
        assert_eq!(drawn.len(), 3);
        assert!(is_distinct(&drawn));
    }

    #[test]
    fn duplicate_words_are_collapsed() {
        let adjectives = words(&["Red", "Red", "Blue"]);
        let verbs = words(&["Blue", "Run"]);
        let mut rng = SmallRng::seed_from_u64(9);

        let drawn = generate_codewords(&adjectives, &verbs, 5, &mut rng);
        assert_eq!(drawn.len(), 3);
        assert!(is_distinct(&drawn));
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(generate_codewords(&[], &[], 4, &mut rng).is_empty());
    }

    #[test]
    fn same_seed_same_codewords() {
        let adjectives = words(&["Amber", "Bold", "Calm", "Daring"]);
        let verbs = words(&["Climb", "Drift", "Fetch", "Glide"]);

        let a = generate_codewords(&adjectives, &verbs, 4, &mut SmallRng::seed_from_u64(42));
        let b = generate_codewords(&adjectives, &verbs, 4, &mut SmallRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
