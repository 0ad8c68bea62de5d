//! Random item sampling with exclusion.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::pool::Pool;
use crate::types::{Item, ItemId};

/// Draw one item uniformly from the pool, skipping excluded
/// identities. Returns `None` when the eligible subset is empty,
/// which callers treat as a completed pool, not an error.
///
/// Each call is independent; nothing prevents immediate repetition
/// unless the caller excludes the previous item.
pub fn sample<'a, R: Rng>(
    pool: &'a Pool,
    exclude: &HashSet<ItemId>,
    rng: &mut R,
) -> Option<&'a Item> {
    let eligible: Vec<&Item> = pool
        .items()
        .iter()
        .filter(|item| !exclude.contains(&item.id))
        .collect();
    eligible.choose(rng).copied()
}

/// Draw up to `count` distinct items, excluding one identity. Used to
/// build distractor options for the multiple-choice quiz.
pub fn sample_distractors<'a, R: Rng>(
    pool: &'a Pool,
    exclude: &ItemId,
    count: usize,
    rng: &mut R,
) -> Vec<&'a Item> {
    let eligible: Vec<&Item> = pool
        .items()
        .iter()
        .filter(|item| &item.id != exclude)
        .collect();
    eligible
        .choose_multiple(rng, count.min(eligible.len()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(ids: &[&str]) -> Pool {
        let items = ids
            .iter()
            .map(|id| Item::new(*id, *id, vec![id.to_string()]))
            .collect();
        Pool::new(items).unwrap()
    }

    #[test]
    fn never_returns_excluded_items() {
        let pool = pool(&["a", "b", "c", "d"]);
        let exclude: HashSet<ItemId> = [ItemId::from("a"), ItemId::from("c")].into();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let item = sample(&pool, &exclude, &mut rng).unwrap();
            assert!(!exclude.contains(&item.id));
        }
    }

    #[test]
    fn full_exclusion_yields_none() {
        let pool = pool(&["a", "b"]);
        let exclude: HashSet<ItemId> = pool.ids().into_iter().collect();
        let mut rng = StdRng::seed_from_u64(2);
        assert!(sample(&pool, &exclude, &mut rng).is_none());
    }

    #[test]
    fn single_survivor_always_returned() {
        let pool = pool(&["a", "b", "c"]);
        let exclude: HashSet<ItemId> = [ItemId::from("a"), ItemId::from("b")].into();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(sample(&pool, &exclude, &mut rng).unwrap().id, "c".into());
        }
    }

    #[test]
    fn repeated_sampling_covers_most_of_the_pool() {
        // Probabilistic: with 500 draws over 10 items, seeing fewer
        // than 10 distinct items is vanishingly unlikely, but assert
        // a lower bound rather than full coverage.
        let pool = pool(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
        let mut rng = StdRng::seed_from_u64(4);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.insert(sample(&pool, &HashSet::new(), &mut rng).unwrap().id.clone());
        }
        assert!(seen.len() >= 8, "only saw {} distinct items", seen.len());
    }

    #[test]
    fn distractors_are_distinct_and_exclude_the_answer() {
        let pool = pool(&["a", "b", "c", "d", "e"]);
        let answer = ItemId::from("c");
        let mut rng = StdRng::seed_from_u64(5);
        let picks = sample_distractors(&pool, &answer, 3, &mut rng);
        assert_eq!(picks.len(), 3);
        let ids: HashSet<_> = picks.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids.len(), 3);
        assert!(!ids.contains(&answer));
    }

    #[test]
    fn distractor_request_larger_than_pool_is_clamped() {
        let pool = pool(&["a", "b"]);
        let mut rng = StdRng::seed_from_u64(6);
        let picks = sample_distractors(&pool, &ItemId::from("a"), 7, &mut rng);
        assert_eq!(picks.len(), 1);
    }
}
