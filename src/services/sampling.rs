use crate::error::{Error, Result};
use rand::seq::index;

/// Draws `count` distinct elements from `pool`, uniformly and without
/// replacement. The pool is never mutated. Asking for more than the pool
/// holds is a hard error, never a silent truncation.
pub fn sample_questions<T: Clone>(pool: &[T], count: usize) -> Result<Vec<T>> {
    if count > pool.len() {
        return Err(Error::InsufficientPool {
            requested: count,
            available: pool.len(),
        });
    }
    let mut rng = rand::thread_rng();
    Ok(index::sample(&mut rng, pool.len(), count)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn returns_exactly_k_distinct_elements_from_pool() {
        let pool: Vec<i32> = (0..20).collect();
        for k in 0..=20 {
            let drawn = sample_questions(&pool, k).unwrap();
            assert_eq!(drawn.len(), k);
            let unique: HashSet<i32> = drawn.iter().copied().collect();
            assert_eq!(unique.len(), k, "duplicate drawn with k={}", k);
            assert!(drawn.iter().all(|x| pool.contains(x)));
        }
    }

    #[test]
    fn oversized_request_fails_and_leaves_pool_intact() {
        let pool = vec!["a", "b", "c"];
        let err = sample_questions(&pool, 4).unwrap_err();
        match err {
            Error::InsufficientPool {
                requested,
                available,
            } => {
                assert_eq!(requested, 4);
                assert_eq!(available, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(pool, vec!["a", "b", "c"]);
    }

    #[test]
    fn zero_from_empty_pool_is_fine() {
        let pool: Vec<u8> = Vec::new();
        assert!(sample_questions(&pool, 0).unwrap().is_empty());
    }

    #[test]
    fn full_pool_draw_is_a_permutation() {
        let pool: Vec<i32> = (0..10).collect();
        let mut drawn = sample_questions(&pool, 10).unwrap();
        drawn.sort_unstable();
        assert_eq!(drawn, pool);
    }
}
