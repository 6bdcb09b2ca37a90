//! Picking correct answers and distractors from the pool.
//!
//! A record chosen as the correct answer is retired for the rest of the session, distractors are
//! not. Since availability is recomputed from the used set on every call, a retired record is
//! also never offered as a distractor afterwards.

use crate::error::Insufficient;
use crate::traits::UsedSet;
use log::debug;
use rand::seq::SliceRandom;
use rand::RngCore;

/// Indices drawn for a single choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub correct: usize,
    pub distractors: Vec<usize>,
}

/// Pool indices not yet used, in ascending order.
pub fn available(pool_len: usize, used: &UsedSet) -> Vec<usize> {
    (0..pool_len).filter(|i| !used.contains(i)).collect()
}

/// Draw one correct index and `k - 1` distinct distractors from the unused indices. Only the
/// correct index is inserted into `used`.
pub fn sample(
    pool_len: usize,
    used: &mut UsedSet,
    k: usize,
    rng: &mut dyn RngCore,
) -> Result<Sample, Insufficient> {
    let candidates = available(pool_len, used);
    if candidates.len() < k || k == 0 {
        return Err(Insufficient {
            required: k,
            available: candidates.len(),
        });
    }

    let correct = *candidates.choose(rng).ok_or(Insufficient {
        required: k,
        available: 0,
    })?;
    used.insert(correct);

    let others = candidates
        .into_iter()
        .filter(|&i| i != correct)
        .collect::<Vec<usize>>();
    let distractors = others
        .choose_multiple(rng, k - 1)
        .copied()
        .collect::<Vec<usize>>();
    debug!("sampled correct {correct}, distractors {distractors:?}");

    Ok(Sample {
        correct,
        distractors,
    })
}

/// Draw and retire a single index, also returning the rest of the available snapshot it was
/// drawn from.
pub fn draw_one(
    pool_len: usize,
    used: &mut UsedSet,
    rng: &mut dyn RngCore,
) -> Result<(usize, Vec<usize>), Insufficient> {
    let mut candidates = available(pool_len, used);
    let correct = *candidates.choose(rng).ok_or(Insufficient {
        required: 1,
        available: 0,
    })?;
    used.insert(correct);
    candidates.retain(|&i| i != correct);
    debug!("drew {correct}, {} others available", candidates.len());
    Ok((correct, candidates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_sample_retires_only_correct() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let mut used = UsedSet::new();
        let s = sample(10, &mut used, 4, &mut rng).expect("enough records");

        assert_eq!(s.distractors.len(), 3);
        assert!(!s.distractors.contains(&s.correct));
        let mut unique = s.distractors.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 3);

        assert_eq!(used.len(), 1);
        assert!(used.contains(&s.correct));
    }

    #[test]
    fn test_sample_never_reuses_correct() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let mut used = UsedSet::new();
        let mut seen = vec![];
        while let Ok(s) = sample(8, &mut used, 2, &mut rng) {
            assert!(!seen.contains(&s.correct));
            for d in s.distractors.iter() {
                assert!(!seen.contains(d), "retired record used as distractor");
            }
            seen.push(s.correct);
        }
        // Stops once a single record remains.
        assert_eq!(seen.len(), 7);
        assert_eq!(
            sample(8, &mut used, 2, &mut rng),
            Err(Insufficient {
                required: 2,
                available: 1
            })
        );
    }

    #[test]
    fn test_sample_insufficient() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mut used = UsedSet::new();
        assert_eq!(
            sample(1, &mut used, 2, &mut rng),
            Err(Insufficient {
                required: 2,
                available: 1
            })
        );
        assert!(used.is_empty());

        used.insert(0);
        used.insert(2);
        assert_eq!(
            sample(4, &mut used, 3, &mut rng),
            Err(Insufficient {
                required: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_draw_one() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let mut used = UsedSet::new();
        used.insert(1);
        let (correct, others) = draw_one(3, &mut used, &mut rng).unwrap();
        assert_ne!(correct, 1);
        assert_eq!(others.len(), 1);
        assert!(!others.contains(&correct));
        assert!(used.contains(&correct));

        let (last, others) = draw_one(3, &mut used, &mut rng).unwrap();
        assert!(others.is_empty());
        assert_eq!(used.len(), 3);
        assert!(!used.is_empty() && last != correct);

        assert!(draw_one(3, &mut used, &mut rng).is_err());
    }
}
