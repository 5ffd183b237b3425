use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices of the training and held-out subsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with a seeded RNG and hold out `ceil(n * test_fraction)`
/// rows. The same `(n, test_fraction, seed)` always yields the same split.
pub fn train_test_split(n: usize, test_fraction: f32, seed: u64) -> TrainTestSplit {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n as f32) * test_fraction).ceil() as usize;
    let n_test = n_test.min(n);
    let train = indices.split_off(n_test);

    TrainTestSplit {
        train,
        test: indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn sizes_follow_fraction() {
        let split = train_test_split(366, 0.2, 42);
        assert_eq!(split.test.len(), 74);
        assert_eq!(split.train.len(), 292);
    }

    #[test]
    fn exact_fraction_does_not_round_up() {
        assert_eq!(train_test_split(10, 0.2, 0).test.len(), 2);
    }

    #[test]
    fn partition_is_disjoint_and_complete() {
        let split = train_test_split(50, 0.2, 7);
        let all: BTreeSet<usize> = split.train.iter().chain(&split.test).copied().collect();
        assert_eq!(all.len(), 50);
        assert_eq!(all.iter().max(), Some(&49));
    }

    #[test]
    fn seed_controls_the_shuffle() {
        assert_eq!(train_test_split(100, 0.2, 1), train_test_split(100, 0.2, 1));
        assert_ne!(train_test_split(100, 0.2, 1), train_test_split(100, 0.2, 2));
    }

    #[test]
    fn empty_input() {
        let split = train_test_split(0, 0.2, 42);
        assert!(split.train.is_empty() && split.test.is_empty());
    }
}
