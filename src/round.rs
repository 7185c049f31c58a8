use rand::{seq::SliceRandom, Rng};

/// Smallest value a tile can show
pub const MIN_NUMBER: u32 = 1;
/// Largest value a tile can show
pub const MAX_NUMBER: u32 = 10;
/// Smallest pool that still leaves a non-empty target subset
pub const MIN_COUNT: usize = 3;

/// One immutable puzzle: the displayed numbers and the sum to hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    numbers: Vec<u32>,
    target: u32,
}

impl Round {
    /// Generate a round of `count` numbers using the thread-local RNG.
    ///
    /// `count` must be at least [`MIN_COUNT`]; callers are expected to have
    /// validated it (see [`crate::config::Config::validate`]).
    pub fn generate(count: usize) -> Self {
        Self::generate_with(&mut rand::thread_rng(), count)
    }

    /// Generate a round from the given random source.
    ///
    /// The target is the sum of the first `count - 2` numbers in generation
    /// order. The pool is shuffled afterwards, so the target subset is
    /// spread over the display order.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Self {
        debug_assert!(count >= MIN_COUNT, "round size must be at least {MIN_COUNT}");

        let mut numbers: Vec<u32> = (0..count)
            .map(|_| rng.gen_range(MIN_NUMBER..=MAX_NUMBER))
            .collect();

        let target = numbers.iter().take(count.saturating_sub(2)).sum();

        numbers.shuffle(rng);

        Self { numbers, target }
    }

    /// Build a round with a fixed pool and target.
    pub fn from_parts(numbers: Vec<u32>, target: u32) -> Self {
        Self { numbers, target }
    }

    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{rngs::StdRng, SeedableRng};

    /// True when some `size`-element subset of `numbers` sums to `target`
    fn has_subset_of_size(numbers: &[u32], size: usize, target: u32) -> bool {
        numbers
            .iter()
            .combinations(size)
            .any(|combo| combo.into_iter().sum::<u32>() == target)
    }

    #[test]
    fn test_generate_has_requested_length() {
        for count in MIN_COUNT..12 {
            let round = Round::generate(count);
            assert_eq!(round.len(), count);
            assert_eq!(round.numbers().len(), count);
        }
    }

    #[test]
    fn test_generate_values_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let round = Round::generate_with(&mut rng, 6);
            assert!(round
                .numbers()
                .iter()
                .all(|n| (MIN_NUMBER..=MAX_NUMBER).contains(n)));
        }
    }

    #[test]
    fn test_target_is_reachable_with_count_minus_two_numbers() {
        let mut rng = StdRng::seed_from_u64(42);
        for count in MIN_COUNT..9 {
            for _ in 0..25 {
                let round = Round::generate_with(&mut rng, count);
                assert!(
                    has_subset_of_size(round.numbers(), count - 2, round.target()),
                    "no {}-subset of {:?} sums to {}",
                    count - 2,
                    round.numbers(),
                    round.target()
                );
            }
        }
    }

    #[test]
    fn test_target_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let round = Round::generate_with(&mut rng, 6);
            assert!(round.target() >= 4 * MIN_NUMBER);
            assert!(round.target() <= 4 * MAX_NUMBER);
        }
    }

    #[test]
    fn test_minimum_count_uses_single_number_target() {
        let mut rng = StdRng::seed_from_u64(11);
        let round = Round::generate_with(&mut rng, MIN_COUNT);
        assert_eq!(round.len(), 3);
        assert!(round.numbers().contains(&round.target()));
    }

    #[test]
    fn test_same_seed_same_round() {
        let a = Round::generate_with(&mut StdRng::seed_from_u64(99), 6);
        let b = Round::generate_with(&mut StdRng::seed_from_u64(99), 6);
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_order_is_shuffled() {
        // Over many rounds the shuffled pool must sometimes differ from the
        // order in which the values were drawn.
        let mut shuffled_seen = false;
        for seed in 0..50 {
            let mut draw_rng = StdRng::seed_from_u64(seed);
            let drawn: Vec<u32> = (0..8)
                .map(|_| draw_rng.gen_range(MIN_NUMBER..=MAX_NUMBER))
                .collect();

            let round = Round::generate_with(&mut StdRng::seed_from_u64(seed), 8);
            assert_eq!(
                round.numbers().iter().sorted().collect_vec(),
                drawn.iter().sorted().collect_vec()
            );
            if round.numbers() != drawn.as_slice() {
                shuffled_seen = true;
            }
        }
        assert!(shuffled_seen);
    }

    #[test]
    fn test_from_parts() {
        let round = Round::from_parts(vec![4, 7, 2, 9, 1, 3], 22);
        assert_eq!(round.numbers(), &[4, 7, 2, 9, 1, 3]);
        assert_eq!(round.target(), 22);
        assert!(!round.is_empty());
    }
}
