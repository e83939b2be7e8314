use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG owned by one game session. A fixed seed replays the same
/// sequence of random bot moves, which keeps games reproducible.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    pub fn random_bool(&mut self) -> bool {
        self.rng.random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_reported() {
        assert_eq!(SessionRng::new(42).seed(), 42);
        let rng = SessionRng::from_random();
        assert_eq!(SessionRng::new(rng.seed()).seed(), rng.seed());
    }

    #[test]
    fn test_same_seed_replays_the_same_sequence() {
        let mut first = SessionRng::new(7);
        let mut second = SessionRng::new(7);
        for _ in 0..50 {
            assert_eq!(
                first.random_range(0..1000usize),
                second.random_range(0..1000usize)
            );
            assert_eq!(first.random_bool(), second.random_bool());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut first = SessionRng::new(1);
        let mut second = SessionRng::new(2);
        let first_draws: Vec<usize> = (0..20).map(|_| first.random_range(0..1000)).collect();
        let second_draws: Vec<usize> = (0..20).map(|_| second.random_range(0..1000)).collect();
        assert_ne!(first_draws, second_draws);
    }
}
