use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Direction;

/// Seedable random source owned by one session. The seed is kept around so
/// a session can be replayed deterministically from its log line.
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

    pub fn from_entropy() -> Self {
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

    pub fn random_direction(&mut self) -> Direction {
        Direction::ALL[self.random_range(0..Direction::ALL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(7);
        let mut b = SessionRng::new(7);
        for _ in 0..50 {
            assert_eq!(
                a.random_range(0..1000usize),
                b.random_range(0..1000usize)
            );
        }
    }

    #[test]
    fn test_seed_is_reported() {
        let rng = SessionRng::new(1234);
        assert_eq!(rng.seed(), 1234);
    }
}
