use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// Seedable RNG owned by a game session, so a seeded session replays the
/// same AI decisions.
pub struct SessionRng {
    rng: StdRng,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derives an independent generator, e.g. for a search running on a
    /// worker thread.
    pub fn fork(&mut self) -> SessionRng {
        SessionRng::new(self.rng.random())
    }

    /// Bernoulli draw, `probability` is clamped to `0.0..=1.0`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}
