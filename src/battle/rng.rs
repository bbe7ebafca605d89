//! Every random draw the battle makes goes through `RandomSource`, so a test
//! can script the coin flip, the flee roll and the level-up bonuses.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform integer in `min..=max`. `reason` names the draw for logging
    /// and for the panic message of scripted sources.
    fn between(&mut self, min: u32, max: u32, reason: &str) -> u32;
}

/// Backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn between(&mut self, min: u32, max: u32, reason: &str) -> u32 {
        let value = rand::rng().random_range(min..=max);
        tracing::trace!("rolled {} in {}..={} for {}", value, min, max, reason);
        value
    }
}

/// Reproducible draws from a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn between(&mut self, min: u32, max: u32, reason: &str) -> u32 {
        let value = self.rng.random_range(min..=max);
        tracing::trace!("rolled {} in {}..={} for {}", value, min, max, reason);
        value
    }
}

/// Replays a fixed list of outcomes, ignoring the requested range.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    outcomes: Vec<u32>,
    index: usize,
}

impl ScriptedRandom {
    pub fn new(outcomes: Vec<u32>) -> Self {
        Self { outcomes, index: 0 }
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.outcomes.len() - self.index
    }
}

impl RandomSource for ScriptedRandom {
    fn between(&mut self, _min: u32, _max: u32, reason: &str) -> u32 {
        if self.index >= self.outcomes.len() {
            panic!(
                "ScriptedRandom exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }
}
