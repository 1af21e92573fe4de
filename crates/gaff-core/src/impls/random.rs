//! RandomSource implementations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ports::RandomSource;

/// StdRandom wraps `rand`'s StdRng.
///
/// Seed it to replay a run; `from_entropy` for production use.
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for StdRandom {
    fn next_below(&mut self, bound: u64) -> u64 {
        self.rng.gen_range(0..bound)
    }
}

/// ScriptedRandom replays a fixed list of values.
///
/// Each value is reduced modulo the requested bound, and the script cycles
/// once exhausted. An empty script always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    script: Vec<u64>,
    cursor: usize,
    draws: usize,
}

impl ScriptedRandom {
    pub fn new(script: impl Into<Vec<u64>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
            draws: 0,
        }
    }

    /// Always yields 0.
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedRandom {
    fn next_below(&mut self, bound: u64) -> u64 {
        self.draws += 1;
        if self.script.is_empty() {
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value % bound
    }
}
