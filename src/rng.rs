use std::collections::{HashMap, VecDeque};

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Every random draw in the simulation goes through this trait.
///
/// Percent rolls, coin flips and index picks are all expressed on top of
/// [`RandomSource::below`], so a scripted source can steer any outcome.
pub trait RandomSource {
    /// Uniform integer in `0..bound`. A zero bound yields zero.
    fn below(&mut self, bound: u32) -> u32;

    /// True with `chance` percent probability.
    fn percent(&mut self, chance: u32) -> bool {
        self.below(100) < chance
    }

    fn coin(&mut self) -> bool {
        self.below(2) == 0
    }

    /// Uniform integer in `low..=high`; collapses to `low` when the range is empty.
    fn between(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        let span = (high - low + 1).min(u32::MAX as i64) as u32;
        low + self.below(span) as i64
    }
}

impl<R: RngCore> RandomSource for R {
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.gen_range(0..bound)
    }
}

/// Owns the master generator and hands out one stream per named subsystem.
pub struct RngManager {
    seed: u64,
    master: ChaCha8Rng,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            master: ChaCha8Rng::seed_from_u64(seed),
            streams: HashMap::new(),
        }
    }

    /// Seeds from the thread generator; the chosen seed stays readable through [`RngManager::seed`].
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stream(&mut self, name: &str) -> SystemRng<'_> {
        let entry = self.streams.entry(name.to_string()).or_insert_with(|| {
            let mut seed_bytes = [0u8; 8];
            self.master.fill_bytes(&mut seed_bytes);
            ChaCha8Rng::seed_from_u64(u64::from_le_bytes(seed_bytes))
        });
        SystemRng { inner: entry }
    }
}

pub struct SystemRng<'a> {
    inner: &'a mut ChaCha8Rng,
}

impl<'a> RngCore for SystemRng<'a> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

/// Replays a fixed sequence of raw draws, each reduced modulo the requested bound.
///
/// Once the script runs out every draw returns `FALLBACK_DRAW % bound`. 98 fails
/// every percent roll below 99 and lands coin flips on heads, which keeps retry
/// loops such as the epidemic death scan terminating.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    draws: VecDeque<u32>,
}

const FALLBACK_DRAW: u32 = 98;

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.draws.pop_front().unwrap_or(FALLBACK_DRAW) % bound
    }
}
