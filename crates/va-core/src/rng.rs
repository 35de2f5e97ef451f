//! Per-agent random streams.
//!
//! An agent's stream depends only on the run seed and its id:
//!
//!   stream_seed = seed XOR (id * GOLDEN_GAMMA)
//!
//! so a given `[agents] seed` replays the same waypoints and building sites
//! no matter how many agents share the world.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// Odd 64-bit constant that spreads consecutive ids across the seed space.
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Random source owned by one agent and lent to its behaviors each tick.
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(seed: u64, agent: AgentId) -> Self {
        let stream_seed = seed ^ u64::from(agent.0).wrapping_mul(GOLDEN_GAMMA);
        AgentRng(SmallRng::seed_from_u64(stream_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `None` for an empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.0)
    }
}
