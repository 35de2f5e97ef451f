//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Behaviors and sessions
//! never read a tick directly: they read milliseconds through the [`Clock`]
//! trait, so every delay is written as "skip unless N ms elapsed" and nothing
//! ever sleeps.  `SimClock` maps ticks to milliseconds:
//!
//!   now_ms = tick * tick_duration_ms
//!
//! The default tick duration is 50 ms (20 ticks per second, the game's rate).

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Monotonic millisecond source.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Fixed-step clock advanced once per simulation tick.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Milliseconds one tick represents.  Default: 50.
    pub tick_duration_ms: u64,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick:     Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u64) -> Self {
        Self { tick_duration_ms, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.offset(1);
    }

    /// How many ticks span `ms` milliseconds (rounded up).
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_duration_ms.max(1))
    }

    /// Break elapsed time into (minutes, seconds, millis) for log lines.
    pub fn elapsed_msm(&self) -> (u64, u64, u64) {
        let ms = self.now_ms();
        (ms / 60_000, (ms % 60_000) / 1_000, ms % 1_000)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(50)
    }
}

impl Clock for SimClock {
    #[inline]
    fn now_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s, ms) = self.elapsed_msm();
        write!(f, "{} ({:02}:{:02}.{:03})", self.current_tick, m, s, ms)
    }
}
