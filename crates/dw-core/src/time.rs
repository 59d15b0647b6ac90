//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  `SimClock` maps ticks
//! to virtual milliseconds:
//!
//!   elapsed_ms = tick * tick_duration_ms
//!
//! Every timer in the behavior layer is expressed in milliseconds (animation
//! lengths, walk duration) and rounded up to whole ticks, so a wait is never
//! shorter than requested.  The default resolution is 100 ms per tick.

use std::fmt;

use crate::{DwError, DwResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
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

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and virtual milliseconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Virtual milliseconds represented by one tick.
    pub tick_duration_ms: u32,
    /// Advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self {
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed virtual milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms as u64
    }

    /// Virtual seconds covered by a single tick; the need-decay step.
    #[inline]
    pub fn tick_secs(&self) -> f32 {
        self.tick_duration_ms as f32 / 1000.0
    }

    /// Whole ticks covering `ms` (rounded up, at least one for `ms > 0`).
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_duration_ms.max(1) as u64)
    }

    /// The tick at which a wait of `ms` started at `now` expires.  Always
    /// strictly after `now` so a timer never fires in the tick that set it.
    #[inline]
    pub fn deadline(&self, now: Tick, ms: u64) -> Tick {
        now + self.ticks_for_ms(ms).max(1)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed_ms();
        write!(f, "{} ({}.{:03}s)", self.current_tick, ms / 1000, ms % 1000)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Virtual milliseconds per tick.  Default: 100.
    pub tick_duration_ms: u32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit a snapshot every N ticks.
    pub output_interval_ticks: u64,

    /// Virtual duration of walking one cell.  Default: 1200 ms.
    pub walk_cell_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms:      100,
            total_ticks:           6_000,
            seed:                  0,
            output_interval_ticks: 10,
            walk_cell_ms:          1_200,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }

    /// Reject values the tick loop cannot work with.
    pub fn validate(&self) -> DwResult<()> {
        if self.tick_duration_ms == 0 {
            return Err(DwError::Config("tick_duration_ms must be positive".into()));
        }
        if self.output_interval_ticks == 0 {
            return Err(DwError::Config("output_interval_ticks must be positive".into()));
        }
        Ok(())
    }
}
