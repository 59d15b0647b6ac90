//! Tunables of the behavior layer.
//!
//! Defaults reproduce the stock office: base weights Smoke 5, Freeze 1,
//! MoveRandom 2, Talk 8, Sit 2, Coffee 6 and Type equal to the sum of all
//! the others; gains Smoke→Relaxation 0.4, Talk→Social 0.5,
//! Sit→Relaxation 0.2, Coffee→Hunger 0.5.

use dw_agent::{NeedKind, NeedRates};

use crate::kind::StateKind;
use crate::{BehaviorError, BehaviorResult};

// ── BaseWeights ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseWeights {
    pub smoke:       f64,
    pub freeze:      f64,
    pub move_random: f64,
    pub talk:        f64,
    pub sit:         f64,
    pub coffee:      f64,
    /// `None` = sum of the six weights above, which makes typing the single
    /// most likely activity.
    pub type_weight: Option<f64>,
}

impl Default for BaseWeights {
    fn default() -> Self {
        Self {
            smoke:       5.0,
            freeze:      1.0,
            move_random: 2.0,
            talk:        8.0,
            sit:         2.0,
            coffee:      6.0,
            type_weight: None,
        }
    }
}

impl BaseWeights {
    pub fn base(&self, kind: StateKind) -> f64 {
        match kind {
            StateKind::Smoke      => self.smoke,
            StateKind::Freeze     => self.freeze,
            StateKind::MoveRandom => self.move_random,
            StateKind::Talk       => self.talk,
            StateKind::Sit        => self.sit,
            StateKind::Coffee     => self.coffee,
            StateKind::Type       => self.type_weight.unwrap_or(
                self.smoke + self.freeze + self.move_random + self.talk + self.sit + self.coffee,
            ),
        }
    }
}

// ── GainTable ─────────────────────────────────────────────────────────────────

/// Need gain granted when an activity completes, `[state][need]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GainTable {
    pub gains: [[f32; NeedKind::COUNT]; StateKind::COUNT],
}

impl Default for GainTable {
    fn default() -> Self {
        let mut t = Self { gains: [[0.0; NeedKind::COUNT]; StateKind::COUNT] };
        t.set(StateKind::Smoke, NeedKind::Relaxation, 0.4);
        t.set(StateKind::Talk, NeedKind::Social, 0.5);
        t.set(StateKind::Sit, NeedKind::Relaxation, 0.2);
        t.set(StateKind::Coffee, NeedKind::Hunger, 0.5);
        t
    }
}

impl GainTable {
    #[inline]
    pub fn gain(&self, state: StateKind, need: NeedKind) -> f32 {
        self.gains[state.index()][need.index()]
    }

    pub fn set(&mut self, state: StateKind, need: NeedKind, gain: f32) {
        self.gains[state.index()][need.index()] = gain;
    }
}

// ── DurationRange ─────────────────────────────────────────────────────────────

/// Inclusive range of virtual milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DurationRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }
}

// ── BehaviorConfig ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    pub weights: BaseWeights,
    pub gains:   GainTable,
    pub need_rates: NeedRates,

    /// Divisor applied to the weight of the state that just ended.
    pub repeat_penalty: f64,
    /// Needs below this value boost the states that replenish them.
    pub need_threshold: f32,
    /// `weight *= gain * need_boost`.
    pub need_boost: f64,
    /// `weight *= (1 - value) * deficit_boost`.
    pub deficit_boost: f64,

    /// Selection rounds before falling back to Freeze.
    pub max_start_attempts: u32,

    pub freeze:  DurationRange,
    pub sit:     DurationRange,
    pub typing:  DurationRange,
    pub talk:    DurationRange,
    /// Smoke lasts this many smoke-animation cycles (uniform real range).
    pub smoke_loops: (f64, f64),
    /// Coffee lasts this many drink-animation cycles.
    pub drink_loops: (f64, f64),
    /// Slack added after a walk or a one-shot animation before the next step.
    pub settle_ms: u64,
    /// How long a talker on its meeting cell waits for the other side.
    pub meeting_patience_ms: u64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            weights:            BaseWeights::default(),
            gains:              GainTable::default(),
            need_rates:         NeedRates::default(),
            repeat_penalty:     10.0,
            need_threshold:     0.5,
            need_boost:         8.0,
            deficit_boost:      3.0,
            max_start_attempts: 8,
            freeze:             DurationRange::new(1_000, 3_000),
            sit:                DurationRange::new(4_000, 8_000),
            typing:             DurationRange::new(5_000, 10_000),
            talk:               DurationRange::new(4_000, 8_000),
            smoke_loops:        (1.0, 3.0),
            drink_loops:        (1.0, 3.0),
            settle_ms:          100,
            meeting_patience_ms: 20_000,
        }
    }
}

impl BehaviorConfig {
    pub fn validate(&self) -> BehaviorResult<()> {
        if StateKind::ALL.iter().any(|&k| self.weights.base(k) < 0.0) {
            return Err(BehaviorError::Config("base weights must be non-negative".into()));
        }
        if self.weights.freeze <= 0.0 {
            return Err(BehaviorError::Config("freeze weight must be positive".into()));
        }
        if self.repeat_penalty <= 0.0 {
            return Err(BehaviorError::Config("repeat_penalty must be positive".into()));
        }
        if self.max_start_attempts == 0 {
            return Err(BehaviorError::Config("max_start_attempts must be at least 1".into()));
        }
        for (name, (lo, hi)) in [("smoke_loops", self.smoke_loops), ("drink_loops", self.drink_loops)] {
            if !(lo > 0.0 && lo <= hi) {
                return Err(BehaviorError::Config(format!("{name} must satisfy 0 < min <= max")));
            }
        }
        Ok(())
    }
}
