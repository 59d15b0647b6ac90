//! Internal needs ("humors") of a human.
//!
//! Each need is a value in `[0, 1]`: 1 is fully satisfied.  Values decay
//! linearly with virtual time and jump up by a state-specific gain when the
//! matching activity completes.  Every mutation clamps, so no sequence of
//! calls can leave the range.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NeedKind {
    Relaxation,
    Hunger,
    Social,
}

impl NeedKind {
    pub const COUNT: usize = 3;
    pub const ALL: [NeedKind; 3] = [NeedKind::Relaxation, NeedKind::Hunger, NeedKind::Social];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NeedKind::Relaxation => "relaxation",
            NeedKind::Hunger     => "hunger",
            NeedKind::Social     => "social",
        }
    }
}

impl fmt::Display for NeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── NeedRates ─────────────────────────────────────────────────────────────────

/// Decay per virtual second, indexed by `NeedKind`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeedRates {
    pub per_sec: [f32; NeedKind::COUNT],
}

impl Default for NeedRates {
    fn default() -> Self {
        // relaxation, hunger, social
        Self { per_sec: [0.004, 0.003, 0.005] }
    }
}

impl NeedRates {
    /// No decay at all; handy for deterministic tests.
    pub fn none() -> Self {
        Self { per_sec: [0.0; NeedKind::COUNT] }
    }

    #[inline]
    pub fn rate(&self, kind: NeedKind) -> f32 {
        self.per_sec[kind.index()]
    }
}

// ── Needs ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Needs {
    values: [f32; NeedKind::COUNT],
}

impl Default for Needs {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Needs {
    /// All needs start at `baseline` (clamped).
    pub fn new(baseline: f32) -> Self {
        Self { values: [clamp01(baseline); NeedKind::COUNT] }
    }

    #[inline]
    pub fn value(&self, kind: NeedKind) -> f32 {
        self.values[kind.index()]
    }

    pub fn set(&mut self, kind: NeedKind, value: f32) {
        self.values[kind.index()] = clamp01(value);
    }

    /// Lower every need by `rate * elapsed_secs`.  Negative elapsed time is
    /// treated as zero so values never rise here.
    pub fn decay(&mut self, elapsed_secs: f32, rates: &NeedRates) {
        let dt = elapsed_secs.max(0.0);
        for kind in NeedKind::ALL {
            let v = self.values[kind.index()] - rates.rate(kind).max(0.0) * dt;
            self.values[kind.index()] = clamp01(v);
        }
    }

    /// Raise `kind` by `gain`.
    pub fn replenish(&mut self, kind: NeedKind, gain: f32) {
        let v = self.values[kind.index()] + gain;
        self.values[kind.index()] = clamp01(v);
    }

    /// Mean of all needs; the overall mood shown by indicators.
    pub fn general(&self) -> f32 {
        self.values.iter().sum::<f32>() / NeedKind::COUNT as f32
    }
}

#[inline]
fn clamp01(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
