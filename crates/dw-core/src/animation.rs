//! Animation catalogue shared by the behavior layer and the renderer.
//!
//! The core never plays animations; it only decides which one is active and
//! uses the catalogue's frame counts to size activity timers.

use std::fmt;

use crate::Direction;

/// Playback rate of every human sprite sheet.
pub const FRAME_RATE: u32 = 12;

/// The set of human animations.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Animation {
    #[default]
    Freeze,
    Walk,
    Smoke,
    SitDown,
    StandUp,
    Type,
    Talk,
    Drink,
}

impl Animation {
    pub const ALL: [Animation; 8] = [
        Animation::Freeze,
        Animation::Walk,
        Animation::Smoke,
        Animation::SitDown,
        Animation::StandUp,
        Animation::Type,
        Animation::Talk,
        Animation::Drink,
    ];

    /// Frames in one cycle of the sheet.
    pub fn frame_count(self) -> u32 {
        match self {
            Animation::Freeze  => 3,
            Animation::Walk    => 6,
            // light up, smoke, exhale, idle
            Animation::Smoke   => 8 + 6 + 7 + 20,
            Animation::SitDown => 5,
            Animation::StandUp => 5,
            Animation::Type    => 4,
            Animation::Talk    => 6,
            Animation::Drink   => 21,
        }
    }

    /// Length of one cycle in milliseconds.
    #[inline]
    pub fn duration_ms(self) -> u64 {
        self.frame_count() as u64 * 1000 / FRAME_RATE as u64
    }

    /// `SitDown` and `StandUp` play once and hold their last frame.
    #[inline]
    pub fn is_looped(self) -> bool {
        !matches!(self, Animation::SitDown | Animation::StandUp)
    }

    /// Sheets that have a back-facing ("top") variant.
    #[inline]
    pub fn has_top_variant(self) -> bool {
        matches!(self, Animation::Freeze | Animation::Walk | Animation::Talk)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Animation::Freeze  => "freeze",
            Animation::Walk    => "walk",
            Animation::Smoke   => "smoke",
            Animation::SitDown => "sit_down",
            Animation::StandUp => "stand_up",
            Animation::Type    => "type",
            Animation::Talk    => "talk",
            Animation::Drink   => "drink",
        }
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Facing ────────────────────────────────────────────────────────────────────

/// Sprite orientation: horizontally mirrored (`left`) and/or back-facing
/// (`top`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facing {
    pub left: bool,
    pub top:  bool,
}

impl Facing {
    #[inline]
    pub fn new(left: bool, top: bool) -> Self {
        Self { left, top }
    }

    /// Orientation used while walking or looking in `dir`.
    #[inline]
    pub fn toward(dir: Direction) -> Self {
        Self { left: dir.is_left(), top: dir.is_top() }
    }
}
