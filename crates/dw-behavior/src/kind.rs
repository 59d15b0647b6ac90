//! The closed set of human activities.

use std::fmt;

use dw_grid::ObjectKind;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StateKind {
    Smoke,
    Freeze,
    MoveRandom,
    Talk,
    Sit,
    Type,
    Coffee,
}

impl StateKind {
    pub const COUNT: usize = 7;

    /// Candidate order used by selection.
    pub const ALL: [StateKind; 7] = [
        StateKind::Smoke,
        StateKind::Freeze,
        StateKind::MoveRandom,
        StateKind::Talk,
        StateKind::Sit,
        StateKind::Type,
        StateKind::Coffee,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Furniture this activity needs a free instance of.
    pub fn required_object(self) -> Option<ObjectKind> {
        match self {
            StateKind::Sit    => Some(ObjectKind::Sofa),
            StateKind::Type   => Some(ObjectKind::Desk),
            StateKind::Coffee => Some(ObjectKind::Dispenser),
            _                 => None,
        }
    }

    /// A human in one of these states may be pulled into a conversation.
    #[inline]
    pub fn is_interruptible(self) -> bool {
        matches!(self, StateKind::Sit | StateKind::MoveRandom | StateKind::Freeze | StateKind::Smoke)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StateKind::Smoke      => "smoke",
            StateKind::Freeze     => "freeze",
            StateKind::MoveRandom => "move_random",
            StateKind::Talk       => "talk",
            StateKind::Sit        => "sit",
            StateKind::Type       => "type",
            StateKind::Coffee     => "coffee",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StateKind {
    type Err = crate::BehaviorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| crate::BehaviorError::Config(format!("unknown state {s:?}")))
    }
}
