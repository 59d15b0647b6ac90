//! The seven activity states and the enum that dispatches to them.
//!
//! Every state follows the same lifecycle, driven by the scheduler:
//!
//! 1. `start` either commits the state (`Ok(true)`) or declines without side
//!    effects (`Ok(false)`), e.g. when no sofa is free or the goal cannot be
//!    reached.
//! 2. `is_active` is polled once per tick; it may advance the state when a
//!    walk ends.
//! 3. `on_timer` runs when a timer scheduled through `StateCtx::wait_ms`
//!    comes due.
//! 4. `stop` releases claims and meetings.  Always called exactly once for a
//!    started state.

mod freeze;
mod furniture;
mod smoke;
mod talk;
mod wander;

pub use freeze::Freeze;
pub use furniture::{UseObject, UsePhase};
pub use smoke::Smoke;
pub use talk::{Talk, TalkPhase};
pub use wander::MoveRandom;

use dw_core::ObjectId;
use dw_grid::PathFinder;

use crate::context::StateCtx;
use crate::kind::StateKind;
use crate::BehaviorResult;

#[derive(Debug)]
pub enum State {
    Freeze(Freeze),
    MoveRandom(MoveRandom),
    Smoke(Smoke),
    /// Sit, Type or Coffee.
    Furniture(UseObject),
    Talk(Talk),
}

impl State {
    /// Fresh, unstarted state of `kind`.  Talk needs a meeting and is built
    /// by the scheduler instead.
    pub fn fresh(kind: StateKind) -> Option<State> {
        Some(match kind {
            StateKind::Freeze => State::Freeze(Freeze::default()),
            StateKind::MoveRandom => State::MoveRandom(MoveRandom::default()),
            StateKind::Smoke => State::Smoke(Smoke::default()),
            StateKind::Sit | StateKind::Type | StateKind::Coffee => State::Furniture(UseObject::new(kind)),
            StateKind::Talk => return None,
        })
    }

    pub fn kind(&self) -> StateKind {
        match self {
            State::Freeze(_) => StateKind::Freeze,
            State::MoveRandom(_) => StateKind::MoveRandom,
            State::Smoke(_) => StateKind::Smoke,
            State::Furniture(s) => s.kind(),
            State::Talk(_) => StateKind::Talk,
        }
    }

    /// The object sat on and the side faced, while seated.
    pub fn seat(&self) -> Option<(ObjectId, bool)> {
        match self {
            State::Furniture(s) => Some((s.object()?, s.seat_side()?)),
            _ => None,
        }
    }

    pub fn start<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) -> BehaviorResult<bool> {
        match self {
            State::Freeze(s) => s.start(ctx),
            State::MoveRandom(s) => s.start(ctx),
            State::Smoke(s) => s.start(ctx),
            State::Furniture(s) => s.start(ctx),
            State::Talk(s) => s.start(ctx),
        }
    }

    pub fn is_active<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) -> BehaviorResult<bool> {
        match self {
            State::Freeze(s) => Ok(s.is_active()),
            State::MoveRandom(s) => Ok(s.is_active(ctx)),
            State::Smoke(s) => Ok(s.is_active()),
            State::Furniture(s) => s.is_active(ctx),
            State::Talk(s) => s.is_active(ctx),
        }
    }

    pub fn on_timer<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) -> BehaviorResult<()> {
        match self {
            State::Freeze(s) => s.on_timer(),
            State::MoveRandom(_) => {}
            State::Smoke(s) => s.on_timer(ctx),
            State::Furniture(s) => s.on_timer(ctx)?,
            State::Talk(s) => s.on_timer(ctx),
        }
        Ok(())
    }

    pub fn stop<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) {
        match self {
            State::Furniture(s) => s.stop(ctx),
            State::Talk(s) => s.stop(ctx),
            State::Freeze(_) | State::MoveRandom(_) | State::Smoke(_) => {}
        }
    }
}
