//! Using a piece of furniture: Sit (sofa), Type (desk), Coffee (dispenser).
//!
//! Sittable objects follow approach → step on → sit down → use → stand up
//! → step off.  The dispenser is used from the approach cell: approach →
//! drink.  The object stays claimed from `start` until `stop`.

use dw_core::{Animation, Direction, Facing, ObjectId};
use dw_grid::{ClaimHandle, Path, PathFinder, ResourceRef};
use dw_mobility::RouteOutcome;
use tracing::debug;

use crate::context::StateCtx;
use crate::kind::StateKind;
use crate::BehaviorResult;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum UsePhase {
    Approaching,
    /// Stepping onto the seat.
    Settling,
    SittingDown,
    Using,
    StandingUp,
    /// Stepping off the seat.
    Leaving,
    Done,
}

#[derive(Debug)]
pub struct UseObject {
    kind:      StateKind,
    object:    Option<ObjectId>,
    claim:     Option<ClaimHandle>,
    phase:     UsePhase,
    seat_left: bool,
    /// A Settling or Leaving timer fired before the step finished.
    awaiting_step: bool,
}

impl UseObject {
    /// `kind` must be one of Sit, Type, Coffee.
    pub fn new(kind: StateKind) -> Self {
        Self {
            kind,
            object: None,
            claim: None,
            phase: UsePhase::Approaching,
            seat_left: false,
            awaiting_step: false,
        }
    }

    pub fn kind(&self) -> StateKind {
        self.kind
    }

    pub fn object(&self) -> Option<ObjectId> {
        self.object
    }

    pub fn phase(&self) -> UsePhase {
        self.phase
    }

    /// `Some(left)` from stepping onto the object until stepping off, `left`
    /// being the side the human faces.
    pub fn seat_side(&self) -> Option<bool> {
        let seated = self.kind != StateKind::Coffee
            && matches!(
                self.phase,
                UsePhase::Settling | UsePhase::SittingDown | UsePhase::Using | UsePhase::StandingUp
            );
        seated.then_some(self.seat_left)
    }

    pub fn start<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) -> BehaviorResult<bool> {
        let Some(object_kind) = self.kind.required_object() else {
            return Ok(false);
        };
        let agent = ctx.agent;
        let cells = ctx.env.mobility.store.cells();
        let env = &mut *ctx.env;

        let Some(id) = env.resources.random_free(env.world, object_kind, &cells, env.rngs.get_mut(agent)) else {
            return Ok(false);
        };
        let Some(claim) = env.resources.try_claim(ResourceRef::Object(id), agent) else {
            return Ok(false);
        };
        let object = env.world.object(id)?;
        let outcome = env
            .mobility
            .route_to_closest(agent, object.cell, &object.entries, env.world, env.now)?;
        if outcome == RouteOutcome::Unreachable {
            env.resources.release(claim);
            return Ok(false);
        }

        self.object = Some(id);
        self.claim = Some(claim);
        self.phase = UsePhase::Approaching;
        Ok(true)
    }

    pub fn is_active<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) -> BehaviorResult<bool> {
        if self.phase == UsePhase::Approaching {
            let Some(id) = self.object else {
                return Ok(false);
            };
            let object_cell = ctx.env.world.object(id)?.cell;

            // Someone else got there first.
            if ctx.other_cells().contains(&object_cell) || self.claim.is_none() {
                debug!(agent = %ctx.agent, object = %id, "resource taken before arrival");
                return Ok(false);
            }
            if ctx.is_idle() {
                if !ctx.cell().is_neighbor(object_cell) {
                    return Ok(false);
                }
                self.begin_use(ctx, id)?;
            }
        }
        if self.awaiting_step && ctx.is_idle() {
            self.awaiting_step = false;
            self.on_timer(ctx)?;
        }
        Ok(self.phase != UsePhase::Done)
    }

    fn begin_use<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>, id: ObjectId) -> BehaviorResult<()> {
        let object = ctx.env.world.object(id)?;
        let object_cell = object.cell;
        let forced_left = object.forced_left;
        let dir = Direction::between(ctx.cell(), object_cell).unwrap_or(Direction::Current);

        if self.kind == StateKind::Coffee {
            ctx.play(Animation::Drink, Some(Facing::toward(dir)));
            let ms = ctx.roll_loops(Animation::Drink, ctx.config.drink_loops);
            ctx.wait_ms(ms)?;
            self.phase = UsePhase::Using;
        } else {
            self.seat_left = forced_left.unwrap_or(dir.is_left());
            let now = ctx.now();
            ctx.env.mobility.step_onto(ctx.agent, object_cell, now)?;
            ctx.wait_walk()?;
            self.phase = UsePhase::Settling;
        }
        Ok(())
    }

    /// Settling and Leaving only advance once the step has finished; a
    /// renderer may report it later than the walk timer.
    pub fn on_timer<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) -> BehaviorResult<()> {
        if matches!(self.phase, UsePhase::Settling | UsePhase::Leaving) && !ctx.is_idle() {
            self.awaiting_step = true;
            return Ok(());
        }
        let seat = Some(Facing::new(self.seat_left, false));
        match self.phase {
            UsePhase::Settling => {
                ctx.play(Animation::SitDown, seat);
                ctx.wait_ms(Animation::SitDown.duration_ms())?;
                self.phase = UsePhase::SittingDown;
            }
            UsePhase::SittingDown => {
                let ms = if self.kind == StateKind::Type {
                    ctx.play(Animation::Type, seat);
                    ctx.roll(ctx.config.typing)
                } else {
                    ctx.roll(ctx.config.sit)
                };
                ctx.wait_ms(ms)?;
                self.phase = UsePhase::Using;
            }
            UsePhase::Using if self.kind == StateKind::Coffee => {
                ctx.replenish(self.kind);
                self.phase = UsePhase::Done;
            }
            UsePhase::Using => {
                ctx.play(Animation::StandUp, seat);
                ctx.wait_ms(Animation::StandUp.duration_ms() + ctx.config.settle_ms)?;
                self.phase = UsePhase::StandingUp;
            }
            UsePhase::StandingUp => self.step_off(ctx)?,
            UsePhase::Leaving => {
                ctx.replenish(self.kind);
                self.phase = UsePhase::Done;
            }
            UsePhase::Approaching | UsePhase::Done => {}
        }
        Ok(())
    }

    /// Leave the seat through a random free entry side.
    fn step_off<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) -> BehaviorResult<()> {
        let Some(id) = self.object else {
            self.phase = UsePhase::Done;
            return Ok(());
        };
        let object = ctx.env.world.object(id)?;
        let (cell, entries) = (object.cell, object.entries.clone());
        let others = ctx.other_cells();

        let mut exits = ctx.env.world.free_entry_cells(cell, &entries, &others);
        if exits.is_empty() {
            exits = ctx.env.world.free_entry_cells(cell, &Direction::NEIGHBORS, &others);
        }
        match ctx.rng().choose(&exits).copied() {
            Some(exit) => {
                let now = ctx.now();
                ctx.env.mobility.follow(ctx.agent, Path { cells: vec![exit] }, now);
                ctx.wait_walk()?;
                self.phase = UsePhase::Leaving;
            }
            None => {
                debug!(agent = %ctx.agent, object = %id, "no free cell to leave the seat");
                ctx.replenish(self.kind);
                self.phase = UsePhase::Done;
            }
        }
        Ok(())
    }

    pub fn stop<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) {
        if let Some(claim) = self.claim.take() {
            ctx.env.resources.release(claim);
        }
    }
}
