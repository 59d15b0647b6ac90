//! One side of a two-person conversation.
//!
//! Both participants run a `Talk` bound to the same meeting.  Each walks to
//! its own meeting cell; whoever arrives second starts the conversation for
//! both and schedules the end timer on both sides.

use dw_core::{AgentId, Animation, Direction, Facing, MeetingId};
use dw_grid::{ClaimHandle, PathFinder};
use dw_mobility::RouteOutcome;
use tracing::debug;

use crate::context::StateCtx;
use crate::kind::StateKind;
use crate::meeting::{Meeting, MeetingStatus};
use crate::BehaviorResult;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TalkPhase {
    /// Walking to the meeting cell.
    Gathering,
    /// On the meeting cell, waiting for the other side or talking.
    Waiting,
    Done,
}

#[derive(Debug)]
pub struct Talk {
    meeting: MeetingId,
    seat:    usize,
    peer:    AgentId,
    /// Held by the initiator: the recruited peer.
    claim:   Option<ClaimHandle>,
    phase:   TalkPhase,
}

impl Talk {
    pub fn new(meeting: MeetingId, seat: usize, peer: AgentId) -> Self {
        Self { meeting, seat, peer, claim: None, phase: TalkPhase::Gathering }
    }

    pub fn with_claim(mut self, claim: ClaimHandle) -> Self {
        self.claim = Some(claim);
        self
    }

    pub fn meeting(&self) -> MeetingId {
        self.meeting
    }

    pub fn peer(&self) -> AgentId {
        self.peer
    }

    pub fn phase(&self) -> TalkPhase {
        self.phase
    }

    pub fn start<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) -> BehaviorResult<bool> {
        let Some(goal) = ctx.meetings.get(self.meeting).map(|m| m.cells[self.seat]) else {
            return Ok(false);
        };
        let (agent, now) = (ctx.agent, ctx.now());
        let outcome = ctx.env.mobility.route_to(agent, goal, ctx.env.world, now)?;
        if outcome == RouteOutcome::Unreachable {
            return Ok(false);
        }
        self.phase = TalkPhase::Gathering;
        Ok(true)
    }

    pub fn is_active<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) -> BehaviorResult<bool> {
        match ctx.meetings.status(self.meeting) {
            MeetingStatus::Cancelled => return Ok(false),
            MeetingStatus::Talking { .. } => return Ok(self.phase != TalkPhase::Done),
            MeetingStatus::Gathering => {}
        }
        if self.phase == TalkPhase::Gathering && ctx.is_idle() {
            let (own, other) = match ctx.meetings.get(self.meeting) {
                Some(m) => (m.cells[self.seat], m.cells[Meeting::other(self.seat)]),
                None => return Ok(false),
            };
            if ctx.cell() != own {
                debug!(agent = %ctx.agent, meeting = %self.meeting, "missed the meeting cell");
                return Ok(false);
            }
            self.phase = TalkPhase::Waiting;
            if ctx.meetings.arrive(self.meeting, self.seat) {
                self.begin(ctx, own, other)?;
            } else {
                ctx.wait_ms(ctx.config.meeting_patience_ms)?;
            }
        }
        Ok(self.phase != TalkPhase::Done)
    }

    /// Both sides are in place: face each other and talk.
    fn begin<P: PathFinder>(
        &mut self,
        ctx:   &mut StateCtx<'_, '_, P>,
        own:   dw_core::Cell,
        other: dw_core::Cell,
    ) -> BehaviorResult<()> {
        let ms = ctx.roll(ctx.config.talk);
        let until = ctx.env.clock.deadline(ctx.now(), ms);
        ctx.meetings.begin_talk(self.meeting, until);

        let dir = Direction::between(own, other).unwrap_or(Direction::Current);
        ctx.play(Animation::Talk, Some(Facing::toward(dir)));
        ctx.env.agents.play(self.peer, Animation::Talk, Some(Facing::toward(dir.opposite())));
        ctx.timers.schedule(ctx.agent, until)?;
        ctx.timers.schedule(self.peer, until)?;
        debug!(agent = %ctx.agent, peer = %self.peer, %until, "conversation started");
        Ok(())
    }

    pub fn on_timer<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) {
        if self.phase == TalkPhase::Done {
            return;
        }
        match ctx.meetings.status(self.meeting) {
            MeetingStatus::Talking { until } if ctx.now() >= until => {
                ctx.replenish(StateKind::Talk);
                self.phase = TalkPhase::Done;
            }
            // The other side never showed up.
            MeetingStatus::Gathering if self.phase == TalkPhase::Waiting => {
                debug!(agent = %ctx.agent, meeting = %self.meeting, "gave up waiting");
                ctx.meetings.cancel(self.meeting);
                self.phase = TalkPhase::Done;
            }
            _ => {}
        }
    }

    /// Cancels the meeting unless the conversation finished.
    pub fn stop<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) {
        if self.phase != TalkPhase::Done {
            ctx.meetings.cancel(self.meeting);
        }
        ctx.meetings.leave(self.meeting, self.seat);
        if let Some(claim) = self.claim.take() {
            ctx.env.resources.release(claim);
        }
        self.phase = TalkPhase::Done;
    }
}
